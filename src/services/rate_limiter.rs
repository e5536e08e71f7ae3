//! 礼貌限速
//!
//! 每个 worker 持有自己的副本，在开始处理下一个 URL 前固定等待 `1/rps`。
//! 这不是全局令牌桶：N 个 worker 时实际总速率最多可达目标的 N 倍。

use std::time::Duration;
use tokio::time::sleep;

/// 单 worker 限速器
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimiter {
    delay: Option<Duration>,
}

impl RateLimiter {
    /// `rps <= 0`（或非有限值）时关闭限速
    pub fn new(rps: f64) -> Self {
        let delay = if rps.is_finite() && rps > 0.0 {
            Some(Duration::from_secs_f64(1.0 / rps))
        } else {
            None
        };
        Self { delay }
    }

    pub fn disabled() -> Self {
        Self { delay: None }
    }

    /// 每次开始新页面前的等待时间
    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// 等待直到可以开始下一个页面，永不失败
    pub async fn acquire(&self) {
        if let Some(delay) = self.delay {
            sleep(delay).await;
        }
    }
}
