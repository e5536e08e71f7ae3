//! 页面处理上下文
//!
//! 封装"哪个 worker 正在处理第几个 URL"这一信息

use std::fmt::Display;

/// 页面处理上下文
#[derive(Debug, Clone)]
pub struct PageCtx {
    pub url: String,

    /// worker 编号（仅用于日志显示，从1开始）
    pub worker_id: usize,

    /// URL 出队顺序（从1开始）
    pub sequence: usize,

    /// URL 总数
    pub total: usize,
}

impl PageCtx {
    pub fn new(url: String, worker_id: usize, sequence: usize, total: usize) -> Self {
        Self {
            url,
            worker_id,
            sequence,
            total,
        }
    }
}

impl Display for PageCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[worker {} 页面 {}/{}]",
            self.worker_id, self.sequence, self.total
        )
    }
}
