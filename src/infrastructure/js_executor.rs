//! JS 执行器 - 基础设施层
//!
//! 持有一个 chromiumoxide Page，只暴露 `RenderPage` 的能力

use async_trait::async_trait;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use serde_json::Value as JsonValue;
use std::path::Path;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::infrastructure::render::{RenderPage, WaitUntil};

const READY_STATE_POLL: Duration = Duration::from_millis(100);

/// 给当前文档打标记，新文档上不会有这个标记
const MARK_STALE_DOCUMENT: &str = "window.__tmAuditStale = true";

/// 旧文档 / 错误页 / readyState
const READY_STATE_PROBE: &str = r#"
    (() => {
        if (window.__tmAuditStale) return 'stale';
        if (location.protocol === 'chrome-error:') return 'error';
        return document.readyState;
    })()
"#;

/// 离开作用域时取消后台导航任务
struct NavigationTask(JoinHandle<Result<(), CdpError>>);

impl Drop for NavigationTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// JS 执行器
///
/// 职责：
/// - 持有 worker 独占的 Page
/// - 不认识商标 / Finding
/// - 不处理超时（由调用方统一包一层）
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 轮询新文档的 `document.readyState` 直到满足加载条件
    ///
    /// 导航切换期间脚本可能执行失败，这时继续等待；真正的导航错误由 `goto` 任务给出。
    async fn wait_for_ready_state(&self, url: &str, wait_until: WaitUntil) {
        loop {
            let state = match self.page.evaluate(READY_STATE_PROBE).await {
                Ok(result) => result.into_value::<String>().unwrap_or_default(),
                Err(e) => {
                    debug!("{} readyState 暂不可读: {}", url, e);
                    String::new()
                }
            };

            if wait_until.is_satisfied_by(&state) {
                debug!("{} readyState={}", url, state);
                return;
            }
            sleep(READY_STATE_POLL).await;
        }
    }
}

#[async_trait]
impl RenderPage for JsExecutor {
    /// `goto` 要等到 load 事件才返回，所以放到后台执行，
    /// 同时轮询 readyState，先满足加载条件的一方结束等待。
    async fn navigate(&self, url: &str, wait_until: WaitUntil) -> AuditResult<()> {
        if let Err(e) = self.page.evaluate(MARK_STALE_DOCUMENT).await {
            debug!("标记旧文档失败: {}", e);
        }

        let page = self.page.clone();
        let target = url.to_string();
        let mut task = NavigationTask(tokio::spawn(async move {
            page.goto(target).await.map(|_| ())
        }));

        tokio::select! {
            joined = &mut task.0 => match joined {
                Ok(result) => result.map_err(|e| AuditError::navigation(url, e)),
                Err(e) => Err(AuditError::navigation(url, e)),
            },
            _ = self.wait_for_ready_state(url, wait_until) => Ok(()),
        }
    }

    async fn evaluate(&self, script: &str) -> AuditResult<JsonValue> {
        let result = self.page.evaluate(script).await?;
        let json_value = result.into_value().map_err(AuditError::evaluation)?;
        Ok(json_value)
    }

    async fn screenshot(&self, path: &Path) -> AuditResult<()> {
        let params = ScreenshotParams::builder().full_page(true).build();
        self.page
            .save_screenshot(params, path)
            .await
            .map_err(|e| AuditError::Screenshot {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn close(&self) -> AuditResult<()> {
        self.page
            .clone()
            .close()
            .await
            .map_err(|e| AuditError::browser("close page", e))
    }
}
