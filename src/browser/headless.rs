use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::Path;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::error::{AuditError, AuditResult};

/// 启动无头浏览器
///
/// `chrome_path` 为空时由 chromiumoxide 自动查找本机 Chrome / Chromium。
pub async fn launch_headless_browser(
    chrome_path: Option<&Path>,
) -> AuditResult<(Browser, JoinHandle<()>)> {
    info!("🚀 启动无头浏览器...");

    let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
        "--disable-gpu",
        "--no-sandbox",
        "--disable-dev-shm-usage",
    ]);
    if let Some(path) = chrome_path {
        debug!("浏览器可执行文件: {}", path.display());
        builder = builder.chrome_executable(path);
    }

    let config = builder.build().map_err(|e| {
        error!("配置无头浏览器失败: {}", e);
        AuditError::browser("configure", e)
    })?;

    let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
        error!("启动无头浏览器失败: {}", e);
        AuditError::browser("launch", e)
    })?;
    debug!("无头浏览器启动成功");

    // 在后台处理浏览器事件
    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    Ok((browser, handler_task))
}
