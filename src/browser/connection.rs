use chromiumoxide::Browser;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::error::{AuditError, AuditResult};

/// 连接到已经打开调试端口的浏览器
///
/// 例如 `chrome --remote-debugging-port=9222`
pub async fn connect_to_browser(port: u16) -> AuditResult<(Browser, JoinHandle<()>)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AuditError::browser("connect", e)
    })?;
    debug!("浏览器连接成功");

    let handler_task = tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    sleep(Duration::from_millis(300)).await;

    Ok((browser, handler_task))
}
