//! 浏览器资源
//!
//! 整个运行只启动（或连接）一次浏览器，每个 worker 从这里领取独立页面。

pub mod connection;
pub mod headless;

use async_trait::async_trait;
use chromiumoxide::Browser;
use std::path::Path;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{AuditError, AuditResult};
use crate::infrastructure::{JsExecutor, RenderPage, Renderer};

pub use connection::connect_to_browser;
pub use headless::launch_headless_browser;

/// 基于 chromiumoxide 的渲染引擎
pub struct ChromiumRenderer {
    browser: Mutex<Browser>,
    handler_task: JoinHandle<()>,
    /// 由本进程启动的浏览器在结束时关闭；连接的浏览器保持原样
    owned: bool,
}

impl ChromiumRenderer {
    /// 启动无头浏览器，或在指定端口时连接现有浏览器
    pub async fn start(debug_port: Option<u16>, chrome_path: Option<&Path>) -> AuditResult<Self> {
        let (browser, handler_task, owned) = match debug_port {
            Some(port) => {
                let (browser, task) = connect_to_browser(port).await?;
                (browser, task, false)
            }
            None => {
                let (browser, task) = launch_headless_browser(chrome_path).await?;
                (browser, task, true)
            }
        };

        Ok(Self {
            browser: Mutex::new(browser),
            handler_task,
            owned,
        })
    }

    /// 关闭浏览器并停止事件处理
    pub async fn shutdown(self) {
        if self.owned {
            let mut browser = self.browser.lock().await;
            match browser.close().await {
                Ok(_) => info!("✓ 浏览器已关闭"),
                Err(e) => warn!("⚠️ 关闭浏览器失败: {}", e),
            }
            if let Err(e) = browser.wait().await {
                warn!("⚠️ 等待浏览器进程退出失败: {}", e);
            }
        }
        self.handler_task.abort();
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_page(&self) -> AuditResult<Box<dyn RenderPage>> {
        let page = self
            .browser
            .lock()
            .await
            .new_page("about:blank")
            .await
            .map_err(|e| AuditError::browser("new page", e))?;
        Ok(Box::new(JsExecutor::new(page)))
    }
}
