#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tm_audit::{AuditError, AuditResult, RenderPage, Renderer, ShutdownHandle, TextCandidate, WaitUntil};

/// 假站点中一个 URL 的行为
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Candidates(Vec<TextCandidate>),
    NavigationFails(String),
    EvaluationFails(String),
    /// 导航永远不返回（用于超时）
    Hangs,
}

/// 固定、可重复的假站点
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, FakeResponse>,
    screenshot_fails: bool,
    navigations: Mutex<Vec<String>>,
    screenshots: Mutex<Vec<PathBuf>>,
    stop_after: Option<(ShutdownHandle, String)>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, texts: &[&str]) -> Self {
        let candidates = texts
            .iter()
            .enumerate()
            .map(|(i, t)| TextCandidate::new(*t, format!("html > body > main > h{}", i + 1)))
            .collect();
        self.pages
            .insert(url.to_string(), FakeResponse::Candidates(candidates));
        self
    }

    pub fn respond(mut self, url: &str, response: FakeResponse) -> Self {
        self.pages.insert(url.to_string(), response);
        self
    }

    pub fn failing_screenshots(mut self) -> Self {
        self.screenshot_fails = true;
        self
    }

    /// 导航到指定 URL 时请求停止
    pub fn stop_on(mut self, url: &str, handle: ShutdownHandle) -> Self {
        self.stop_after = Some((handle, url.to_string()));
        self
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.screenshots.lock().unwrap().clone()
    }
}

pub struct FakePage {
    site: Arc<FakeSite>,
    current: Mutex<Option<String>>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl RenderPage for FakePage {
    async fn navigate(&self, url: &str, _wait_until: WaitUntil) -> AuditResult<()> {
        self.site.navigations.lock().unwrap().push(url.to_string());
        if let Some((handle, stop_url)) = &self.site.stop_after {
            if stop_url == url {
                handle.request();
            }
        }
        tokio::task::yield_now().await;

        match self.site.pages.get(url) {
            Some(FakeResponse::Hangs) => std::future::pending().await,
            Some(FakeResponse::NavigationFails(msg)) => Err(AuditError::navigation(url, msg)),
            Some(_) => {
                *self.current.lock().unwrap() = Some(url.to_string());
                Ok(())
            }
            None => Err(AuditError::navigation(url, "net::ERR_NAME_NOT_RESOLVED")),
        }
    }

    async fn evaluate(&self, _script: &str) -> AuditResult<JsonValue> {
        let current = self.current.lock().unwrap().clone().unwrap_or_default();
        match self.site.pages.get(&current) {
            Some(FakeResponse::Candidates(c)) => Ok(serde_json::to_value(c)?),
            Some(FakeResponse::EvaluationFails(msg)) => Err(AuditError::evaluation(msg)),
            _ => Err(AuditError::evaluation("no page loaded")),
        }
    }

    async fn screenshot(&self, path: &Path) -> AuditResult<()> {
        if self.site.screenshot_fails {
            return Err(AuditError::Screenshot {
                path: path.display().to_string(),
                message: "capture failed".to_string(),
            });
        }
        self.site.screenshots.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn close(&self) -> AuditResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakeRenderer {
    pub site: Arc<FakeSite>,
    pub pages_created: AtomicUsize,
    pub pages_closed: Arc<AtomicUsize>,
    /// 第 N 次（从1开始）创建页面时失败
    pub fail_on_page: Option<usize>,
}

impl FakeRenderer {
    pub fn new(site: FakeSite) -> Self {
        Self {
            site: Arc::new(site),
            pages_created: AtomicUsize::new(0),
            pages_closed: Arc::new(AtomicUsize::new(0)),
            fail_on_page: None,
        }
    }

    pub fn failing_on_page(mut self, n: usize) -> Self {
        self.fail_on_page = Some(n);
        self
    }

    pub fn created(&self) -> usize {
        self.pages_created.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.pages_closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn new_page(&self) -> AuditResult<Box<dyn RenderPage>> {
        let n = self.pages_created.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_page == Some(n) {
            return Err(AuditError::browser("new page", "target crashed"));
        }
        Ok(Box::new(FakePage {
            site: self.site.clone(),
            current: Mutex::new(None),
            closed: self.pages_closed.clone(),
        }))
    }
}
