//! Worker 池 - 编排层
//!
//! ## 职责
//!
//! 1. **领取页面**：为每个 worker 创建独占页面（失败视为启动失败）
//! 2. **调度**：所有 worker 从同一个 FIFO 队列取 URL，直到队列为空
//! 3. **限速**：每个 worker 在开始新 URL 前等待固定间隔
//! 4. **汇总**：结果写入共享的 `RunState`
//! 5. **停止**：收到停止请求后，worker 做完手上的 URL 就退出

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use crate::error::AuditResult;
use crate::infrastructure::{RenderPage, Renderer};
use crate::models::{Finding, Issue};
use crate::orchestrator::run_state::RunState;
use crate::services::RateLimiter;
use crate::utils::logging::log_progress;
use crate::workflow::{PageAudit, PageCtx};

/// 停止请求句柄，可在任意任务中克隆使用
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandle(Arc<AtomicBool>);

impl ShutdownHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 一次运行的汇总
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub completed: usize,
    pub workers: usize,
    /// 到达顺序；不同 worker 之间的顺序不保证
    pub findings: Vec<Finding>,
    pub elapsed: Duration,
}

impl RunSummary {
    /// 因停止请求而未处理的 URL 数
    pub fn skipped(&self) -> usize {
        self.total - self.completed
    }

    pub fn issue_counts(&self) -> BTreeMap<Issue, usize> {
        let mut counts = BTreeMap::new();
        for f in &self.findings {
            *counts.entry(f.issue).or_insert(0) += 1;
        }
        counts
    }
}

/// worker 数：至少1个，且不超过 URL 数
pub fn worker_count(concurrency: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        concurrency.clamp(1, total)
    }
}

/// Worker 池
pub struct WorkerPool {
    renderer: Arc<dyn Renderer>,
    audit: Arc<PageAudit>,
    concurrency: usize,
    rate_limiter: RateLimiter,
    shutdown: ShutdownHandle,
}

impl WorkerPool {
    pub fn new(renderer: Arc<dyn Renderer>, audit: Arc<PageAudit>, concurrency: usize) -> Self {
        Self {
            renderer,
            audit,
            concurrency,
            rate_limiter: RateLimiter::disabled(),
            shutdown: ShutdownHandle::new(),
        }
    }

    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn with_shutdown(mut self, shutdown: ShutdownHandle) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// 处理全部 URL，每个 URL 恰好处理一次
    ///
    /// 只有创建页面失败会返回错误（此时没有任何 worker 开始工作）。
    pub async fn run(&self, urls: Vec<String>) -> AuditResult<RunSummary> {
        let started = Instant::now();
        let state = Arc::new(RunState::new(urls));
        let total = state.total();
        let workers = worker_count(self.concurrency, total);

        let pages = self.open_pages(workers).await?;
        info!("✓ 已创建 {} 个页面，开始处理 {} 个URL", pages.len(), total);

        let handles: Vec<_> = pages
            .into_iter()
            .enumerate()
            .map(|(idx, page)| {
                let worker_id = idx + 1;
                let worker = Worker {
                    id: worker_id,
                    page,
                    state: state.clone(),
                    audit: self.audit.clone(),
                    rate_limiter: self.rate_limiter,
                    shutdown: self.shutdown.clone(),
                };
                (worker_id, tokio::spawn(worker.run()))
            })
            .collect();

        // 等待所有 worker 结束
        for (worker_id, handle) in handles {
            if let Err(e) = handle.await {
                error!("[worker {}] 任务执行失败: {}", worker_id, e);
            }
        }

        if self.shutdown.is_requested() {
            warn!("⏹️ 已停止，剩余 {} 个URL未处理", state.remaining().await);
        }

        Ok(RunSummary {
            total,
            completed: state.completed(),
            workers,
            findings: state.take_findings().await,
            elapsed: started.elapsed(),
        })
    }

    async fn open_pages(&self, workers: usize) -> AuditResult<Vec<Box<dyn RenderPage>>> {
        let mut pages: Vec<Box<dyn RenderPage>> = Vec::with_capacity(workers);
        for _ in 0..workers {
            match self.renderer.new_page().await {
                Ok(page) => pages.push(page),
                Err(e) => {
                    error!("❌ 创建页面失败: {}", e);
                    for page in pages {
                        let _ = page.close().await;
                    }
                    return Err(e);
                }
            }
        }
        Ok(pages)
    }
}

/// 单个 worker：独占一个页面，顺序处理领取到的 URL
struct Worker {
    id: usize,
    page: Box<dyn RenderPage>,
    state: Arc<RunState>,
    audit: Arc<PageAudit>,
    rate_limiter: RateLimiter,
    shutdown: ShutdownHandle,
}

impl Worker {
    async fn run(self) {
        let total = self.state.total();
        let mut processed = 0usize;

        loop {
            if self.shutdown.is_requested() || self.state.remaining().await == 0 {
                break;
            }

            self.rate_limiter.acquire().await;
            if self.shutdown.is_requested() {
                break;
            }

            let Some((sequence, url)) = self.state.next_url().await else {
                break;
            };

            let ctx = PageCtx::new(url, self.id, sequence, total);
            let findings = self.audit.run(self.page.as_ref(), &ctx).await;
            let completed = self.state.record(findings).await;
            processed += 1;
            log_progress(completed, total);
        }

        info!("[worker {}] 结束，共处理 {} 个URL", self.id, processed);

        if let Err(e) = self.page.close().await {
            warn!("[worker {}] ⚠️ 关闭页面失败: {}", self.id, e);
        }
    }
}
