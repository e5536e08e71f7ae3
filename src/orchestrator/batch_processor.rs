//! 批量页面审计 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：校验配置、准备输出目录、加载输入、启动浏览器
//! 2. **并发审计**：交给 `WorkerPool`
//! 3. **资源管理**：持有唯一的浏览器实例，运行结束后关闭
//! 4. **输出**：写出 CSV / JSONL / HTML 报告并打印统计
//!
//! 启动阶段的任何失败都会在 worker 开始前中止运行。

use anyhow::{Context, Result};
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::browser::ChromiumRenderer;
use crate::config::Config;
use crate::infrastructure::Renderer;
use crate::models::{load_marks, load_urls, TermDefinition};
use crate::orchestrator::worker_pool::{worker_count, RunSummary, ShutdownHandle, WorkerPool};
use crate::services::{RateLimiter, ReportWriter, ScreenshotWriter};
use crate::utils::logging::{log_inputs_loaded, log_startup, print_final_stats};
use crate::workflow::PageAudit;

/// 应用主结构
pub struct App {
    config: Config,
    urls: Vec<String>,
    terms: Vec<TermDefinition>,
    renderer: Arc<ChromiumRenderer>,
    shutdown: ShutdownHandle,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        fs::create_dir_all(&config.out_dir)
            .with_context(|| format!("无法创建输出目录: {}", config.out_dir.display()))?;

        log_startup(
            config.concurrency,
            config.rps,
            config.save_flagged_screenshots,
        );

        info!("\n📁 正在加载输入文件...");
        let urls = load_urls(&config.urls_file).await?;
        let terms = load_marks(&config.marks_file).await?;

        let renderer = ChromiumRenderer::start(
            config.browser_debug_port,
            config.chrome_executable.as_deref(),
        )
        .await
        .context("无法获取浏览器")?;

        Ok(Self {
            config,
            urls,
            terms,
            renderer: Arc::new(renderer),
            shutdown: ShutdownHandle::new(),
        })
    }

    /// 用于外部（例如 Ctrl-C）请求停止
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// 运行审计并写出报告
    pub async fn run(self) -> Result<RunSummary> {
        if self.urls.is_empty() {
            warn!("⚠️ 没有找到待审计的URL");
        }
        if self.terms.is_empty() {
            warn!("⚠️ 没有可用的商标定义，页面只会检查能否访问");
        }

        log_inputs_loaded(
            self.urls.len(),
            self.terms.len(),
            worker_count(self.config.concurrency, self.urls.len()),
        );

        let pool = WorkerPool::new(
            self.renderer.clone() as Arc<dyn Renderer>,
            Arc::new(self.build_audit()),
            self.config.concurrency,
        )
        .with_rate_limiter(RateLimiter::new(self.config.rps))
        .with_shutdown(self.shutdown.clone());

        let result = pool.run(self.urls).await;
        drop(pool);

        // 无论成功与否都关闭浏览器
        match Arc::try_unwrap(self.renderer) {
            Ok(renderer) => renderer.shutdown().await,
            Err(_) => warn!("⚠️ 浏览器仍被引用，跳过关闭"),
        }

        let summary = result.context("审计运行失败")?;

        ReportWriter::new(&self.config.out_dir)
            .write_all(&summary.findings)
            .context("写出报告失败")?;

        print_final_stats(
            summary.completed,
            summary.total,
            &summary.issue_counts(),
            summary.elapsed,
            &self.config.out_dir,
        );
        info!("\n日志已保存至: {}", self.config.log_file_path().display());

        Ok(summary)
    }

    fn build_audit(&self) -> PageAudit {
        let mut audit = PageAudit::new(self.terms.clone())
            .with_nav_timeout(Duration::from_millis(self.config.nav_timeout_ms))
            .with_wait_until(self.config.wait_until);
        if self.config.save_flagged_screenshots {
            audit = audit.with_screenshots(ScreenshotWriter::new(&self.config.out_dir));
        }
        audit
    }
}
