//! # TM Audit
//!
//! 批量检查网页中商标符号（®、™）用法的工具
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动或连接浏览器，为每个 worker 创建页面
//! - `infrastructure/` - `RenderPage` / `Renderer` 抽象，`JsExecutor` 为 chromiumoxide 实现
//!
//! ### ② 业务能力层（Services）
//! - `ProminentTextExtractor` - 按优先级提取显著文本
//! - `SymbolMatcher` - 第一个出现位置的符号判断
//! - `RateLimiter` / `ScreenshotWriter` / `ReportWriter`
//!
//! ### ③ 流程层（Workflow）
//! - `PageAudit` - 单个 URL 的完整流程（导航 → 提取 → 匹配 → 截图）
//!
//! ### ④ 编排层（Orchestration）
//! - `WorkerPool` - 固定数量 worker 共享 FIFO 队列
//! - `App` - 输入、浏览器生命周期、报告

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AuditError, AuditResult};
pub use infrastructure::{JsExecutor, RenderPage, Renderer, WaitUntil};
pub use models::{Finding, Issue, TermDefinition, TextCandidate};
pub use orchestrator::{App, RunSummary, ShutdownHandle, WorkerPool};
pub use workflow::{PageAudit, PageCtx};
