//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor::App (输入 / 浏览器 / 报告)
//!     ↓
//! worker_pool (N 个 worker 共享一个 URL 队列)
//!     ↓
//! workflow::PageAudit (处理单个 URL)
//!     ↓
//! services (能力层：提取 / 匹配 / 截图)
//!     ↓
//! infrastructure (基础设施：RenderPage)
//! ```
//!
//! 只有编排层持有浏览器和共享运行状态。

pub mod batch_processor;
pub mod run_state;
pub mod worker_pool;

pub use batch_processor::App;
pub use run_state::RunState;
pub use worker_pool::{worker_count, RunSummary, ShutdownHandle, WorkerPool};
