pub mod page_audit;
pub mod page_ctx;

pub use page_audit::PageAudit;
pub use page_ctx::PageCtx;
