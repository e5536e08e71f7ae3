//! 渲染能力抽象
//!
//! 审计核心只依赖这四种能力：导航、执行脚本、整页截图、关闭页面。
//! 真实实现见 `JsExecutor`（chromiumoxide），测试中用假页面替代。

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::AuditResult;

/// 导航完成条件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WaitUntil {
    /// `document.readyState` 至少为 `interactive`
    #[default]
    DomContentLoaded,
    /// `document.readyState` 为 `complete`
    Load,
}

impl WaitUntil {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitUntil::DomContentLoaded => "domcontentloaded",
            WaitUntil::Load => "load",
        }
    }

    /// 判断给定的 readyState 是否满足条件
    pub fn is_satisfied_by(&self, ready_state: &str) -> bool {
        match self {
            WaitUntil::DomContentLoaded => matches!(ready_state, "interactive" | "complete"),
            WaitUntil::Load => ready_state == "complete",
        }
    }
}

impl fmt::Display for WaitUntil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitUntil {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "domcontentloaded" | "dom" => Ok(WaitUntil::DomContentLoaded),
            "load" => Ok(WaitUntil::Load),
            other => Err(format!("未知的加载条件: {} (可选: load, domcontentloaded)", other)),
        }
    }
}

/// 单个页面（会话），同一时间只被一个 worker 使用
#[async_trait]
pub trait RenderPage: Send + Sync {
    /// 导航到 URL 并等待加载条件满足（超时由调用方控制）
    async fn navigate(&self, url: &str, wait_until: WaitUntil) -> AuditResult<()>;

    /// 在页面中执行脚本，返回 JSON 结果
    async fn evaluate(&self, script: &str) -> AuditResult<JsonValue>;

    /// 整页截图并保存为 PNG
    async fn screenshot(&self, path: &Path) -> AuditResult<()>;

    async fn close(&self) -> AuditResult<()>;
}

/// 渲染引擎（整个运行只启动一次），为每个 worker 创建独立页面
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn new_page(&self) -> AuditResult<Box<dyn RenderPage>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_until_parse() {
        assert_eq!("load".parse::<WaitUntil>().unwrap(), WaitUntil::Load);
        assert_eq!(
            "DOMContentLoaded".parse::<WaitUntil>().unwrap(),
            WaitUntil::DomContentLoaded
        );
        assert!("networkidle".parse::<WaitUntil>().is_err());
    }

    #[test]
    fn test_wait_until_ready_state() {
        assert!(WaitUntil::DomContentLoaded.is_satisfied_by("interactive"));
        assert!(WaitUntil::DomContentLoaded.is_satisfied_by("complete"));
        assert!(!WaitUntil::DomContentLoaded.is_satisfied_by("loading"));
        assert!(!WaitUntil::Load.is_satisfied_by("interactive"));
    }

    #[test]
    fn test_stale_or_error_document_never_ready() {
        for state in ["stale", "error", ""] {
            assert!(!WaitUntil::DomContentLoaded.is_satisfied_by(state));
            assert!(!WaitUntil::Load.is_satisfied_by(state));
        }
    }
}
