//! 错误类型
//!
//! 页面级错误（导航、脚本执行）最终会被转换为 `Finding`，
//! 只有启动阶段的错误（浏览器、输入文件、配置）会中止整个运行。

use thiserror::Error;

/// 审计错误
#[derive(Debug, Error)]
pub enum AuditError {
    /// 浏览器启动 / 连接 / 创建页面失败
    #[error("浏览器错误 ({stage}): {message}")]
    Browser { stage: &'static str, message: String },

    /// 导航失败
    #[error("导航到 {url} 失败: {message}")]
    Navigation { url: String, message: String },

    /// 导航超时
    #[error("导航到 {url} 超时 ({timeout_ms} ms)")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    /// 提取脚本执行失败
    #[error("执行脚本失败: {message}")]
    Evaluation { message: String },

    /// 截图失败
    #[error("截图失败 ({path}): {message}")]
    Screenshot { path: String, message: String },

    /// 商标定义无效（term 为空）
    #[error("第 {index} 个商标定义无效: term 不能为空")]
    InvalidTerm { index: usize },

    /// 输入文件内容不合法
    #[error("输入文件 {path} 无效: {message}")]
    Input { path: String, message: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML解析失败: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<chromiumoxide::error::CdpError> for AuditError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AuditError::Evaluation {
            message: err.to_string(),
        }
    }
}

impl AuditError {
    /// 创建浏览器错误
    pub fn browser(stage: &'static str, source: impl std::fmt::Display) -> Self {
        AuditError::Browser {
            stage,
            message: source.to_string(),
        }
    }

    /// 创建导航错误
    pub fn navigation(url: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AuditError::Navigation {
            url: url.into(),
            message: source.to_string(),
        }
    }

    /// 创建脚本执行错误
    pub fn evaluation(source: impl std::fmt::Display) -> Self {
        AuditError::Evaluation {
            message: source.to_string(),
        }
    }
}

/// 审计结果类型
pub type AuditResult<T> = Result<T, AuditError>;
