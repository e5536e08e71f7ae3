//! 审计结果记录

use serde::{Deserialize, Serialize};
use std::fmt;

/// 片段最大长度（字符）
pub const SNIPPET_MAX_CHARS: usize = 300;

/// 问题类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    NavigationError,
    EvaluationError,
    /// 符号正确，不会被输出
    Correct,
    WrongSymbol,
    MissingSymbol,
    NotFound,
}

impl Issue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Issue::NavigationError => "navigation_error",
            Issue::EvaluationError => "evaluation_error",
            Issue::Correct => "correct",
            Issue::WrongSymbol => "wrong_symbol",
            Issue::MissingSymbol => "missing_symbol",
            Issue::NotFound => "not_found",
        }
    }

    /// 页面级错误（导航 / 脚本执行）
    pub fn is_page_error(&self) -> bool {
        matches!(self, Issue::NavigationError | Issue::EvaluationError)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一条审计结果
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Finding {
    pub url: String,
    /// 页面级错误时为空
    pub term: String,
    pub issue: Issue,
    pub expected: String,
    pub found: String,
    pub path: String,
    pub snippet: String,
    pub details: String,
}

impl Finding {
    /// 页面级错误：不关联任何商标
    pub fn page_error(url: impl Into<String>, issue: Issue, details: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            term: String::new(),
            issue,
            expected: String::new(),
            found: String::new(),
            path: String::new(),
            snippet: String::new(),
            details: details.into(),
        }
    }

    pub fn not_found(
        url: impl Into<String>,
        term: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            term: term.into(),
            issue: Issue::NotFound,
            expected: expected.into(),
            found: String::new(),
            path: String::new(),
            snippet: String::new(),
            details: String::new(),
        }
    }
}

/// 去掉两端空白后截取前 300 个字符
pub fn make_snippet(text: &str) -> String {
    text.trim().chars().take(SNIPPET_MAX_CHARS).collect()
}
