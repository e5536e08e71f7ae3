//! 商标定义

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};

/// 匹配策略
///
/// 目前只支持"只检查第一个显著出现位置"。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    #[default]
    FirstProminentOnly,
}

/// 单个商标的配置，整个运行期间只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermDefinition {
    /// 商标文字（非空）
    #[serde(default)]
    pub term: String,

    /// 期望紧跟在商标后的符号，例如 "®" / "™"，可以为空
    #[serde(default)]
    pub symbol: String,

    /// 变体写法（仅记录，不参与匹配）
    #[serde(default)]
    pub variants: Vec<String>,

    #[serde(default = "default_case_insensitive", alias = "caseInsensitive")]
    pub case_insensitive: bool,

    #[serde(default)]
    pub policy: MatchPolicy,

    /// 适用地区（仅记录，不参与匹配）
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
}

fn default_case_insensitive() -> bool {
    true
}

fn default_locales() -> Vec<String> {
    vec!["en-US".to_string()]
}

impl TermDefinition {
    /// 创建商标定义，term 为空时返回错误
    pub fn new(term: impl Into<String>, symbol: impl Into<String>) -> AuditResult<Self> {
        let def = Self {
            term: term.into(),
            symbol: symbol.into(),
            variants: Vec::new(),
            case_insensitive: true,
            policy: MatchPolicy::default(),
            locales: default_locales(),
        }
        .normalized();
        def.validate(0)?;
        Ok(def)
    }

    /// 区分大小写
    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    /// 去掉 term / symbol 两端空白，空的 locales 补默认值
    pub fn normalized(mut self) -> Self {
        self.term = self.term.trim().to_string();
        self.symbol = self.symbol.trim().to_string();
        if self.locales.is_empty() {
            self.locales = default_locales();
        }
        self
    }

    /// 校验定义是否可以进入审计核心
    pub fn validate(&self, index: usize) -> AuditResult<()> {
        if self.term.trim().is_empty() {
            return Err(AuditError::InvalidTerm { index });
        }
        Ok(())
    }
}
