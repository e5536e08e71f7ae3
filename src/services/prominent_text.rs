//! 显著文本提取服务 - 业务能力层
//!
//! 在页面中按优先级收集候选节点：
//! 1. `h1` → `h2` → `h3`（每组按文档顺序）
//! 2. hero / 标题类选择器（每组按文档顺序）
//! 3. 第一个可见的 `p` / `li`（只取一个）
//!
//! 只收集可见节点（宽高非零，且没有 `display:none` / `visibility:hidden`）。
//! 搜索根节点为 `main`，不存在时退回 `document.body`。

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::{AuditError, AuditResult};
use crate::infrastructure::RenderPage;
use crate::models::TextCandidate;

pub const HEADING_SELECTORS: &[&str] = &["h1", "h2", "h3"];

pub const HERO_SELECTORS: &[&str] = &[
    ".hero",
    ".product-title",
    ".page-intro",
    ".pdp-title",
    ".tile-title",
];

pub const BODY_TEXT_SELECTOR: &str = "p, li";

/// 显著文本提取器
#[derive(Debug, Clone)]
pub struct ProminentTextExtractor {
    headings: Vec<String>,
    hero_selectors: Vec<String>,
    body_selector: String,
}

impl Default for ProminentTextExtractor {
    fn default() -> Self {
        Self {
            headings: HEADING_SELECTORS.iter().map(|s| s.to_string()).collect(),
            hero_selectors: HERO_SELECTORS.iter().map(|s| s.to_string()).collect(),
            body_selector: BODY_TEXT_SELECTOR.to_string(),
        }
    }
}

impl ProminentTextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换 hero / 标题类选择器
    pub fn with_hero_selectors<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hero_selectors = selectors.into_iter().map(Into::into).collect();
        self
    }

    /// 在页面上执行提取脚本
    ///
    /// 脚本抛出异常或返回结构不符时，统一作为脚本执行错误返回。
    pub async fn extract(&self, page: &dyn RenderPage) -> AuditResult<Vec<TextCandidate>> {
        let script = self.script()?;
        let value = page.evaluate(&script).await?;
        let candidates = parse_candidates(value)?;
        debug!("提取到 {} 个候选节点", candidates.len());
        Ok(candidates)
    }

    /// 构建提取脚本（立即执行的函数表达式）
    pub fn script(&self) -> AuditResult<String> {
        let groups: Vec<&Vec<String>> = vec![&self.headings, &self.hero_selectors];
        let groups = serde_json::to_string(&groups)?;
        let body_selector = serde_json::to_string(&self.body_selector)?;

        Ok(format!(
            r#"
        (() => {{
            const isVisible = (el) => {{
                const style = window.getComputedStyle(el);
                if (style.visibility === 'hidden' || style.display === 'none') return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0;
            }};
            const root = document.querySelector('main') || document.body;
            if (!root) return [];

            const candidates = [];
            for (const group of {groups}) {{
                for (const selector of group) {{
                    root.querySelectorAll(selector).forEach(el => {{
                        if (isVisible(el)) candidates.push(el);
                    }});
                }}
            }}

            for (const el of root.querySelectorAll({body_selector})) {{
                if (isVisible(el)) {{ candidates.push(el); break; }}
            }}

            const buildPath = (el) => {{
                const parts = [];
                let node = el;
                while (node && node.nodeType === Node.ELEMENT_NODE) {{
                    let part = node.tagName.toLowerCase();
                    if (node.id) part += '#' + node.id;
                    if (node.classList && node.classList.length) {{
                        part += '.' + Array.from(node.classList).join('.');
                    }}
                    parts.unshift(part);
                    node = node.parentElement;
                }}
                return parts.join(' > ');
            }};

            return candidates.map(el => ({{
                text: el.textContent || '',
                path: buildPath(el)
            }}));
        }})()
        "#
        ))
    }
}

/// 把脚本返回值解析为候选列表；`null` 视为空列表
pub fn parse_candidates(value: JsonValue) -> AuditResult<Vec<TextCandidate>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
        .map_err(|e| AuditError::evaluation(format!("提取结果格式不正确: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_embeds_selector_groups_in_priority_order() {
        let script = ProminentTextExtractor::new().script().unwrap();
        let groups = r#"[["h1","h2","h3"],[".hero",".product-title",".page-intro",".pdp-title",".tile-title"]]"#;
        assert!(script.contains(groups));
        assert!(script.contains(r#"querySelectorAll("p, li")"#));
        assert!(script.contains("document.querySelector('main') || document.body"));
    }

    #[test]
    fn test_custom_hero_selectors() {
        let script = ProminentTextExtractor::new()
            .with_hero_selectors([".banner"])
            .script()
            .unwrap();
        assert!(script.contains(r#"[["h1","h2","h3"],[".banner"]]"#));
        assert!(!script.contains(".pdp-title"));
    }

    #[test]
    fn test_parse_candidates_keeps_order() {
        let value = json!([
            {"text": "Acme® blenders", "path": "html > body > main > h1"},
            {"text": null, "path": "html > body > main > p"}
        ]);
        let candidates = parse_candidates(value).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].text, "Acme® blenders");
        assert_eq!(candidates[1].text, "");
    }

    #[test]
    fn test_parse_candidates_null_is_empty() {
        assert!(parse_candidates(JsonValue::Null).unwrap().is_empty());
    }

    #[test]
    fn test_parse_candidates_bad_shape_is_evaluation_error() {
        let err = parse_candidates(json!({"oops": true})).unwrap_err();
        assert!(matches!(err, AuditError::Evaluation { .. }));
    }
}
