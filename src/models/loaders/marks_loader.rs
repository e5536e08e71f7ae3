use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

use crate::error::AuditResult;
use crate::models::term::TermDefinition;

/// 商标定义文件
///
/// ```json
/// { "marks": [ { "term": "Vitamix", "symbol": "®" } ] }
/// ```
///
/// 也支持同结构的 TOML（`[[marks]]`）。
#[derive(Debug, Default, Deserialize)]
pub struct MarksFile {
    #[serde(default)]
    pub marks: Vec<TermDefinition>,
}

/// 读取商标定义，按扩展名选择 JSON / TOML
pub async fn load_marks(path: &Path) -> Result<Vec<TermDefinition>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取商标文件: {}", path.display()))?;

    let is_toml = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let file = if is_toml {
        parse_marks_toml(&content)
    } else {
        parse_marks_json(&content)
    }
    .with_context(|| format!("无法解析商标文件: {}", path.display()))?;

    let marks = normalize_marks(file.marks);
    info!("✓ 从 {} 读取到 {} 个商标定义", path.display(), marks.len());
    Ok(marks)
}

pub fn parse_marks_json(content: &str) -> AuditResult<MarksFile> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_marks_toml(content: &str) -> AuditResult<MarksFile> {
    Ok(toml::from_str(content)?)
}

/// 规范化并丢弃 term 为空的定义
pub fn normalize_marks(raw: Vec<TermDefinition>) -> Vec<TermDefinition> {
    raw.into_iter()
        .map(TermDefinition::normalized)
        .enumerate()
        .filter_map(|(index, def)| match def.validate(index) {
            Ok(()) => Some(def),
            Err(e) => {
                warn!("⚠️ 跳过商标定义: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_marks_drop_empty_terms() {
        let file = parse_marks_json(
            r#"{"marks":[{"term":" Vitamix ","symbol":"®"},{"term":""},{"symbol":"™"}]}"#,
        )
        .unwrap();
        let marks = normalize_marks(file.marks);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].term, "Vitamix");
        assert_eq!(marks[0].symbol, "®");
    }

    #[test]
    fn test_json_without_marks_key() {
        let file = parse_marks_json("{}").unwrap();
        assert!(file.marks.is_empty());
    }

    #[test]
    fn test_toml_marks() {
        let file = parse_marks_toml(
            r#"
[[marks]]
term = "Ascent"
symbol = "™"
case_insensitive = false
locales = []
"#,
        )
        .unwrap();
        let marks = normalize_marks(file.marks);
        assert_eq!(marks.len(), 1);
        assert!(!marks[0].case_insensitive);
        assert_eq!(marks[0].locales, vec!["en-US".to_string()]);
    }
}
