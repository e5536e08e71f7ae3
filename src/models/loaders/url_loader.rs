use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::info;

use crate::error::AuditError;
use crate::utils::csv::parse_rows;

/// 读取待审计的 URL 列表
///
/// - `.txt`：每行一个 URL，`#` 开头为注释
/// - 其它：CSV，必须包含 `url` 列
///
/// 空白值会被跳过，保留文件中的顺序。
pub async fn load_urls(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取URL文件: {}", path.display()))?;

    let is_plain_text = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    let urls = if is_plain_text {
        parse_url_lines(&content)
    } else {
        parse_url_csv(&content).map_err(|message| AuditError::Input {
            path: path.display().to_string(),
            message,
        })?
    };

    info!("✓ 从 {} 读取到 {} 个URL", path.display(), urls.len());
    Ok(urls)
}

/// 解析带 `url` 表头的 CSV
pub fn parse_url_csv(content: &str) -> std::result::Result<Vec<String>, String> {
    let mut rows = parse_rows(content).into_iter();
    let header = rows.next().unwrap_or_default();
    let column = header
        .iter()
        .position(|h| h.trim() == "url")
        .ok_or_else(|| "CSV 必须包含 'url' 列".to_string())?;

    Ok(rows
        .filter_map(|row| row.get(column).map(|u| u.trim().to_string()))
        .filter(|u| !u.is_empty())
        .collect())
}

/// 解析纯文本 URL 列表
pub fn parse_url_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_picks_url_column() {
        let urls = parse_url_csv("rank,url\n1, https://a.example/ \n2,\n3,https://b.example/\n")
            .unwrap();
        assert_eq!(urls, vec!["https://a.example/", "https://b.example/"]);
    }

    #[test]
    fn test_csv_without_url_column() {
        assert!(parse_url_csv("link\nhttps://a.example/\n").is_err());
        assert!(parse_url_csv("").is_err());
    }

    #[test]
    fn test_plain_lines_skip_comments() {
        let urls = parse_url_lines("# top pages\nhttps://a.example/\n\n  https://b.example/  \n");
        assert_eq!(urls, vec!["https://a.example/", "https://b.example/"]);
    }
}
