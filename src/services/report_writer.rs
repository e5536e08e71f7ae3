//! 报告写入服务 - 业务能力层
//!
//! 把 Finding 列表写成 findings.csv / findings.jsonl / report.html

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::AuditResult;
use crate::models::{Finding, Issue};
use crate::utils::csv::write_row;

pub const CSV_FILE: &str = "findings.csv";
pub const JSONL_FILE: &str = "findings.jsonl";
pub const HTML_FILE: &str = "report.html";

pub const CSV_HEADER: [&str; 8] = [
    "url", "term", "issue", "expected", "found", "path", "snippet", "details",
];

/// HTML 报告中路径列的最大长度
const HTML_PATH_MAX_CHARS: usize = 140;

/// 写出的报告文件
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub jsonl: PathBuf,
    pub html: PathBuf,
}

/// 报告写入服务
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// 写出全部三种报告
    pub fn write_all(&self, findings: &[Finding]) -> AuditResult<ReportPaths> {
        fs::create_dir_all(&self.out_dir)?;

        let paths = ReportPaths {
            csv: self.out_dir.join(CSV_FILE),
            jsonl: self.out_dir.join(JSONL_FILE),
            html: self.out_dir.join(HTML_FILE),
        };

        fs::write(&paths.csv, render_csv(findings)?)?;
        fs::write(&paths.jsonl, render_jsonl(findings)?)?;
        fs::write(&paths.html, render_html(findings))?;

        info!("📝 报告已写入: {}", self.out_dir.display());
        Ok(paths)
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

fn finding_row(f: &Finding) -> [&str; 8] {
    [
        &f.url,
        &f.term,
        f.issue.as_str(),
        &f.expected,
        &f.found,
        &f.path,
        &f.snippet,
        &f.details,
    ]
}

pub fn render_csv(findings: &[Finding]) -> AuditResult<String> {
    let mut buf: Vec<u8> = Vec::new();
    write_row(&mut buf, &CSV_HEADER)?;
    for f in findings {
        write_row(&mut buf, &finding_row(f))?;
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn render_jsonl(findings: &[Finding]) -> AuditResult<String> {
    let mut out = String::new();
    for f in findings {
        out.push_str(&serde_json::to_string(f)?);
        out.push('\n');
    }
    Ok(out)
}

fn row_class(issue: Issue) -> &'static str {
    match issue {
        Issue::MissingSymbol => "issue-missing",
        Issue::WrongSymbol => "issue-wrong",
        Issue::NotFound => "issue-notfound",
        Issue::NavigationError | Issue::EvaluationError => "issue-error",
        Issue::Correct => "",
    }
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

const HTML_HEAD: &str = r#"<!doctype html>
<html><head><meta charset="utf-8">
<title>Trademark Audit Report</title>
<style>
body{font-family:system-ui,Segoe UI,Roboto,Helvetica,Arial,sans-serif;margin:24px}
.tbl{width:100%;border-collapse:collapse;margin-top:16px}
.tbl th,.tbl td{border-bottom:1px solid #eee;padding:8px;text-align:left;vertical-align:top}
.url a{word-break:break-all}
.snip{white-space:pre-wrap}
.issue-missing{background:#ffe5e5}
.issue-wrong{background:#fff3cd}
.issue-notfound{background:#eef7ff}
.issue-error{background:#f2f2f2}
</style></head><body>
<h1>Trademark Audit Report</h1>
<p>Only text marks are audited; logos/design marks are ignored. Screenshots are saved only for flagged pages.</p>
<table class="tbl">
<thead><tr>
  <th>URL</th><th>Term</th><th>Issue</th><th>Expected</th><th>Found</th><th>Path</th><th>Snippet</th>
</tr></thead><tbody>
"#;

const HTML_TAIL: &str = "\n</tbody></table>\n</body></html>\n";

pub fn render_html(findings: &[Finding]) -> String {
    let rows: Vec<String> = findings
        .iter()
        .map(|f| {
            let url = escape_html(&f.url);
            let path: String = f.path.chars().take(HTML_PATH_MAX_CHARS).collect();
            format!(
                "<tr class=\"{}\"><td class=\"url\"><a href=\"{url}\" target=\"_blank\">{url}</a></td>\
                 <td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><code>{}</code></td><td class=\"snip\">{}</td></tr>",
                row_class(f.issue),
                escape_html(&f.term),
                f.issue.as_str(),
                escape_html(&f.expected),
                escape_html(&f.found),
                escape_html(&path),
                escape_html(&f.snippet),
            )
        })
        .collect();

    format!("{}{}{}", HTML_HEAD, rows.join("\n"), HTML_TAIL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Finding> {
        vec![
            Finding {
                url: "https://a.example/".to_string(),
                term: "Acme".to_string(),
                issue: Issue::WrongSymbol,
                expected: "®".to_string(),
                found: "™".to_string(),
                path: "html > body > h1".to_string(),
                snippet: "Acme™ <blenders>, \"new\"".to_string(),
                details: String::new(),
            },
            Finding::page_error("https://b.example/", Issue::NavigationError, "timeout"),
        ]
    }

    #[test]
    fn test_render_csv() {
        let csv = render_csv(&sample()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "url,term,issue,expected,found,path,snippet,details"
        );
        assert_eq!(
            lines.next().unwrap(),
            "https://a.example/,Acme,wrong_symbol,®,™,html > body > h1,\"Acme™ <blenders>, \"\"new\"\"\","
        );
        assert_eq!(
            lines.next().unwrap(),
            "https://b.example/,,navigation_error,,,,,timeout"
        );
    }

    #[test]
    fn test_render_jsonl_keeps_unicode() {
        let jsonl = render_jsonl(&sample()).unwrap();
        let lines: Vec<&str> = jsonl.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"found\":\"™\""));
        assert!(lines[0].contains("\"issue\":\"wrong_symbol\""));
        let back: Finding = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(back.issue, Issue::NavigationError);
    }

    #[test]
    fn test_render_html_escapes() {
        let html = render_html(&sample());
        assert!(html.contains("class=\"issue-wrong\""));
        assert!(html.contains("Acme™ &lt;blenders&gt;, &quot;new&quot;"));
        assert!(!html.contains("<blenders>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn test_write_all_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("out"));
        let paths = writer.write_all(&sample()).unwrap();
        assert!(paths.csv.exists());
        assert!(paths.jsonl.exists());
        assert!(paths.html.exists());
    }
}
