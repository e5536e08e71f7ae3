use std::fs;

use tm_audit::models::{load_marks, load_urls};
use tm_audit::services::ReportWriter;
use tm_audit::{Finding, Issue};

#[test]
fn test_load_urls_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.csv");
    fs::write(
        &path,
        "\u{feff}id,url,note\r\n1,https://acme.test/a,\"home, main\"\r\n2,,empty\r\n3, https://acme.test/b ,x\r\n",
    )
    .unwrap();

    let urls = tokio_test::block_on(load_urls(&path)).unwrap();
    assert_eq!(urls, vec!["https://acme.test/a", "https://acme.test/b"]);
}

#[test]
fn test_load_urls_csv_without_url_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.csv");
    fs::write(&path, "link\nhttps://acme.test/a\n").unwrap();

    let err = tokio_test::block_on(load_urls(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("url"));
}

#[test]
fn test_load_urls_from_txt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("urls.txt");
    fs::write(&path, "# product pages\nhttps://acme.test/a\n\n  https://acme.test/b  \n").unwrap();

    let urls = tokio_test::block_on(load_urls(&path)).unwrap();
    assert_eq!(urls, vec!["https://acme.test/a", "https://acme.test/b"]);
}

#[test]
fn test_load_marks_json_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marks.json");
    fs::write(
        &path,
        r#"{"marks":[{"term":"Acme","symbol":"®"},{"term":"Blendtec","symbol":"™","caseInsensitive":false},{"term":"  "}]}"#,
    )
    .unwrap();

    let marks = tokio_test::block_on(load_marks(&path)).unwrap();
    assert_eq!(marks.len(), 2);
    assert!(marks[0].case_insensitive);
    assert!(!marks[1].case_insensitive);
    assert_eq!(marks[0].locales, vec!["en-US".to_string()]);
}

#[test]
fn test_load_marks_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marks.toml");
    fs::write(
        &path,
        "[[marks]]\nterm = \"Acme\"\nsymbol = \"®\"\nvariants = [\"ACME\"]\n",
    )
    .unwrap();

    let marks = tokio_test::block_on(load_marks(&path)).unwrap();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].term, "Acme");
    assert_eq!(marks[0].variants, vec!["ACME".to_string()]);
}

#[test]
fn test_missing_marks_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = tokio_test::block_on(load_marks(&dir.path().join("nope.json")));
    assert!(result.is_err());
}

#[test]
fn test_reports_written_to_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    let findings = vec![
        Finding::page_error("https://acme.test/down", Issue::NavigationError, "refused"),
        Finding::not_found("https://acme.test/a", "Acme", "®"),
    ];

    let paths = ReportWriter::new(dir.path()).write_all(&findings).unwrap();

    let csv = fs::read_to_string(&paths.csv).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("url,term,issue,expected,found,path,snippet,details"));

    let jsonl = fs::read_to_string(&paths.jsonl).unwrap();
    let first: serde_json::Value = serde_json::from_str(jsonl.lines().next().unwrap()).unwrap();
    assert_eq!(first["issue"], "navigation_error");

    let html = fs::read_to_string(&paths.html).unwrap();
    assert!(html.contains("not_found"));
}
