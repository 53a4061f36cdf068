//! Unit tests for `embedded://` locator parsing and normalization.

use embed_mcp::catalog::resources::{normalize_locator, parse_locator};
use embed_mcp::AppError;

#[test]
fn parses_nested_locator() {
    let locator = parse_locator("embedded://data/report.csv").expect("valid locator");
    assert_eq!(locator, "data/report.csv");
}

#[test]
fn scheme_is_case_insensitive() {
    let relative = normalize_locator("EMBEDDED://style-guide.md").expect("valid locator");
    assert_eq!(relative, "style-guide.md");
}

#[test]
fn leading_separators_are_stripped() {
    let relative = normalize_locator("embedded:///data/report.csv").expect("valid locator");
    assert_eq!(relative, "data/report.csv");
}

#[test]
fn dot_segments_and_duplicate_separators_collapse() {
    let relative = normalize_locator("embedded://data//./x/../report.csv").expect("valid");
    assert_eq!(relative, "data/report.csv");
}

#[test]
fn traversal_stays_under_root() {
    let relative = normalize_locator("embedded://../../etc/passwd").expect("valid locator");
    assert_eq!(relative, "etc/passwd");
}

#[test]
fn query_and_fragment_are_ignored() {
    let relative = normalize_locator("embedded://notes.txt?rev=2#top").expect("valid");
    assert_eq!(relative, "notes.txt");
}

#[test]
fn percent_escapes_are_decoded() {
    let relative = normalize_locator("embedded://my%20notes.txt").expect("valid");
    assert_eq!(relative, "my notes.txt");
}

#[test]
fn http_scheme_is_unsupported() {
    match parse_locator("http://example.com/report.csv") {
        Err(AppError::UnsupportedScheme(msg)) => assert_eq!(msg, "unsupported scheme: http"),
        other => panic!("expected unsupported scheme, got {other:?}"),
    }
}

#[test]
fn file_scheme_is_unsupported() {
    assert!(matches!(
        parse_locator("file:///etc/passwd"),
        Err(AppError::UnsupportedScheme(_))
    ));
}

#[test]
fn missing_scheme_is_invalid() {
    match parse_locator("data/report.csv") {
        Err(AppError::InvalidRequest(msg)) => assert!(msg.starts_with("invalid URI: ")),
        other => panic!("expected invalid request, got {other:?}"),
    }
}

#[test]
fn malformed_scheme_is_invalid() {
    assert!(matches!(
        parse_locator("://report.csv"),
        Err(AppError::InvalidRequest(_))
    ));
    assert!(matches!(
        parse_locator("1x://report.csv"),
        Err(AppError::InvalidRequest(_))
    ));
}

#[test]
fn opaque_form_is_invalid() {
    assert!(matches!(
        parse_locator("embedded:report.csv"),
        Err(AppError::InvalidRequest(_))
    ));
}

#[test]
fn bad_percent_escape_is_invalid() {
    assert!(matches!(
        parse_locator("embedded://bad%zzname"),
        Err(AppError::InvalidRequest(_))
    ));
}
