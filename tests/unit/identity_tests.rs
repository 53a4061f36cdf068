//! Unit tests for identifier derivation and the MIME table.

use embed_mcp::catalog::identity::{
    base_name, derive_prompt, derive_resource, extension, locator_uri, title_case,
};
use embed_mcp::catalog::MimeType;

#[test]
fn prompt_name_strips_md_suffix() {
    let prompt = derive_prompt("prompts/greeting.md").expect("md file is a prompt");
    assert_eq!(prompt.name, "greeting");
    assert_eq!(prompt.description, "Greeting prompt template");
}

#[test]
fn prompt_suffix_check_is_case_sensitive() {
    assert!(derive_prompt("prompts/GREETING.MD").is_none());
    assert!(derive_prompt("prompts/notes.txt").is_none());
    assert!(derive_prompt("prompts/README").is_none());
}

#[test]
fn nested_prompt_uses_base_name() {
    let prompt = derive_prompt("prompts/team/standup.md").expect("nested md file");
    assert_eq!(prompt.name, "standup");
}

#[test]
fn resource_identity_for_nested_csv() {
    let resource = derive_resource("data/report.csv");
    assert_eq!(resource.name, "report");
    assert_eq!(resource.extension, ".csv");
    assert_eq!(resource.mime_type, MimeType::Csv);
    assert_eq!(resource.uri, "embedded://data/report.csv");
    assert_eq!(resource.description, "Report resource");
}

#[test]
fn resource_without_extension_is_plain_text() {
    let resource = derive_resource("LICENSE");
    assert_eq!(resource.name, "LICENSE");
    assert_eq!(resource.extension, "");
    assert_eq!(resource.mime_type, MimeType::PlainText);
}

#[test]
fn resource_strips_only_last_extension() {
    let resource = derive_resource("archive.tar.gz");
    assert_eq!(resource.name, "archive.tar");
    assert_eq!(resource.extension, ".gz");
    assert_eq!(resource.mime_type, MimeType::PlainText);
}

#[test]
fn dotfile_has_empty_name() {
    let resource = derive_resource("config/.env");
    assert_eq!(resource.name, "");
    assert_eq!(resource.extension, ".env");
}

#[test]
fn mime_table_covers_every_extension() {
    let cases = [
        (".md", "text/markdown"),
        (".txt", "text/plain"),
        (".json", "application/json"),
        (".yaml", "application/x-yaml"),
        (".yml", "application/x-yaml"),
        (".html", "text/html"),
        (".css", "text/css"),
        (".js", "application/javascript"),
        (".xml", "application/xml"),
        (".csv", "text/csv"),
        (".png", "text/plain"),
        ("", "text/plain"),
    ];
    for (ext, expected) in cases {
        assert_eq!(MimeType::from_extension(ext).as_str(), expected, "extension {ext:?}");
    }
}

#[test]
fn mime_lookup_ignores_case() {
    assert_eq!(MimeType::from_extension(".JSON"), MimeType::Json);
    assert_eq!(MimeType::from_extension(".Yml"), MimeType::Yaml);
}

#[test]
fn mime_for_path_uses_base_name() {
    assert_eq!(MimeType::for_path("resources/v1.2/notes"), MimeType::PlainText);
    assert_eq!(MimeType::for_path("resources/site/index.html"), MimeType::Html);
}

#[test]
fn mime_serializes_as_string() {
    let json = serde_json::to_string(&MimeType::Yaml).expect("serialize");
    assert_eq!(json, "\"application/x-yaml\"");
}

#[test]
fn title_case_follows_word_boundaries() {
    assert_eq!(title_case("greeting"), "Greeting");
    assert_eq!(title_case("code_review"), "Code_review");
    assert_eq!(title_case("style-guide"), "Style-Guide");
    assert_eq!(title_case("release notes v2"), "Release Notes V2");
    assert_eq!(title_case("archive.tar"), "Archive.Tar");
    assert_eq!(title_case(""), "");
}

#[test]
fn title_case_breaks_only_on_ascii_punctuation_and_whitespace() {
    assert_eq!(title_case("don\u{2019}t panic"), "Don\u{2019}t Panic");
    assert_eq!(title_case("caf\u{e9}-menu"), "Caf\u{e9}-Menu");
    assert_eq!(title_case("notes\u{3000}draft"), "Notes\u{3000}Draft");
}

#[test]
fn title_case_keeps_letters_without_single_upper_form() {
    assert_eq!(title_case("\u{df}trasse"), "\u{df}trasse");
    assert_eq!(title_case("\u{e9}t\u{e9}"), "\u{c9}t\u{e9}");
}

#[test]
fn path_helpers() {
    assert_eq!(base_name("a/b/c.txt"), "c.txt");
    assert_eq!(base_name("c.txt"), "c.txt");
    assert_eq!(extension("c.txt"), ".txt");
    assert_eq!(extension("Makefile"), "");
    assert_eq!(locator_uri("style.css"), "embedded://style.css");
}
