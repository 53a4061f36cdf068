//! Identifier derivation: names, MIME types, locators and descriptions
//! computed from a store path alone.

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Store directory holding prompt templates.
pub const PROMPT_ROOT: &str = "prompts";

/// Store directory holding resources.
pub const RESOURCE_ROOT: &str = "resources";

/// Suffix a file must carry to become a prompt.
pub const PROMPT_SUFFIX: &str = ".md";

/// Scheme of resource locators.
pub const LOCATOR_SCHEME: &str = "embedded";

/// MIME type of a resource, derived from its file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum MimeType {
    /// `.md`
    #[serde(rename = "text/markdown")]
    Markdown,
    /// `.txt` and every unrecognized or missing extension.
    #[serde(rename = "text/plain")]
    PlainText,
    /// `.json`
    #[serde(rename = "application/json")]
    Json,
    /// `.yaml`, `.yml`
    #[serde(rename = "application/x-yaml")]
    Yaml,
    /// `.html`
    #[serde(rename = "text/html")]
    Html,
    /// `.css`
    #[serde(rename = "text/css")]
    Css,
    /// `.js`
    #[serde(rename = "application/javascript")]
    JavaScript,
    /// `.xml`
    #[serde(rename = "application/xml")]
    Xml,
    /// `.csv`
    #[serde(rename = "text/csv")]
    Csv,
}

impl MimeType {
    /// Map an extension (with its leading dot) to a MIME type, ignoring case.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            ".md" => Self::Markdown,
            ".json" => Self::Json,
            ".yaml" | ".yml" => Self::Yaml,
            ".html" => Self::Html,
            ".css" => Self::Css,
            ".js" => Self::JavaScript,
            ".xml" => Self::Xml,
            ".csv" => Self::Csv,
            _ => Self::PlainText,
        }
    }

    /// MIME type of the file at `path`.
    #[must_use]
    pub fn for_path(path: &str) -> Self {
        Self::from_extension(extension(base_name(path)))
    }

    /// Canonical string form, e.g. `text/markdown`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown",
            Self::PlainText => "text/plain",
            Self::Json => "application/json",
            Self::Yaml => "application/x-yaml",
            Self::Html => "text/html",
            Self::Css => "text/css",
            Self::JavaScript => "application/javascript",
            Self::Xml => "application/xml",
            Self::Csv => "text/csv",
        }
    }
}

impl Display for MimeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a prompt template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptIdentity {
    /// Filename without `.md`; both filter key and lookup key.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}

/// Identity of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    /// Filename without its extension; the filter key.
    pub name: String,
    /// Original extension including the dot, possibly empty.
    pub extension: String,
    /// MIME type derived from the extension.
    pub mime_type: MimeType,
    /// `embedded://` locator for the resource.
    pub uri: String,
    /// Human-readable description.
    pub description: String,
}

/// Derive the identity of the prompt at `path`.
///
/// Returns `None` unless the filename ends in `.md` (case-sensitive).
#[must_use]
pub fn derive_prompt(path: &str) -> Option<PromptIdentity> {
    let name = base_name(path).strip_suffix(PROMPT_SUFFIX)?;
    Some(PromptIdentity {
        name: name.to_owned(),
        description: format!("{} prompt template", title_case(name)),
    })
}

/// Derive the identity of the resource at `relative_path`, a path relative to
/// the resource root.
#[must_use]
pub fn derive_resource(relative_path: &str) -> ResourceIdentity {
    let file_name = base_name(relative_path);
    let extension = extension(file_name);
    let name = &file_name[..file_name.len() - extension.len()];

    ResourceIdentity {
        name: name.to_owned(),
        extension: extension.to_owned(),
        mime_type: MimeType::from_extension(extension),
        uri: locator_uri(relative_path),
        description: format!("{} resource", title_case(name)),
    }
}

/// `embedded://` locator for a path relative to the resource root.
#[must_use]
pub fn locator_uri(relative_path: &str) -> String {
    format!("{LOCATOR_SCHEME}://{relative_path}")
}

/// Final segment of a slash-separated path.
#[must_use]
pub fn base_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

/// Extension of a filename: everything from its last `.`, or empty.
#[must_use]
pub fn extension(file_name: &str) -> &str {
    file_name.rfind('.').map_or("", |dot| &file_name[dot..])
}

/// Upper-case the first letter of every word.
///
/// A word starts at the beginning of the string and after an ASCII character
/// other than a letter, digit or underscore, or after Unicode whitespace:
/// `code_review` becomes `Code_review`, `style-guide` becomes `Style-Guide`
/// and `don’t` stays one word. Letters without a single-character upper-case
/// form, such as `ß`, are kept as they are.
#[must_use]
pub fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        titled.push(if at_word_start { title_char(ch) } else { ch });
        at_word_start = is_word_separator(ch);
    }
    titled
}

fn is_word_separator(ch: char) -> bool {
    if ch.is_ascii() {
        !(ch.is_ascii_alphanumeric() || ch == '_')
    } else {
        ch.is_whitespace()
    }
}

fn title_char(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}
