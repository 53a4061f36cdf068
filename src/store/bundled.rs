//! Content tree compiled into the binary from `content/`.

use super::MemoryStore;

/// Every bundled file, keyed by its store path.
///
/// Must list every file under `content/`; an integration test compares the
/// two trees.
const BUNDLED_FILES: &[(&str, &[u8])] = &[
    (
        "prompts/code_review.md",
        include_bytes!("../../content/prompts/code_review.md"),
    ),
    (
        "prompts/commit_message.md",
        include_bytes!("../../content/prompts/commit_message.md"),
    ),
    (
        "prompts/explain_code.md",
        include_bytes!("../../content/prompts/explain_code.md"),
    ),
    (
        "resources/data/languages.json",
        include_bytes!("../../content/resources/data/languages.json"),
    ),
    (
        "resources/data/release-checklist.yaml",
        include_bytes!("../../content/resources/data/release-checklist.yaml"),
    ),
    (
        "resources/style-guide.md",
        include_bytes!("../../content/resources/style-guide.md"),
    ),
];

/// Store over the content bundled with this build.
#[must_use]
pub fn bundled_store() -> MemoryStore {
    MemoryStore::from_static(BUNDLED_FILES)
}
