//! Prompt and resource catalogs built from a content store.
//!
//! A catalog walks its store once per build, derives identifiers from each
//! leaf path, applies the startup name filter and yields one descriptor per
//! surviving file, paired with a handler that serves it on request.

use serde_json::{json, Value};
use tracing::{error, warn};

use crate::Result;

pub mod filter;
pub mod identity;
pub mod prompts;
pub mod resources;

pub use filter::NameFilter;
pub use identity::MimeType;
pub use prompts::{PromptCatalog, PromptDescriptor, PromptHandler, PromptItem, RenderedPrompt};
pub use resources::{
    ResourceCatalog, ResourceContent, ResourceDescriptor, ResourceHandler, ResourceItem,
};

/// A descriptor paired with the handler that serves it.
#[derive(Debug, Clone)]
pub struct CatalogItem<D, H> {
    /// Metadata registered with the protocol server.
    pub descriptor: D,
    /// Handler bound to the catalog's store.
    pub handler: H,
}

/// Unwrap a catalog build, degrading a failure to an empty catalog.
///
/// The failure is logged so an unreadable store can still be told apart from
/// a store with no matching content.
#[must_use]
pub fn or_empty<T>(kind: &str, built: Result<Vec<T>>) -> Vec<T> {
    built.unwrap_or_else(|err| {
        error!(kind, %err, "catalog build failed; registering no entries");
        Vec::new()
    })
}

/// JSON listing of both catalogs, as printed by `--list`.
#[must_use]
pub fn listing(prompts: &[PromptItem], resources: &[ResourceItem]) -> Value {
    let prompts: Vec<&PromptDescriptor> = prompts.iter().map(|item| &item.descriptor).collect();
    let resources: Vec<&ResourceDescriptor> =
        resources.iter().map(|item| &item.descriptor).collect();

    json!({
        "prompts": prompts,
        "resources": resources,
    })
}

/// Decode file content as UTF-8, replacing invalid sequences.
fn decode_text(path: &str, bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        Err(err) => {
            warn!(path, %err, "content is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
