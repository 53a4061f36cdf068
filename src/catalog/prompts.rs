//! Prompt catalog: `.md` templates under `prompts/`.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::identity::{self, PROMPT_ROOT, PROMPT_SUFFIX};
use super::{decode_text, CatalogItem, NameFilter};
use crate::store::path_safety::join_within;
use crate::store::ContentStore;
use crate::{AppError, Result};

/// Role of every message a prompt renders to.
pub const PROMPT_ROLE: &str = "user";

/// Prompt metadata registered with the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptDescriptor {
    /// Template filename without `.md`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
}

/// A prompt template rendered as a single message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt {
    /// Always [`PROMPT_ROLE`].
    pub role: &'static str,
    /// Template text, unmodified.
    pub text: String,
}

/// Prompt descriptor with its handler.
pub type PromptItem = CatalogItem<PromptDescriptor, PromptHandler>;

/// Serves prompt templates from a store.
#[derive(Clone)]
pub struct PromptHandler {
    store: Arc<dyn ContentStore>,
}

impl Debug for PromptHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptHandler").finish_non_exhaustive()
    }
}

impl PromptHandler {
    /// Create a handler reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Render the prompt stored at `prompts/<requested_name>.md`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the template is absent or unreadable,
    /// or if `requested_name` is not a single path segment.
    pub fn handle(&self, requested_name: &str) -> Result<RenderedPrompt> {
        let not_found = || AppError::NotFound(format!("prompt not found: {requested_name}"));

        let path = prompt_path(requested_name).ok_or_else(|| {
            debug!(name = requested_name, "rejecting prompt name outside prompt root");
            not_found()
        })?;
        debug!(%path, "reading prompt");

        let bytes = self.store.read_file(&path).map_err(|err| {
            debug!(%path, %err, "prompt read failed");
            not_found()
        })?;
        debug!(bytes = bytes.len(), "prompt read");

        Ok(RenderedPrompt {
            role: PROMPT_ROLE,
            text: decode_text(&path, &bytes),
        })
    }
}

/// Store path of the template named `name`, or `None` when `name` would
/// resolve anywhere but directly under the prompt root.
fn prompt_path(name: &str) -> Option<String> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return None;
    }
    join_within(PROMPT_ROOT, name)
        .ok()
        .map(|dir| format!("{dir}{PROMPT_SUFFIX}"))
}

/// Catalog of the prompt templates in a store.
#[derive(Clone)]
pub struct PromptCatalog {
    store: Arc<dyn ContentStore>,
}

impl PromptCatalog {
    /// Create a catalog over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Walk `prompts/` and emit one item per `.md` file admitted by `filter`.
    ///
    /// Files without the `.md` suffix are skipped. Items follow the store's
    /// walk order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Traversal` if the walk fails; no partial catalog is
    /// returned.
    pub fn build(&self, filter: &NameFilter) -> Result<Vec<PromptItem>> {
        debug!(filter = ?filter.names(), "loading prompts");

        let mut items = Vec::new();
        for entry in self.store.walk(PROMPT_ROOT)? {
            if entry.is_dir {
                continue;
            }
            let Some(prompt) = identity::derive_prompt(&entry.path) else {
                continue;
            };

            if !filter.matches(&prompt.name) {
                debug!(path = %entry.path, "skipping prompt (not in filter)");
                continue;
            }

            debug!(name = %prompt.name, description = %prompt.description, "creating prompt");
            items.push(CatalogItem {
                descriptor: PromptDescriptor {
                    name: prompt.name,
                    description: prompt.description,
                },
                handler: PromptHandler::new(Arc::clone(&self.store)),
            });
        }

        info!(count = items.len(), "prompts loaded");
        Ok(items)
    }
}
