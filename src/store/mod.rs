//! Read-only content stores backing the prompt and resource catalogs.
//!
//! A store is a hierarchical tree of leaf files addressed by slash-separated
//! paths. Stores never change after construction, so a single instance can be
//! shared behind an `Arc` by every catalog handler.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::Result;

pub mod bundled;
pub mod dir;
pub mod memory;
pub mod path_safety;

pub use bundled::bundled_store;
pub use dir::DirStore;
pub use memory::MemoryStore;

/// One node visited during a store walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    /// Slash-separated path from the store root, including the walk root.
    pub path: String,
    /// Whether the node is a directory rather than a leaf file.
    pub is_dir: bool,
}

impl StoreEntry {
    /// Create a directory entry.
    #[must_use]
    pub fn dir(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }

    /// Create a leaf file entry.
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }
}

/// Read-only, immutable byte-content tree.
pub trait ContentStore: Send + Sync {
    /// Recursively list `root` and everything beneath it.
    ///
    /// The walk root itself comes first, followed by a depth-first traversal
    /// with siblings in name order. Repeated walks of the same store return
    /// the same sequence.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Traversal` if `root` does not exist, is not a
    /// directory, or any entry beneath it cannot be listed.
    fn walk(&self, root: &str) -> Result<Vec<StoreEntry>>;

    /// Read the whole content of the leaf file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if no file exists at `path` or it cannot be read,
    /// and `AppError::PathViolation` if `path` escapes the store.
    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>>;
}

/// Open the store the server should serve from.
///
/// Uses the on-disk tree at `content_dir` when given and the content compiled
/// into the binary otherwise.
///
/// # Errors
///
/// Returns `AppError::Config` if `content_dir` is not a readable directory.
pub fn open(content_dir: Option<&Path>) -> Result<Arc<dyn ContentStore>> {
    if let Some(dir) = content_dir {
        let store = DirStore::open(dir)?;
        info!(root = %store.root().display(), "serving content from directory");
        Ok(Arc::new(store))
    } else {
        let store = bundled_store();
        info!(files = store.len(), "serving bundled content");
        Ok(Arc::new(store))
    }
}
