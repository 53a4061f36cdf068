//! In-memory content store.

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::{ContentStore, StoreEntry};
use crate::{AppError, Result};

/// Content store holding every file in memory, keyed by path.
///
/// Directories are implied by the file paths. Used for the bundled content
/// and for synthetic trees in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Cow<'static, [u8]>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store over borrowed static content.
    #[must_use]
    pub fn from_static(files: &[(&'static str, &'static [u8])]) -> Self {
        let mut store = Self::new();
        for (path, bytes) in files {
            store.insert(path, Cow::Borrowed(*bytes));
        }
        store
    }

    /// Add a file, returning the store for chaining.
    #[must_use]
    pub fn with_file(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, Cow::Owned(bytes.into()));
        self
    }

    /// Add or replace a file. Leading and trailing separators are ignored.
    pub fn insert(&mut self, path: &str, bytes: Cow<'static, [u8]>) {
        self.files.insert(path.trim_matches('/').to_owned(), bytes);
    }

    /// Number of leaf files in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ContentStore for MemoryStore {
    fn walk(&self, root: &str) -> Result<Vec<StoreEntry>> {
        let root = root.trim_matches('/');
        if root.is_empty() {
            return Err(AppError::Traversal("walk root must not be empty".into()));
        }
        if self.files.contains_key(root) {
            return Err(AppError::Traversal(format!("{root}: not a directory")));
        }

        let root_depth = root.split('/').count();
        let prefix = format!("{root}/");

        // Component-wise ordering yields a pre-order walk with sorted siblings.
        let mut nodes: BTreeMap<Vec<&str>, bool> = BTreeMap::new();
        for path in self.files.keys().filter(|path| path.starts_with(&prefix)) {
            let components: Vec<&str> = path.split('/').collect();
            for depth in root_depth..components.len() {
                nodes.entry(components[..depth].to_vec()).or_insert(true);
            }
            nodes.insert(components, false);
        }

        if nodes.is_empty() {
            return Err(AppError::Traversal(format!("{root}: no such directory")));
        }

        Ok(nodes
            .into_iter()
            .map(|(components, is_dir)| StoreEntry {
                path: components.join("/"),
                is_dir,
            })
            .collect())
    }

    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        self.files
            .get(path)
            .map(|bytes| Cow::Borrowed(bytes.as_ref()))
            .ok_or_else(|| AppError::Io(format!("{path}: file does not exist")))
    }
}
