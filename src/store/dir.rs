//! On-disk content store rooted at a directory.

use std::borrow::Cow;
use std::fs::{self, DirEntry};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ContentStore, StoreEntry};
use crate::{AppError, Result};

/// Read-only view of a directory tree with the same layout as the bundled
/// content (`prompts/`, `resources/`).
///
/// The tree is assumed not to change while the process runs. Reads are
/// confined to the root; symlinks pointing outside of it are rejected.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Open the directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `root` cannot be canonicalized or is not
    /// a directory.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root
            .as_ref()
            .canonicalize()
            .map_err(|err| AppError::Config(format!("content directory invalid: {err}")))?;

        if !root.is_dir() {
            return Err(AppError::Config(format!(
                "content directory {} is not a directory",
                root.display()
            )));
        }

        Ok(Self { root })
    }

    /// Canonical root of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a slash-separated store path onto the filesystem under the root.
    ///
    /// Leading separators are ignored and `.` segments dropped. An existing
    /// target is returned canonicalized; a missing one is returned as joined
    /// so the caller's read reports it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::PathViolation` if a `..` segment climbs above the
    /// root or an existing target (through symlinks) resolves outside it, and
    /// `AppError::Io` if the target cannot be resolved for another reason.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let mut segments: Vec<&str> = Vec::new();
        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(AppError::PathViolation(format!(
                            "{path} climbs above the content root"
                        )));
                    }
                }
                normal => segments.push(normal),
            }
        }

        let joined = segments
            .iter()
            .fold(self.root.clone(), |dir, segment| dir.join(segment));

        match joined.canonicalize() {
            Ok(target) if target.starts_with(&self.root) => Ok(target),
            Ok(_) => Err(AppError::PathViolation(format!(
                "{path} resolves outside the content root"
            ))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(joined),
            Err(err) => Err(AppError::Io(format!("{path}: {err}"))),
        }
    }

    fn walk_dir(&self, dir: &Path, prefix: &str, out: &mut Vec<StoreEntry>) -> Result<()> {
        let traversal = |err: std::io::Error| AppError::Traversal(format!("{prefix}: {err}"));

        let mut children = fs::read_dir(dir)
            .map_err(traversal)?
            .collect::<std::io::Result<Vec<DirEntry>>>()
            .map_err(traversal)?;
        children.sort_by_key(DirEntry::file_name);

        for child in children {
            let file_name = child.file_name();
            let name = file_name.to_str().ok_or_else(|| {
                AppError::Traversal(format!("{prefix}: entry name is not valid UTF-8"))
            })?;
            let path = format!("{prefix}/{name}");

            let file_type = child.file_type().map_err(traversal)?;
            let is_dir = if file_type.is_symlink() {
                // Linked files are served; linked directories could loop.
                match self.resolve(&path) {
                    Ok(target) if target.is_file() => false,
                    _ => {
                        debug!(%path, "skipping symlink that is not a file inside the content root");
                        continue;
                    }
                }
            } else {
                file_type.is_dir()
            };

            out.push(StoreEntry {
                path: path.clone(),
                is_dir,
            });

            if is_dir {
                self.walk_dir(&child.path(), &path, out)?;
            }
        }

        Ok(())
    }
}

impl ContentStore for DirStore {
    fn walk(&self, root: &str) -> Result<Vec<StoreEntry>> {
        let root = root.trim_matches('/');
        let start = self
            .resolve(root)
            .map_err(|err| AppError::Traversal(format!("{root}: {err}")))?;

        if !start.is_dir() {
            return Err(AppError::Traversal(format!("{root}: no such directory")));
        }

        let mut entries = vec![StoreEntry::dir(root)];
        self.walk_dir(&start, root, &mut entries)?;
        Ok(entries)
    }

    fn read_file(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        let resolved = self.resolve(path)?;
        fs::read(&resolved)
            .map(Cow::Owned)
            .map_err(|err| AppError::Io(format!("{path}: {err}")))
    }
}
