//! Slash-path normalization and root-containment checks.
//!
//! Every store path derived from client input is cleaned and then verified
//! to stay beneath its catalog root before any read happens. These helpers
//! work on store paths only; `DirStore::resolve` maps them onto the disk.

use crate::{AppError, Result};

/// Clean a slash-separated path as if it were rooted.
///
/// Drops empty and `.` segments and resolves `..` against the segments seen
/// so far; `..` at the top is discarded rather than climbing above the root.
/// The result has no leading or trailing separator.
///
/// ```
/// use embed_mcp::store::path_safety::clean_rooted;
///
/// assert_eq!(clean_rooted("/data//./report.csv"), "data/report.csv");
/// assert_eq!(clean_rooted("../../etc/passwd"), "etc/passwd");
/// ```
#[must_use]
pub fn clean_rooted(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            normal => segments.push(normal),
        }
    }
    segments.join("/")
}

/// Join a cleaned relative path onto `root`, verifying containment.
///
/// An empty `relative` resolves to `root` itself.
///
/// # Errors
///
/// Returns `AppError::PathViolation` if `relative` is absolute or contains an
/// empty, `.` or `..` segment, i.e. anything that has not been cleaned.
pub fn join_within(root: &str, relative: &str) -> Result<String> {
    if relative.is_empty() {
        return Ok(root.to_owned());
    }

    let escapes = relative
        .split('/')
        .any(|segment| matches!(segment, "" | "." | ".."));
    if escapes {
        return Err(AppError::PathViolation(format!(
            "{relative} is not contained in {root}"
        )));
    }

    Ok(format!("{root}/{relative}"))
}
