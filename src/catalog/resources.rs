//! Resource catalog: every file under `resources/`, addressed by
//! `embedded://` locators.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::identity::{self, MimeType, LOCATOR_SCHEME, RESOURCE_ROOT};
use super::{decode_text, CatalogItem, NameFilter};
use crate::store::path_safety::{clean_rooted, join_within};
use crate::store::ContentStore;
use crate::{AppError, Result};

/// Resource metadata registered with the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    /// Path relative to the resource root, used as the display label.
    pub name: String,
    /// `embedded://` locator.
    pub uri: String,
    /// MIME type derived from the extension.
    pub mime_type: MimeType,
    /// Human-readable description.
    pub description: String,
}

/// Text content of a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceContent {
    /// URI exactly as requested.
    pub uri: String,
    /// MIME type derived from the resolved path.
    pub mime_type: MimeType,
    /// File content.
    pub text: String,
}

/// Resource descriptor with its handler.
pub type ResourceItem = CatalogItem<ResourceDescriptor, ResourceHandler>;

/// Serves resources from a store by `embedded://` locator.
#[derive(Clone)]
pub struct ResourceHandler {
    store: Arc<dyn ContentStore>,
}

impl Debug for ResourceHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHandler").finish_non_exhaustive()
    }
}

impl ResourceHandler {
    /// Create a handler reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Read the resource addressed by `requested_uri`.
    ///
    /// # Errors
    ///
    /// - `AppError::InvalidRequest` if the URI cannot be parsed.
    /// - `AppError::UnsupportedScheme` if the scheme is not `embedded`.
    /// - `AppError::PathViolation` if the resolved path leaves `resources/`.
    /// - `AppError::NotFound` if no readable file exists at the resolved path.
    pub fn handle(&self, requested_uri: &str) -> Result<ResourceContent> {
        debug!(uri = requested_uri, "handling resource request");

        let relative = normalize_locator(requested_uri)?;
        let path = join_within(RESOURCE_ROOT, &relative)?;
        debug!(%path, "reading resource");

        let bytes = self.store.read_file(&path).map_err(|err| {
            debug!(%path, %err, "resource read failed");
            AppError::NotFound(format!("embedded resource not found: {path}"))
        })?;
        debug!(bytes = bytes.len(), "resource read");

        Ok(ResourceContent {
            uri: requested_uri.to_owned(),
            mime_type: MimeType::for_path(&path),
            text: decode_text(&path, &bytes),
        })
    }
}

/// Catalog of the resources in a store.
#[derive(Clone)]
pub struct ResourceCatalog {
    store: Arc<dyn ContentStore>,
}

impl ResourceCatalog {
    /// Create a catalog over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Walk `resources/` and emit one item per file whose stem is admitted by
    /// `filter`, regardless of extension.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Traversal` if the walk fails; no partial catalog is
    /// returned.
    pub fn build(&self, filter: &NameFilter) -> Result<Vec<ResourceItem>> {
        debug!(filter = ?filter.names(), "loading resources");

        let prefix = format!("{RESOURCE_ROOT}/");
        let mut items = Vec::new();
        for entry in self.store.walk(RESOURCE_ROOT)? {
            if entry.is_dir {
                continue;
            }
            let Some(relative) = entry.path.strip_prefix(&prefix) else {
                continue;
            };

            let resource = identity::derive_resource(relative);
            if !filter.matches(&resource.name) {
                debug!(path = relative, "skipping resource (not in filter)");
                continue;
            }

            debug!(
                name = relative,
                uri = %resource.uri,
                mime = %resource.mime_type,
                "creating resource"
            );
            items.push(CatalogItem {
                descriptor: ResourceDescriptor {
                    name: relative.to_owned(),
                    uri: resource.uri,
                    mime_type: resource.mime_type,
                    description: resource.description,
                },
                handler: ResourceHandler::new(Arc::clone(&self.store)),
            });
        }

        info!(count = items.len(), "resources loaded");
        Ok(items)
    }
}

/// Resolve an `embedded://` URI to its cleaned path relative to the resource
/// root.
///
/// ```
/// use embed_mcp::catalog::resources::normalize_locator;
///
/// let relative = normalize_locator("embedded:///data/./report.csv").ok();
/// assert_eq!(relative.as_deref(), Some("data/report.csv"));
/// ```
///
/// # Errors
///
/// Returns `AppError::InvalidRequest` for unparsable URIs and
/// `AppError::UnsupportedScheme` for schemes other than `embedded`.
pub fn normalize_locator(uri: &str) -> Result<String> {
    let locator = parse_locator(uri)?;
    Ok(clean_rooted(&locator))
}

/// Split an `embedded://` URI and return its percent-decoded locator path.
///
/// Query and fragment components are ignored. The scheme is compared
/// without regard to case.
///
/// # Errors
///
/// Returns `AppError::InvalidRequest` for unparsable URIs and
/// `AppError::UnsupportedScheme` for schemes other than `embedded`.
pub fn parse_locator(uri: &str) -> Result<String> {
    let (scheme, rest) = uri
        .split_once(':')
        .ok_or_else(|| AppError::InvalidRequest(format!("invalid URI: missing scheme in {uri:?}")))?;

    if !is_valid_scheme(scheme) {
        return Err(AppError::InvalidRequest(format!(
            "invalid URI: malformed scheme {scheme:?}"
        )));
    }

    if !scheme.eq_ignore_ascii_case(LOCATOR_SCHEME) {
        return Err(AppError::UnsupportedScheme(format!(
            "unsupported scheme: {scheme}"
        )));
    }

    let rest = rest.find(['?', '#']).map_or(rest, |end| &rest[..end]);
    let locator = rest.strip_prefix("//").ok_or_else(|| {
        AppError::InvalidRequest(format!(
            "invalid URI: expected {LOCATOR_SCHEME}://<path>, got {uri:?}"
        ))
    })?;

    percent_decode(locator)
}

/// RFC 3986: `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`.
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '+' | '-' | '.'))
}

fn percent_decode(input: &str) -> Result<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let escape = bytes
                .get(index + 1..index + 3)
                .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(|| {
                    AppError::InvalidRequest(format!("invalid URI: bad escape in {input:?}"))
                })?;
            decoded.push(escape);
            index += 3;
        } else {
            decoded.push(bytes[index]);
            index += 1;
        }
    }

    String::from_utf8(decoded).map_err(|_| {
        AppError::InvalidRequest(format!("invalid URI: path of {input:?} is not UTF-8"))
    })
}
