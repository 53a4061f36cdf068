//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
///
/// `NotFound`, `InvalidRequest` and `UnsupportedScheme` carry the full
/// client-facing message and display it verbatim; the remaining variants are
/// prefixed with their category.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// MCP protocol or transport failure.
    Mcp(String),
    /// File-system or I/O operation failure.
    Io(String),
    /// Content store traversal failed while building a catalog.
    Traversal(String),
    /// Store path failed validation against its root.
    PathViolation(String),
    /// Requested prompt or resource has no corresponding store entry.
    NotFound(String),
    /// Malformed request input, such as an unparsable URI.
    InvalidRequest(String),
    /// Resource URI uses a scheme other than `embedded`.
    UnsupportedScheme(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Mcp(msg) => write!(f, "mcp: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
            Self::Traversal(msg) => write!(f, "traversal: {msg}"),
            Self::PathViolation(msg) => write!(f, "path violation: {msg}"),
            Self::NotFound(msg) | Self::InvalidRequest(msg) | Self::UnsupportedScheme(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<AppError> for rmcp::ErrorData {
    fn from(err: AppError) -> Self {
        let message = err.to_string();
        match err {
            AppError::NotFound(_) => Self::resource_not_found(message, None),
            AppError::InvalidRequest(_)
            | AppError::UnsupportedScheme(_)
            | AppError::PathViolation(_) => Self::invalid_params(message, None),
            AppError::Config(_)
            | AppError::Mcp(_)
            | AppError::Io(_)
            | AppError::Traversal(_) => Self::internal_error(message, None),
        }
    }
}
