//! Configuration parsing, validation, and command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::NameFilter;
use crate::{AppError, Result};

/// Startup name filters for both catalogs.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct FilterConfig {
    /// Prompt names to register; empty registers every prompt.
    #[serde(default)]
    pub prompts: Vec<String>,
    /// Resource names (filename stems) to register; empty registers every
    /// resource.
    #[serde(default)]
    pub resources: Vec<String>,
}

/// Catalog configuration parsed from an optional TOML file.
///
/// ```toml
/// content_dir = "/srv/embed-mcp/content"
///
/// [filters]
/// prompts = ["code_review"]
/// resources = ["languages", "style-guide"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct CatalogConfig {
    /// Directory to serve instead of the bundled content.
    #[serde(default)]
    pub content_dir: Option<PathBuf>,
    /// Name filters applied when the catalogs are built.
    #[serde(default)]
    pub filters: FilterConfig,
}

impl CatalogConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// A relative `content_dir` is resolved against the directory holding
    /// the file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;

        let mut config: Self = toml::from_str(&raw)?;
        if let Some(base) = path.parent() {
            config.content_dir = config
                .content_dir
                .map(|dir| if dir.is_relative() { base.join(dir) } else { dir });
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string and normalize paths.
    ///
    /// A relative `content_dir` is resolved against the working directory.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the prompt filter with a comma-separated list.
    pub fn override_prompts(&mut self, list: &str) {
        self.filters.prompts = parse_name_list(list);
    }

    /// Replace the resource filter with a comma-separated list.
    pub fn override_resources(&mut self, list: &str) {
        self.filters.resources = parse_name_list(list);
    }

    /// Serve content from `dir` instead of the configured source.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `dir` is not an existing directory.
    pub fn override_content_dir(&mut self, dir: PathBuf) -> Result<()> {
        self.content_dir = Some(dir);
        self.validate()
    }

    /// Filter for the prompt catalog.
    #[must_use]
    pub fn prompt_filter(&self) -> NameFilter {
        NameFilter::new(&self.filters.prompts)
    }

    /// Filter for the resource catalog.
    #[must_use]
    pub fn resource_filter(&self) -> NameFilter {
        NameFilter::new(&self.filters.resources)
    }

    fn validate(&mut self) -> Result<()> {
        if let Some(dir) = &self.content_dir {
            let canonical = dir
                .canonicalize()
                .map_err(|err| AppError::Config(format!("content_dir invalid: {err}")))?;
            if !canonical.is_dir() {
                return Err(AppError::Config(format!(
                    "content_dir {} is not a directory",
                    canonical.display()
                )));
            }
            self.content_dir = Some(canonical);
        }

        Ok(())
    }
}

/// Split a comma-separated name list, trimming whitespace and dropping blanks.
///
/// ```
/// use embed_mcp::config::parse_name_list;
///
/// assert_eq!(parse_name_list(" intro, setup ,"), ["intro", "setup"]);
/// ```
#[must_use]
pub fn parse_name_list(list: &str) -> Vec<String> {
    NameFilter::parse(list).names().to_vec()
}
