#![forbid(unsafe_code)]

//! Catalog of bundled prompt templates and resources served over the Model
//! Context Protocol.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod mcp;
pub mod store;

pub use config::CatalogConfig;
pub use errors::{AppError, Result};
