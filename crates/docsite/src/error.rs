//! CLI error types.

use docsite_config::ConfigError;
use docsite_site::{CatalogError, ConfigurationError, NavigationError, VersionError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Projects(#[from] ConfigurationError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Version(#[from] VersionError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
