//! Error types for the CLI application.

use crate::export::ExportError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error (unreachable or unreadable snapshot)
    #[error("Store error: {0}")]
    Store(#[from] docsift_store::StoreError),

    /// Extraction error
    #[error("Extraction error: {0}")]
    Extractor(#[from] docsift_extractor::ExtractorError),

    /// Export error
    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
