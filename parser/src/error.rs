//! Error types for feed I/O and configuration.
//!
//! Parsing a feed never fails; these errors only cover reading feeds and
//! catalogs from disk and loading configuration.

use thiserror::Error;

/// Errors that can occur around a parse pass.
#[derive(Debug, Error)]
pub enum FeedError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Configuration is structurally valid YAML but unusable.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for results with [`FeedError`].
pub type Result<T> = std::result::Result<T, FeedError>;
