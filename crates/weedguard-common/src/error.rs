//! Shared error types for the Weed Guard workspace

use thiserror::Error;

/// Errors raised while loading or persisting client configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Configuration file could not be read or written
    #[error("configuration IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file contents could not be parsed
    #[error("invalid configuration at {path}: {message}")]
    Parse { path: String, message: String },

    /// Platform base directories could not be determined
    #[error("failed to determine base directories: {0}")]
    BaseDirs(String),
}
