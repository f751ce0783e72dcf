//! Error types for the Weed Guard CLI

use color_eyre::eyre::Report;
use thiserror::Error;

/// CLI error type with minimal variants
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file issues
    #[error("Configuration error: {0}")]
    Config(#[from] weedguard_common::ConfigurationError),

    /// API communication errors
    #[error("API error: {0}")]
    Api(#[from] weedguard_sdk::ApiError),

    /// Token storage issues
    #[error("Storage error: {0}")]
    Storage(#[from] weedguard_sdk::StorageError),

    /// Reading input files failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal prompt interaction failed
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Output serialization failed
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Everything else (using color-eyre's Report for rich errors)
    #[error(transparent)]
    Internal(#[from] Report),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
