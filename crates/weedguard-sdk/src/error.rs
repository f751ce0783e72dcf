//! Error types for the Weed Guard SDK

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ErrorBody;

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised by the token persistence layer
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying storage could not be read or written
    #[error("storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be serialized or deserialized
    #[error("storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Storage backend is unavailable
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// API client errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced an HTTP response: connection failure,
    /// DNS, or the fixed request timeout
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server replied with a non-2xx status; the body is passed
    /// through verbatim
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// Authorization could not be restored via refresh; the caller
    /// must re-authenticate
    #[error("session expired, please log in again")]
    AuthExpired,

    /// Token persistence failed
    #[error("token storage error: {0}")]
    Storage(#[from] StorageError),

    /// Client was misconfigured
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ApiError {
    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Human-readable message extracted from a JSON error body.
    ///
    /// The backend reports failures as `{"detail": "..."}`, with
    /// `{"message": "..."}` used by some endpoints.
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::Http { body, .. } => {
                let parsed: ErrorBody = serde_json::from_str(body).ok()?;
                parsed.detail.or(parsed.message)
            }
            _ => None,
        }
    }

    /// Whether the stored session is no longer usable and the user
    /// should be sent back through login.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }
}
