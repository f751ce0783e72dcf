//! Shared utilities for the Weed Guard client workspace.
//!
//! This crate holds the pieces every Weed Guard binary needs:
//! compiled-in API constants, the configuration error type, and
//! unified logging initialization.

pub mod api_constants;
pub mod error;
pub mod logging;

pub use api_constants::{api_base_url, DEFAULT_API_BASE_URL, STORAGE_DIR_NAME};
pub use error::ConfigurationError;
