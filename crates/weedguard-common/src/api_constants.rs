//! API configuration constants for the Weed Guard client
//!
//! These constants are pre-compiled into the binary to avoid the need
//! for external configuration files. Each one can be overridden with an
//! environment variable for development against a local backend.

/// Default base URL of the Weed Guard prediction API.
///
/// Trailing slash is significant: endpoint paths are joined onto it.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/";

/// Directory name (under the platform data dir) for persisted client state.
pub const STORAGE_DIR_NAME: &str = "weedguard";

/// Resolve the API base URL, preferring the `WEEDGUARD_API_URL`
/// environment variable over the compiled-in default.
pub fn api_base_url() -> String {
    std::env::var("WEEDGUARD_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
}
