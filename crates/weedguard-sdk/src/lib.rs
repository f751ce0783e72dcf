//! # Weed Guard SDK
//!
//! Client library for the Weed Guard crop prediction service.
//!
//! The SDK owns the full token lifecycle: credentials issued by login
//! are persisted through the [`TokenStore`], attached to outgoing
//! requests as bearer tokens, and transparently refreshed when the
//! backend rejects them. Concurrent requests that fail together are
//! serviced by a single refresh call.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use weedguard_sdk::ClientBuilder;
//!
//! # async fn example() -> weedguard_sdk::Result<()> {
//! let client = ClientBuilder::new()
//!     .base_url("http://localhost:8000/api/")
//!     .build()?;
//!
//! client.login("farmer@example.com", "secret").await?;
//! let predictions = client.list_predictions().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod storage;
pub mod types;

pub use auth::{TokenPair, TokenStore};
pub use client::{ClientBuilder, WeedGuardClient, DEFAULT_TIMEOUT_SECS};
pub use error::{ApiError, Result, StorageError};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
