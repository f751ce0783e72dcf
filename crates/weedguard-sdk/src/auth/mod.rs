//! Token lifecycle management
//!
//! This module owns the persisted credential pair and restores
//! authorization when the backend rejects an access token:
//! - Durable token storage through the [`TokenStore`]
//! - Single-flight refresh coordination for concurrent failures

pub mod token_store;

pub(crate) mod refresh;

pub use token_store::{TokenPair, TokenStore};
