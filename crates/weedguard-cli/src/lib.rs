//! # Weed Guard CLI
//!
//! Command-line client for the Weed Guard crop prediction service.
//!
//! This crate mirrors the flows of the mobile app:
//! - Account registration, login, and logout
//! - Crop image prediction uploads
//! - Prediction history and analytics browsing
//!
//! ## Architecture
//!
//! - Clap-based argument parsing with derive macros
//! - Handler-based command processing
//! - Shared configuration and error handling, with the token lifecycle
//!   delegated entirely to the SDK

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;

pub use cli::*;
pub use error::*;
