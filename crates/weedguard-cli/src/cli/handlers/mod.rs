//! Command handlers for the Weed Guard CLI

pub mod analytics;
pub mod auth;
pub mod config;
pub mod predictions;
