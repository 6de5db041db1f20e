//! Shared library for the aniworld-scraper workspace.
//!
//! This crate provides common functionality used by the scraper binary:
//! - Configuration management
//! - Data models for seasons, episodes and redirect records
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
