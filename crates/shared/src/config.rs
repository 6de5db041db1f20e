//! Configuration management for the aniworld-scraper workspace.
//!
//! This module handles loading and parsing configuration from TOML files,
//! with sensible defaults for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output directory settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Source site settings
    pub source: SourceConfig,

    /// TMDB lookup settings
    pub tmdb: TmdbConfig,
}

/// Output directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the per-season JSON files are written to
    pub dir: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log directory path (relative to output directory or absolute)
    pub log_dir: String,

    /// Default log level (trace, debug, info, warn, error)
    pub default_level: String,

    /// Enable console output
    pub console: bool,

    /// Enable file output
    pub file: bool,

    /// Enable JSON formatting for file logs
    pub json_format: bool,
}

/// Source site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the streaming site, used to resolve relative hrefs
    pub base_url: String,

    /// User agent sent with every page request. The site blocks default
    /// library agents, so this must look like a real browser.
    pub user_agent: String,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Fixed pause between episode detail-page fetches, in milliseconds
    pub detail_delay_ms: u64,
}

/// TMDB API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB API v3 base URL
    pub base_url: String,

    /// TMDB API key
    pub api_key: String,

    /// Language parameter for search requests
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig {
                dir: "output".to_string(),
            },
            logging: LoggingConfig {
                log_dir: "logs".to_string(),
                default_level: "info".to_string(),
                console: true,
                file: true,
                json_format: false,
            },
            source: SourceConfig {
                base_url: "https://aniworld.to".to_string(),
                user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                             AppleWebKit/537.36 (KHTML, like Gecko) \
                             Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
                request_timeout_seconds: 30,
                detail_delay_ms: 1000,
            },
            tmdb: TmdbConfig {
                base_url: "https://api.themoviedb.org/3".to_string(),
                api_key: String::new(),
                language: "en-US".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// If the file doesn't exist, returns the default configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(
                path = %path.display(),
                "Config file not found, using defaults"
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            "Configuration saved successfully"
        );

        Ok(())
    }

    /// Get the absolute path for the output directory
    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output.dir)
    }

    /// Get the absolute path for the log directory
    pub fn log_dir(&self) -> PathBuf {
        let log_path = Path::new(&self.logging.log_dir);
        if log_path.is_absolute() {
            log_path.to_path_buf()
        } else {
            self.output_dir().join(log_path)
        }
    }
}
