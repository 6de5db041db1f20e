//! Raw page fetching.

use crate::error::ScrapeError;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// HTTP wrapper for season and episode detail pages.
///
/// Sends a browser user-agent with every request; the source site blocks
/// default library agents.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch a page and return its raw markup.
    pub async fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::FetchFailure {
                url: url.to_string(),
                source,
            })?
            .error_for_status()
            .map_err(|source| ScrapeError::FetchFailure {
                url: url.to_string(),
                source,
            })?;

        response
            .text()
            .await
            .map_err(|source| ScrapeError::FetchFailure {
                url: url.to_string(),
                source,
            })
    }
}
