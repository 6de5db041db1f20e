//! TMDB API client for external ID lookup.

use super::types::SearchResponse;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// TMDB API v3 client
pub struct TmdbClient {
    /// HTTP client
    client: Client,
    /// Base URL for the TMDB API
    base_url: String,
    /// API key sent as a query parameter
    api_key: String,
    /// Language parameter for search requests
    language: String,
}

impl TmdbClient {
    /// Create a new TMDB client
    pub fn new(base_url: String, api_key: String, language: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
            language,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Run one search request against the given endpoint
    async fn search(&self, endpoint: &str, query: &str) -> Result<SearchResponse> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, query = %query, "TMDB search");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .context("TMDB request failed")?
            .error_for_status()
            .context("TMDB request returned error status")?;

        response
            .json::<SearchResponse>()
            .await
            .context("Failed to parse TMDB response")
    }

    /// Search the TV endpoint
    pub async fn search_tv(&self, query: &str) -> Result<SearchResponse> {
        self.search("/search/tv", query).await
    }

    /// Search the movie endpoint
    pub async fn search_movie(&self, query: &str) -> Result<SearchResponse> {
        self.search("/search/movie", query).await
    }

    /// Resolve a title to a TMDB ID.
    ///
    /// Anime titles are predominantly television-structured, so the TV
    /// search runs first; film-structured titles fall back to the movie
    /// search. Empty result sets on both resolve to `None`.
    pub async fn resolve_id(&self, query: &str) -> Result<Option<String>> {
        let tv = self.search_tv(query).await?;
        resolve_with(tv, || self.search_movie(query)).await
    }
}

/// Two-tier resolution: a TV hit wins outright, and the movie lookup is
/// only issued when the TV result set is empty.
async fn resolve_with<F, Fut>(tv: SearchResponse, fetch_movie: F) -> Result<Option<String>>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<SearchResponse>>,
{
    if let Some(id) = first_result_id(&tv) {
        return Ok(Some(id));
    }

    let movie = fetch_movie().await?;
    Ok(first_result_id(&movie))
}

/// First hit wins; the search endpoints order by relevance.
pub fn first_result_id(response: &SearchResponse) -> Option<String> {
    response.results.first().map(|result| result.id.to_string())
}
