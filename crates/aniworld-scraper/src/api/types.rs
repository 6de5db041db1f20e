//! TMDB API v3 response types.

use serde::{Deserialize, Serialize};

/// Search response wrapper; the TV and movie search endpoints share it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub total_results: u32,
}

/// A single search hit. TV results carry `name`, movie results `title`;
/// only the ID matters for the lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}
