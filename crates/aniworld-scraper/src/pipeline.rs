//! Pipeline orchestrator.
//!
//! Sequences extraction across season page, episode rows, identity lookup
//! and per-episode redirect pages, then assembles the final records.
//! Processing is strictly sequential; a fixed courtesy pause between
//! detail-page fetches bounds the request rate against the source site.

use crate::api::TmdbClient;
use crate::error::ScrapeError;
use crate::extract;
use crate::fetch::PageFetcher;
use crate::progress::ProgressObserver;
use scraper::Html;
use shared::{AnimeIdentity, Episode, EpisodeRecord, RedirectSet, SeasonEpisodes, SeasonInfo};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};
use url::Url;

/// Everything extracted for one input URL.
#[derive(Debug, Clone)]
pub struct SeasonOutput {
    pub season: SeasonInfo,
    pub identity: AnimeIdentity,
    pub episodes: Vec<Episode>,
    pub records: Vec<EpisodeRecord>,
}

impl SeasonOutput {
    /// The simpler per-season episode list, emitted independently of the
    /// redirect records.
    pub fn episode_list(&self) -> SeasonEpisodes {
        SeasonEpisodes {
            season: self
                .season
                .number_or_default()
                .parse()
                .unwrap_or(1),
            episodes: self.episodes.clone(),
        }
    }
}

/// Per-URL extraction pipeline.
pub struct Pipeline {
    fetcher: PageFetcher,
    tmdb: TmdbClient,
    base_url: Url,
    detail_delay: Duration,
    extract_redirects: bool,
}

impl Pipeline {
    pub fn new(
        fetcher: PageFetcher,
        tmdb: TmdbClient,
        base_url: Url,
        detail_delay: Duration,
        extract_redirects: bool,
    ) -> Self {
        Self {
            fetcher,
            tmdb,
            base_url,
            detail_delay,
            extract_redirects,
        }
    }

    /// Process one season URL end to end.
    ///
    /// A fetch failure on the season page or a page without episode rows
    /// aborts this URL only; the caller decides whether to continue with
    /// the rest of the batch. Identity lookup failures and per-episode
    /// detail fetch failures degrade to empty fields instead.
    pub async fn process_url(
        &self,
        url: &str,
        observer: &dyn ProgressObserver,
    ) -> Result<SeasonOutput, ScrapeError> {
        let markup = self.fetcher.fetch(url).await?;

        // Everything the season page holds is pulled out before the next
        // await point; the parsed document is not Send.
        let (season, episodes, main_title, imdb_id) = {
            let document = Html::parse_document(&markup);
            let season = extract::extract_season_info(&document);
            let episodes = extract::extract_episodes(&document, &self.base_url)?;
            let main_title = extract::extract_main_title(&document);
            let imdb_id = extract::extract_imdb_id(&document);
            (season, episodes, main_title, imdb_id)
        };

        observer.season_resolved(&season, episodes.len());

        let identity = self.resolve_identity(url, main_title, imdb_id).await;
        observer.identity_resolved(&identity);

        let season_number = season.number_or_default();
        let total = episodes.len();
        let mut records = Vec::with_capacity(total);

        for (index, episode) in episodes.iter().enumerate() {
            let redirects = if self.extract_redirects {
                self.episode_redirects(episode, observer).await
            } else {
                RedirectSet::default()
            };

            records.push(EpisodeRecord::assemble(
                &identity,
                &season_number,
                episode,
                &redirects,
            ));
            observer.episode_processed(episode, index + 1, total);

            // Fixed pause between successive detail-page fetches
            if self.extract_redirects && index + 1 < total {
                sleep(self.detail_delay).await;
            }
        }

        Ok(SeasonOutput {
            season,
            identity,
            episodes,
            records,
        })
    }

    /// Build the series identity.
    ///
    /// Lookup failures surface as warnings and leave the corresponding ID
    /// empty; extraction of the rest of the record proceeds regardless.
    async fn resolve_identity(
        &self,
        url: &str,
        main_title: String,
        imdb_id: String,
    ) -> AnimeIdentity {
        let slug = extract::extract_slug(url);

        let tmdb_id = if slug.is_empty() {
            warn!(url = %url, "URL does not match /anime/stream/<slug>, skipping TMDB lookup");
            String::new()
        } else if !self.tmdb.has_api_key() {
            warn!("No TMDB API key configured, skipping lookup");
            String::new()
        } else {
            let query = extract::search_query_from_slug(&slug);
            match self.tmdb.resolve_id(&query).await {
                Ok(Some(id)) => {
                    info!(query = %query, tmdb_id = %id, "Resolved TMDB ID");
                    id
                }
                Ok(None) => {
                    warn!(query = %query, "No TMDB results for query");
                    String::new()
                }
                Err(e) => {
                    warn!(query = %query, error = %e, "TMDB lookup failed");
                    String::new()
                }
            }
        };

        AnimeIdentity {
            main_title,
            tmdb_id,
            imdb_id,
            slug,
        }
    }

    /// Redirect extraction for a single episode. A failed detail-page fetch
    /// yields an empty set and the pipeline moves on to the next episode.
    async fn episode_redirects(
        &self,
        episode: &Episode,
        observer: &dyn ProgressObserver,
    ) -> RedirectSet {
        if episode.detail_url.is_empty() {
            warn!(
                episode = episode.number.as_deref().unwrap_or("?"),
                "Episode row had no detail URL, skipping redirects"
            );
            return RedirectSet::default();
        }

        match self.fetcher.fetch(&episode.detail_url).await {
            Ok(markup) => {
                let document = Html::parse_document(&markup);
                let redirects = extract::extract_redirects(&document, &self.base_url);
                observer.redirects_extracted(episode, &redirects);
                redirects
            }
            Err(e) => {
                warn!(
                    url = %episode.detail_url,
                    error = %e,
                    "Failed to fetch detail page, emitting record without redirects"
                );
                RedirectSet::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_list_season_number() {
        let output = SeasonOutput {
            season: SeasonInfo {
                title: None,
                number: Some("3".to_string()),
            },
            identity: AnimeIdentity::default(),
            episodes: vec![Episode::default()],
            records: Vec::new(),
        };
        assert_eq!(output.episode_list().season, 3);

        let output = SeasonOutput {
            season: SeasonInfo::default(),
            identity: AnimeIdentity::default(),
            episodes: Vec::new(),
            records: Vec::new(),
        };
        // Missing or unparsable season numbers default to 1
        assert_eq!(output.episode_list().season, 1);
    }
}
