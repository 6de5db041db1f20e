//! Progress reporting seam between the pipeline and its consumer.

use crate::error::ScrapeError;
use shared::{AnimeIdentity, Episode, RedirectSet, SeasonInfo};
use tracing::{error, info, warn};

/// Checkpoints the orchestrator reports while working through a URL.
///
/// All methods default to no-ops so consumers only implement what they
/// need; the pipeline itself never depends on an observer doing anything.
pub trait ProgressObserver {
    fn season_resolved(&self, _season: &SeasonInfo, _episode_count: usize) {}
    fn identity_resolved(&self, _identity: &AnimeIdentity) {}
    fn redirects_extracted(&self, _episode: &Episode, _redirects: &RedirectSet) {}
    fn episode_processed(&self, _episode: &Episode, _index: usize, _total: usize) {}
    fn url_failed(&self, _url: &str, _error: &ScrapeError) {}
}

/// Observer that discards all notifications.
pub struct NullObserver;

impl ProgressObserver for NullObserver {}

/// Observer that reports checkpoints through tracing; the CLI default.
pub struct LogObserver;

impl ProgressObserver for LogObserver {
    fn season_resolved(&self, season: &SeasonInfo, episode_count: usize) {
        info!(
            season = %season.number_or_default(),
            episodes = episode_count,
            "Season resolved"
        );
    }

    fn identity_resolved(&self, identity: &AnimeIdentity) {
        info!(
            title = %identity.main_title,
            tmdb_id = %identity.tmdb_id,
            imdb_id = %identity.imdb_id,
            "Identity resolved"
        );
    }

    fn redirects_extracted(&self, episode: &Episode, redirects: &RedirectSet) {
        if redirects.is_empty() {
            warn!(
                episode = episode.number.as_deref().unwrap_or("?"),
                "No redirect links found on detail page"
            );
        }
    }

    fn episode_processed(&self, episode: &Episode, index: usize, total: usize) {
        info!(
            progress = format!("{}/{}", index, total),
            episode = episode.number.as_deref().unwrap_or("?"),
            "Episode processed"
        );
    }

    fn url_failed(&self, url: &str, error: &ScrapeError) {
        error!(url = %url, error = %error, "URL processing failed");
    }
}
