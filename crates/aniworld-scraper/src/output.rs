//! JSON persistence for extracted seasons.

use anyhow::{Context, Result};
use shared::{EpisodeRecord, SeasonEpisodes};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the per-season JSON files into a single output directory.
pub struct RecordWriter {
    out_dir: PathBuf,
}

impl RecordWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Write the redirect records for one season: one JSON object per
    /// episode, array per season.
    pub fn write_redirect_records(
        &self,
        season_number: &str,
        records: &[EpisodeRecord],
    ) -> Result<PathBuf> {
        let path = self
            .out_dir
            .join(format!("season_{}_redirects_custom.json", season_number));
        self.write_json(&path, &records)?;

        info!(
            path = %path.display(),
            records = records.len(),
            "Wrote redirect records"
        );
        Ok(path)
    }

    /// Write the simpler episode-list JSON for one season.
    pub fn write_episode_list(&self, list: &SeasonEpisodes) -> Result<PathBuf> {
        let path = self
            .out_dir
            .join(format!("season_{}_episodes.json", list.season));
        self.write_json(&path, list)?;

        info!(
            path = %path.display(),
            episodes = list.episodes.len(),
            "Wrote episode list"
        );
        Ok(path)
    }

    fn write_json<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.out_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.out_dir.display()
            )
        })?;

        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}
