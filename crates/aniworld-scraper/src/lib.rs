//! Aniworld season/episode extraction library.
//!
//! Extracts structured episode metadata and per-hoster redirect links from
//! the site's season and episode pages, enriches it with TMDB/IMDB
//! identifiers and serializes the result to per-season JSON records.
//!
//! The extraction functions in [`extract`] are pure functions over
//! already-fetched markup; all network access lives behind [`PageFetcher`]
//! and [`TmdbClient`].

pub mod api;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod pipeline;
pub mod progress;

pub use api::TmdbClient;
pub use error::ScrapeError;
pub use fetch::PageFetcher;
pub use output::RecordWriter;
pub use pipeline::{Pipeline, SeasonOutput};
pub use progress::{LogObserver, NullObserver, ProgressObserver};
