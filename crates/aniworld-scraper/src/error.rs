//! Error taxonomy for the extraction pipeline.
//!
//! Only conditions that abort processing are errors here. Missing optional
//! nodes (ParseGap) and failed ID lookups (LookupNotFound) are absorbed at
//! the extraction site as empty field values and never cross a function
//! boundary as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport failure or non-2xx status fetching a page.
    #[error("failed to fetch {url}")]
    FetchFailure {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A successfully fetched season page without a single structurally
    /// tagged episode row. Fatal for the URL; no partial output is written.
    #[error("no episode rows found on season page")]
    NoEpisodesFound,

    /// An episode row with fewer structural cells than the extraction rules
    /// read by position. Degrading here would pull hoster and language
    /// icons from the wrong columns, so this fails loudly instead.
    #[error("episode row {row} has {cells} cells, expected at least {expected}")]
    LayoutMismatch {
        row: usize,
        cells: usize,
        expected: usize,
    },
}
