//! Page-to-record extraction.
//!
//! Every function in here is a pure function over already-parsed markup;
//! fetching and ID lookup live elsewhere so these stay testable without
//! network access.

pub mod episodes;
pub mod identity;
pub mod mapper;
pub mod redirects;
pub mod season;

pub use episodes::extract_episodes;
pub use identity::{extract_imdb_id, extract_main_title, extract_slug, search_query_from_slug};
pub use mapper::map_hoster_languages;
pub use redirects::extract_redirects;
pub use season::extract_season_info;
