//! Anime identity extraction: main title, URL slug, IMDB meta scan.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static DOC_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static META: Lazy<Selector> = Lazy::new(|| Selector::parse("meta").unwrap());

static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"/anime/stream/([^/]+)").unwrap());
static IMDB_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"tt(\d+)").unwrap());

/// Main series title: first of the primary heading and the document title
/// that exists with non-empty text, else empty.
pub fn extract_main_title(document: &Html) -> String {
    for selector in [&*HEADING, &*DOC_TITLE] {
        if let Some(element) = document.select(selector).next() {
            let text = element.text().collect::<String>().trim().to_string();
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Site-local series identifier from the URL path. URLs not shaped like
/// `/anime/stream/<slug>` yield an empty slug, which skips ID lookup
/// downstream.
pub fn extract_slug(url: &str) -> String {
    SLUG_PATTERN
        .captures(url)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// Turn a URL slug into a TMDB search query: hyphens become spaces and
/// each word is title-cased (`attack-on-titan` -> `Attack On Titan`).
pub fn search_query_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Scan meta node content attributes for an IMDB title URL and extract the
/// numeric ID. First match wins, the scan stops there.
pub fn extract_imdb_id(document: &Html) -> String {
    for meta in document.select(&META) {
        let Some(content) = meta.value().attr("content") else {
            continue;
        };
        if !content.contains("imdb.com/title/tt") {
            continue;
        }
        if let Some(caps) = IMDB_PATTERN.captures(content) {
            return format!("tt{}", &caps[1]);
        }
    }
    String::new()
}
