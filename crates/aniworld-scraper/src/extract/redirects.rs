//! Redirect link extraction from episode detail pages.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use shared::{Hoster, RedirectSet, LANG_DE_DUB, LANG_DE_SUB, LANG_EN};
use url::Url;

static LINK_TARGET_ITEM: Lazy<Selector> =
    Lazy::new(|| Selector::parse("li[data-link-target]").unwrap());
static HOSTER_ICON: Lazy<Selector> = Lazy::new(|| Selector::parse("i.icon").unwrap());

/// The site's `data-lang-key` attribute values. Keys outside this set are
/// ignored.
fn lang_key_index(key: &str) -> Option<usize> {
    match key {
        "2" => Some(LANG_EN),
        "1" => Some(LANG_DE_DUB),
        "3" => Some(LANG_DE_SUB),
        _ => None,
    }
}

/// Distribute the page's redirect anchors into fixed (hoster, language)
/// slots.
///
/// Items without a hoster icon are unidentifiable and skipped; hosters
/// matching none of the supported markers are dropped by design. Later
/// items targeting an already-filled slot overwrite it (last wins, document
/// order).
pub fn extract_redirects(document: &Html, base_url: &Url) -> RedirectSet {
    let mut redirects = RedirectSet::default();

    for item in document.select(&LINK_TARGET_ITEM) {
        let Some(icon) = item.select(&HOSTER_ICON).next() else {
            continue;
        };
        let Some(hoster) = icon
            .value()
            .attr("title")
            .map(str::trim)
            .and_then(Hoster::from_icon_title)
        else {
            continue;
        };
        let Some(lang) = item.value().attr("data-lang-key").and_then(lang_key_index) else {
            continue;
        };
        let Some(target) = item.value().attr("data-link-target") else {
            continue;
        };
        // An empty attribute would join to the bare base URL
        if target.is_empty() {
            continue;
        }
        let Ok(link) = base_url.join(target) else {
            continue;
        };

        *redirects.slot_mut(hoster, lang) = link.to_string();
    }

    redirects
}
