//! Episode row extraction from the season page table.

use crate::error::ScrapeError;
use crate::extract::mapper::map_hoster_languages;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use shared::Episode;
use url::Url;

static EPISODE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"tr[itemprop="episode"]"#).unwrap());
static EPISODE_NUMBER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[itemprop="episodeNumber"]"#).unwrap());
static EPISODE_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"a[itemprop="url"]"#).unwrap());
static TITLE_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td.seasonEpisodeTitle").unwrap());
static GERMAN_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("strong").unwrap());
static ENGLISH_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("span").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());
static HOSTER_ICON: Lazy<Selector> = Lazy::new(|| Selector::parse("i.icon").unwrap());
static LANGUAGE_FLAG: Lazy<Selector> = Lazy::new(|| Selector::parse("img.flag").unwrap());

// English titles carry a trailing "[Episode N]" suffix
static EPISODE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.+?)\s*\[Episode\s*\d+\]").unwrap());

/// Columns an episode row must expose: the hoster and language icon cells
/// are read by position after the link/title cells.
const MIN_ROW_CELLS: usize = 4;
const HOSTER_CELL: usize = 2;
const LANGUAGE_CELL: usize = 3;

/// Extract all episode rows in document order (the canonical episode order).
///
/// A row missing its episode number or titles is still emitted with those
/// fields unset. Zero rows on an otherwise fetched page is a hard error for
/// the whole page.
pub fn extract_episodes(document: &Html, base_url: &Url) -> Result<Vec<Episode>, ScrapeError> {
    let mut episodes = Vec::new();

    for (index, row) in document.select(&EPISODE_ROW).enumerate() {
        episodes.push(extract_row(index, row, base_url)?);
    }

    if episodes.is_empty() {
        return Err(ScrapeError::NoEpisodesFound);
    }

    Ok(episodes)
}

fn extract_row(index: usize, row: ElementRef<'_>, base_url: &Url) -> Result<Episode, ScrapeError> {
    let number = row
        .select(&EPISODE_NUMBER)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(str::to_string);

    let detail_url = row
        .select(&EPISODE_LINK)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .and_then(|href| base_url.join(href).ok())
        .map(|url| url.to_string())
        .unwrap_or_default();

    let (german_title, english_title) = row
        .select(&TITLE_CELL)
        .next()
        .map(extract_titles)
        .unwrap_or((None, None));

    // The hoster and language columns are addressed by index. A row with
    // fewer cells means the site layout no longer matches the extraction
    // rules, and reading from the wrong columns would corrupt the slot
    // assignment, so this is the one condition that fails loudly.
    let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
    if cells.len() < MIN_ROW_CELLS {
        return Err(ScrapeError::LayoutMismatch {
            row: index,
            cells: cells.len(),
            expected: MIN_ROW_CELLS,
        });
    }

    let hosters = icon_titles(cells[HOSTER_CELL], &HOSTER_ICON);
    let languages = icon_titles(cells[LANGUAGE_CELL], &LANGUAGE_FLAG);
    let language_slots = map_hoster_languages(&hosters, &languages);

    Ok(Episode {
        number,
        detail_url,
        german_title,
        english_title,
        hosters,
        languages,
        language_slots,
    })
}

/// German title from the row's emphasis node, English title from the
/// secondary span with its bracketed episode-number suffix stripped. A
/// suffix that does not match the pattern is kept verbatim.
fn extract_titles(cell: ElementRef<'_>) -> (Option<String>, Option<String>) {
    let german = cell
        .select(&GERMAN_TITLE)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    let english = cell
        .select(&ENGLISH_TITLE)
        .next()
        .map(|element| {
            let text = element.text().collect::<String>().trim().to_string();
            match EPISODE_SUFFIX.captures(&text) {
                Some(caps) => caps[1].trim().to_string(),
                None => text,
            }
        })
        .filter(|title| !title.is_empty());

    (german, english)
}

fn icon_titles(cell: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    cell.select(selector)
        .filter_map(|icon| icon.value().attr("title"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::LanguageSlot;

    fn base() -> Url {
        Url::parse("https://aniworld.to").unwrap()
    }

    const SEASON_TABLE: &str = r#"
        <html><body><table><tbody>
            <tr itemprop="episode">
                <td>
                    <meta itemprop="episodeNumber" content="1">
                    <a itemprop="url" href="/anime/stream/x/episode-1">1</a>
                </td>
                <td class="seasonEpisodeTitle">
                    <a itemprop="url" href="/anime/stream/x/episode-1">
                        <strong>Der Anfang</strong>
                        <span>The Beginning [Episode 1]</span>
                    </a>
                </td>
                <td>
                    <i class="icon" title="VOE"></i>
                    <i class="icon" title="Vidmoly"></i>
                    <i class="icon" title="Filemoon"></i>
                </td>
                <td>
                    <img class="flag" title="Deutsch/German">
                    <img class="flag" title="Mit deutschem Untertitel">
                    <img class="flag" title="Englisch">
                </td>
            </tr>
            <tr itemprop="episode">
                <td><a itemprop="url" href="/anime/stream/x/episode-2">2</a></td>
                <td class="seasonEpisodeTitle">
                    <span>Strange Title</span>
                </td>
                <td><i class="icon" title="VOE"></i></td>
                <td><img class="flag" title="Unbekannt"></td>
            </tr>
        </tbody></table></body></html>
    "#;

    #[test]
    fn test_extracts_rows_in_document_order() {
        let document = Html::parse_document(SEASON_TABLE);
        let episodes = extract_episodes(&document, &base()).unwrap();

        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].number.as_deref(), Some("1"));
        assert_eq!(
            episodes[0].detail_url,
            "https://aniworld.to/anime/stream/x/episode-1"
        );
        assert_eq!(episodes[0].german_title.as_deref(), Some("Der Anfang"));
        // "[Episode 1]" suffix stripped
        assert_eq!(episodes[0].english_title.as_deref(), Some("The Beginning"));
        assert_eq!(episodes[0].hosters, vec!["VOE", "Vidmoly", "Filemoon"]);
        assert_eq!(
            episodes[0].languages,
            vec!["Deutsch/German", "Mit deutschem Untertitel", "Englisch"]
        );
        assert_eq!(episodes[0].language_slots[&LanguageSlot::GermanDub], "VOE");
        assert_eq!(
            episodes[0].language_slots[&LanguageSlot::EnglishSub],
            "Filemoon"
        );
    }

    #[test]
    fn test_row_without_number_is_kept() {
        let document = Html::parse_document(SEASON_TABLE);
        let episodes = extract_episodes(&document, &base()).unwrap();

        assert_eq!(episodes[1].number, None);
        assert_eq!(episodes[1].german_title, None);
        // No suffix pattern, raw text kept verbatim
        assert_eq!(episodes[1].english_title.as_deref(), Some("Strange Title"));
        // No keyword match, single hoster falls back to the dub slot
        assert_eq!(episodes[1].language_slots[&LanguageSlot::GermanDub], "VOE");
    }

    #[test]
    fn test_zero_rows_is_a_hard_error() {
        let document = Html::parse_document("<html><body><table></table></body></html>");
        let result = extract_episodes(&document, &base());
        assert!(matches!(result, Err(ScrapeError::NoEpisodesFound)));
    }

    #[test]
    fn test_missing_cells_fail_fast() {
        let html = r#"
            <html><body><table><tbody>
                <tr itemprop="episode">
                    <td><a itemprop="url" href="/anime/stream/x/episode-1">1</a></td>
                    <td class="seasonEpisodeTitle"><strong>Titel</strong></td>
                </tr>
            </tbody></table></body></html>
        "#;
        let document = Html::parse_document(html);
        let result = extract_episodes(&document, &base());
        assert!(matches!(
            result,
            Err(ScrapeError::LayoutMismatch {
                row: 0,
                cells: 2,
                expected: 4
            })
        ));
    }

    #[test]
    fn test_relative_href_resolution() {
        let document = Html::parse_document(SEASON_TABLE);
        let episodes = extract_episodes(&document, &base()).unwrap();
        assert_eq!(
            episodes[1].detail_url,
            "https://aniworld.to/anime/stream/x/episode-2"
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = extract_episodes(&Html::parse_document(SEASON_TABLE), &base()).unwrap();
        let second = extract_episodes(&Html::parse_document(SEASON_TABLE), &base()).unwrap();
        assert_eq!(first, second);
    }
}
