//! Season title and number extraction.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use shared::SeasonInfo;

static SEASON_NAME: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[itemprop="name"]"#).unwrap());
static SEASON_NUMBER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[itemprop="seasonNumber"]"#).unwrap());

/// Pull season title and number from the page's marked container nodes.
/// Absence of either yields `None` for that field, never an error.
pub fn extract_season_info(document: &Html) -> SeasonInfo {
    let title = document
        .select(&SEASON_NAME)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    let number = document
        .select(&SEASON_NUMBER)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string);

    SeasonInfo { title, number }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_title_and_number() {
        let html = r#"
            <html><body>
                <div itemprop="name">Staffel 2</div>
                <meta itemprop="seasonNumber" content="2">
            </body></html>
        "#;
        let document = Html::parse_document(html);
        let info = extract_season_info(&document);

        assert_eq!(info.title.as_deref(), Some("Staffel 2"));
        assert_eq!(info.number.as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_nodes_yield_none() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let info = extract_season_info(&document);

        assert_eq!(info.title, None);
        assert_eq!(info.number, None);
        assert_eq!(info.number_or_default(), "1");
    }
}
