//! Hoster-to-language-slot disambiguation.

use shared::LanguageSlot;
use std::collections::BTreeMap;

// Keyword markers checked by containment; the full flag titles vary across
// page variants.
const GERMAN_DUB_MARKER: &str = "Deutsch/German";
const GERMAN_SUB_MARKER: &str = "Mit deutschem Untertitel";
const ENGLISH_MARKER: &str = "Englisch";

/// Align the ordered hoster list against the ordered language list.
///
/// Walks both lists pairwise by index and classifies each language label by
/// keyword containment. The first hoster matched to a slot keeps it; later
/// pairs matching an already-filled slot are dropped.
///
/// If no pair matched any keyword, assignment falls back to pure position:
/// hoster 0 is the German dub, 1 the German sub, 2 the English sub. The
/// flag titles are not guaranteed to carry the expected keywords on every
/// page variant, and positional order is the site's documented but
/// unverified table convention.
pub fn map_hoster_languages(
    hosters: &[String],
    languages: &[String],
) -> BTreeMap<LanguageSlot, String> {
    let mut mapping = BTreeMap::new();

    for (hoster, language) in hosters.iter().zip(languages.iter()) {
        let slot = if language.contains(GERMAN_DUB_MARKER) {
            LanguageSlot::GermanDub
        } else if language.contains(GERMAN_SUB_MARKER) {
            LanguageSlot::GermanSub
        } else if language.contains(ENGLISH_MARKER) {
            LanguageSlot::EnglishSub
        } else {
            continue;
        };
        mapping.entry(slot).or_insert_with(|| hoster.clone());
    }

    if mapping.is_empty() {
        let positional = [
            LanguageSlot::GermanDub,
            LanguageSlot::GermanSub,
            LanguageSlot::EnglishSub,
        ];
        for (hoster, slot) in hosters.iter().zip(positional) {
            mapping.insert(slot, hoster.clone());
        }
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_mapping() {
        let hosters = strings(&["H1", "H2", "H3"]);
        let languages = strings(&["Deutsch/German", "Mit deutschem Untertitel", "Englisch"]);

        let mapping = map_hoster_languages(&hosters, &languages);

        assert_eq!(mapping[&LanguageSlot::GermanDub], "H1");
        assert_eq!(mapping[&LanguageSlot::GermanSub], "H2");
        assert_eq!(mapping[&LanguageSlot::EnglishSub], "H3");
    }

    #[test]
    fn test_positional_fallback() {
        let hosters = strings(&["A", "B"]);
        let languages = strings(&["??", "??"]);

        let mapping = map_hoster_languages(&hosters, &languages);

        assert_eq!(mapping[&LanguageSlot::GermanDub], "A");
        assert_eq!(mapping[&LanguageSlot::GermanSub], "B");
        // Only two hosters, so the English slot stays empty
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_first_match_per_slot_wins() {
        let hosters = strings(&["VOE", "Vidmoly"]);
        let languages = strings(&["Deutsch/German", "Deutsch/German"]);

        let mapping = map_hoster_languages(&hosters, &languages);

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping[&LanguageSlot::GermanDub], "VOE");
    }

    #[test]
    fn test_partial_keyword_match_disables_fallback() {
        // One keyword hit means the keyword path was taken; unmatched
        // hosters stay unassigned rather than falling back by position.
        let hosters = strings(&["A", "B"]);
        let languages = strings(&["??", "Englisch"]);

        let mapping = map_hoster_languages(&hosters, &languages);

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping[&LanguageSlot::EnglishSub], "B");
    }

    #[test]
    fn test_slot_count_invariant() {
        let hosters = strings(&["A", "B", "C", "D", "E"]);
        let languages = strings(&["x", "y", "z", "w", "v"]);

        let mapping = map_hoster_languages(&hosters, &languages);
        assert!(mapping.len() <= 3);
        assert!(mapping.len() <= hosters.len());
    }

    #[test]
    fn test_empty_inputs() {
        let mapping = map_hoster_languages(&[], &[]);
        assert!(mapping.is_empty());
    }
}
