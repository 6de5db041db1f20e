//! Data models for the extraction pipeline.
//!
//! These are the fixed record shapes the scraper produces. Episodes and
//! records are built once per extraction pass and never mutated afterwards;
//! there are no timestamps or other hidden fields, so re-running extraction
//! over identical markup yields identical output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Season title and number as shown on a season page.
///
/// Either field can be missing on the page; that is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonInfo {
    pub title: Option<String>,
    pub number: Option<String>,
}

impl SeasonInfo {
    /// Season number with the site's implicit default of "1"
    /// (series pages without a `/staffel-n` suffix are season one).
    pub fn number_or_default(&self) -> String {
        self.number.clone().unwrap_or_else(|| "1".to_string())
    }
}

/// Series-level identity.
///
/// Empty ID strings mean "unresolved", which is a valid terminal state,
/// not an error. `slug` is derived from the input URL path and drives the
/// TMDB title search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimeIdentity {
    pub main_title: String,
    pub tmdb_id: String,
    pub imdb_id: String,
    pub slug: String,
}

/// The three named language slots an episode row can advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LanguageSlot {
    /// German dub
    #[serde(rename = "german_video")]
    GermanDub,
    /// Original audio with German subtitles
    #[serde(rename = "original_with_german_sub_video")]
    GermanSub,
    /// Original audio with English subtitles
    #[serde(rename = "original_with_english_sub_video")]
    EnglishSub,
}

impl LanguageSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageSlot::GermanDub => "german_video",
            LanguageSlot::GermanSub => "original_with_german_sub_video",
            LanguageSlot::EnglishSub => "original_with_english_sub_video",
        }
    }
}

impl std::fmt::Display for LanguageSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single episode row from the season page table.
///
/// `hosters` and `languages` keep the on-page icon order; `language_slots`
/// is the disambiguated mapping derived from them. Only the fields the
/// episode-list JSON carries are serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Episode {
    #[serde(rename = "episode_number")]
    pub number: Option<String>,
    #[serde(rename = "url")]
    pub detail_url: String,
    #[serde(rename = "german")]
    pub german_title: Option<String>,
    #[serde(rename = "english")]
    pub english_title: Option<String>,
    #[serde(skip)]
    pub hosters: Vec<String>,
    #[serde(skip)]
    pub languages: Vec<String>,
    #[serde(flatten)]
    pub language_slots: BTreeMap<LanguageSlot, String>,
}

/// The hosters redirect extraction supports. Anything else on the page is
/// excluded by design, not a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hoster {
    Voe,
    Vidmoly,
    Filemoon,
}

impl Hoster {
    /// Classify a hoster icon title by substring marker, first marker wins.
    pub fn from_icon_title(title: &str) -> Option<Self> {
        if title.contains("VOE") {
            Some(Hoster::Voe)
        } else if title.contains("Filemoon") {
            Some(Hoster::Filemoon)
        } else if title.contains("Vidmoly") {
            Some(Hoster::Vidmoly)
        } else {
            None
        }
    }
}

/// Slot order within each hoster's link array.
pub const LANG_EN: usize = 0;
pub const LANG_DE_DUB: usize = 1;
pub const LANG_DE_SUB: usize = 2;

/// Per-hoster redirect links for one episode, slot order
/// `[EN, DE_DUB, DE_SUB]`. Empty string = no link on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectSet {
    pub voe: [String; 3],
    pub vidmoly: [String; 3],
    pub filemoon: [String; 3],
}

impl RedirectSet {
    pub fn links(&self, hoster: Hoster) -> &[String; 3] {
        match hoster {
            Hoster::Voe => &self.voe,
            Hoster::Vidmoly => &self.vidmoly,
            Hoster::Filemoon => &self.filemoon,
        }
    }

    pub fn slot_mut(&mut self, hoster: Hoster, lang: usize) -> &mut String {
        let links = match hoster {
            Hoster::Voe => &mut self.voe,
            Hoster::Vidmoly => &mut self.vidmoly,
            Hoster::Filemoon => &mut self.filemoon,
        };
        &mut links[lang]
    }

    pub fn is_empty(&self) -> bool {
        self.voe
            .iter()
            .chain(self.vidmoly.iter())
            .chain(self.filemoon.iter())
            .all(String::is_empty)
    }
}

/// Final persisted unit, one per episode.
///
/// The field names (including the inherited misspellings) are a persisted
/// contract with downstream consumers and must stay bit-exact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub main_title: String,
    pub tmdb_id: String,
    pub imdb_id: String,
    #[serde(rename = "ORIGINAL_serial number")]
    pub original_serial_number: String,
    #[serde(rename = "Sesson_number")]
    pub season_number: String,
    pub episode_number: String,
    pub original_url: String,
    pub german_title: String,
    pub english_title: String,
    #[serde(rename = "german_video_URL_VOE_En_Link")]
    pub voe_en_link: String,
    #[serde(rename = "german_video_URL_VOE_De_Dub_Link")]
    pub voe_de_dub_link: String,
    #[serde(rename = "german_video_URL_VOE_Original_lang_De_Sub_Link")]
    pub voe_de_sub_link: String,
    #[serde(rename = "german_video_URL_VIDMOLY_En_Link")]
    pub vidmoly_en_link: String,
    #[serde(rename = "german_video_URL_VIDMOLY_De_Dub_Link")]
    pub vidmoly_de_dub_link: String,
    #[serde(rename = "german_video_URL_VIDMOLY_Original_lang_De_Sub_Link")]
    pub vidmoly_de_sub_link: String,
    #[serde(rename = "german_video_URL_FILEMOON_En_Link")]
    pub filemoon_en_link: String,
    #[serde(rename = "german_video_URL_FILEMOON_De_Dub_Link")]
    pub filemoon_de_dub_link: String,
    #[serde(rename = "german_video_URL_FILEMOON_Original_lang_De_Sub_Link")]
    pub filemoon_de_sub_link: String,
}

impl EpisodeRecord {
    /// Flatten identity, season, episode and redirect data into one record.
    ///
    /// Redirect fields default to empty strings when extraction did not run
    /// for the episode.
    pub fn assemble(
        identity: &AnimeIdentity,
        season_number: &str,
        episode: &Episode,
        redirects: &RedirectSet,
    ) -> Self {
        let number = episode.number.clone().unwrap_or_default();
        let voe = redirects.links(Hoster::Voe);
        let vidmoly = redirects.links(Hoster::Vidmoly);
        let filemoon = redirects.links(Hoster::Filemoon);
        Self {
            main_title: identity.main_title.clone(),
            tmdb_id: identity.tmdb_id.clone(),
            imdb_id: identity.imdb_id.clone(),
            original_serial_number: number.clone(),
            season_number: season_number.to_string(),
            episode_number: number,
            original_url: episode.detail_url.clone(),
            german_title: episode.german_title.clone().unwrap_or_default(),
            english_title: episode.english_title.clone().unwrap_or_default(),
            voe_en_link: voe[LANG_EN].clone(),
            voe_de_dub_link: voe[LANG_DE_DUB].clone(),
            voe_de_sub_link: voe[LANG_DE_SUB].clone(),
            vidmoly_en_link: vidmoly[LANG_EN].clone(),
            vidmoly_de_dub_link: vidmoly[LANG_DE_DUB].clone(),
            vidmoly_de_sub_link: vidmoly[LANG_DE_SUB].clone(),
            filemoon_en_link: filemoon[LANG_EN].clone(),
            filemoon_de_dub_link: filemoon[LANG_DE_DUB].clone(),
            filemoon_de_sub_link: filemoon[LANG_DE_SUB].clone(),
        }
    }
}

/// The simpler per-season episode-list output, emitted independently of the
/// redirect records.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonEpisodes {
    pub season: u32,
    pub episodes: Vec<Episode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_slot_names() {
        assert_eq!(LanguageSlot::GermanDub.as_str(), "german_video");
        assert_eq!(
            LanguageSlot::GermanSub.as_str(),
            "original_with_german_sub_video"
        );
        assert_eq!(
            LanguageSlot::EnglishSub.as_str(),
            "original_with_english_sub_video"
        );
    }

    #[test]
    fn test_hoster_classification() {
        assert_eq!(Hoster::from_icon_title("VOE Stream"), Some(Hoster::Voe));
        assert_eq!(Hoster::from_icon_title("Vidmoly HD"), Some(Hoster::Vidmoly));
        assert_eq!(Hoster::from_icon_title("Filemoon"), Some(Hoster::Filemoon));
        assert_eq!(Hoster::from_icon_title("Streamtape"), None);
    }

    #[test]
    fn test_record_field_names_are_bit_exact() {
        let record = EpisodeRecord::default();
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();

        for key in [
            "main_title",
            "tmdb_id",
            "imdb_id",
            "ORIGINAL_serial number",
            "Sesson_number",
            "episode_number",
            "original_url",
            "german_title",
            "english_title",
            "german_video_URL_VOE_En_Link",
            "german_video_URL_VOE_De_Dub_Link",
            "german_video_URL_VOE_Original_lang_De_Sub_Link",
            "german_video_URL_VIDMOLY_En_Link",
            "german_video_URL_VIDMOLY_De_Dub_Link",
            "german_video_URL_VIDMOLY_Original_lang_De_Sub_Link",
            "german_video_URL_FILEMOON_En_Link",
            "german_video_URL_FILEMOON_De_Dub_Link",
            "german_video_URL_FILEMOON_Original_lang_De_Sub_Link",
        ] {
            assert!(obj.contains_key(key), "missing record field: {key}");
        }
        assert_eq!(obj.len(), 18);
    }

    #[test]
    fn test_episode_serialization_flattens_slots() {
        let mut episode = Episode {
            number: Some("5".to_string()),
            detail_url: "https://aniworld.to/anime/stream/x/episode-5".to_string(),
            german_title: Some("Titel".to_string()),
            english_title: Some("Title".to_string()),
            ..Default::default()
        };
        episode
            .language_slots
            .insert(LanguageSlot::GermanDub, "VOE".to_string());

        let json = serde_json::to_value(&episode).unwrap();
        assert_eq!(json["episode_number"], "5");
        assert_eq!(json["german_video"], "VOE");
        // Raw icon lists stay internal
        assert!(json.get("hosters").is_none());
    }

    #[test]
    fn test_assemble_defaults_missing_fields() {
        let identity = AnimeIdentity {
            main_title: "Naruto".to_string(),
            ..Default::default()
        };
        let episode = Episode {
            detail_url: "https://aniworld.to/anime/stream/naruto/episode-1".to_string(),
            ..Default::default()
        };
        let record = EpisodeRecord::assemble(&identity, "1", &episode, &RedirectSet::default());

        assert_eq!(record.main_title, "Naruto");
        assert_eq!(record.episode_number, "");
        assert_eq!(record.original_serial_number, "");
        assert_eq!(record.german_title, "");
        assert_eq!(record.voe_en_link, "");
    }

    #[test]
    fn test_assemble_maps_redirect_slots() {
        let mut redirects = RedirectSet::default();
        *redirects.slot_mut(Hoster::Voe, LANG_DE_DUB) = "https://a/voe".to_string();
        *redirects.slot_mut(Hoster::Filemoon, LANG_EN) = "https://a/fm".to_string();

        let record = EpisodeRecord::assemble(
            &AnimeIdentity::default(),
            "1",
            &Episode::default(),
            &redirects,
        );

        assert_eq!(record.voe_de_dub_link, "https://a/voe");
        assert_eq!(record.filemoon_en_link, "https://a/fm");
        assert_eq!(record.voe_en_link, "");
        assert_eq!(record.vidmoly_de_sub_link, "");
    }

    #[test]
    fn test_season_number_default() {
        assert_eq!(SeasonInfo::default().number_or_default(), "1");
        let info = SeasonInfo {
            number: Some("3".to_string()),
            ..Default::default()
        };
        assert_eq!(info.number_or_default(), "3");
    }
}
