//! Wire-level result records returned by the search provider.

use serde::{Deserialize, Serialize};

/// Category discriminator carried by every provider record.
///
/// The wire format uses human-readable strings (`"TV"`, `"Movie"`,
/// `"TV Special"`); anything else is preserved verbatim in `Other` so
/// unknown categories survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnimeCategory {
    Tv,
    Movie,
    TvSpecial,
    Other(String),
}

impl AnimeCategory {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tv => "TV",
            Self::Movie => "Movie",
            Self::TvSpecial => "TV Special",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AnimeCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "TV" => Self::Tv,
            "Movie" => Self::Movie,
            "TV Special" => Self::TvSpecial,
            _ => Self::Other(s),
        }
    }
}

impl From<AnimeCategory> for String {
    fn from(c: AnimeCategory) -> Self {
        match c {
            AnimeCategory::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// One search result record.
///
/// Providers attach many fields beyond the ones the application reads;
/// those land in `extra` so records can be re-serialized without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeRecord {
    pub mal_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub title_english: Option<String>,
    #[serde(rename = "type", default)]
    pub category: Option<AnimeCategory>,
    #[serde(default)]
    pub episodes: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AnimeRecord {
    /// English title when present and non-blank, else the romaji title.
    /// `None` means the record has nothing usable to display.
    pub fn display_title(&self) -> Option<&str> {
        for candidate in [self.title_english.as_deref(), self.title.as_deref()] {
            if let Some(t) = candidate
                && !t.trim().is_empty()
            {
                return Some(t);
            }
        }
        None
    }
}

/// Envelope the provider wraps result pages in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub data: Vec<AnimeRecord>,
}
