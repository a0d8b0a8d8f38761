use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::lenient;

/// A catalog record, also the shape persisted for each favorite.
///
/// Field names on the wire are camelCase, matching the catalog dataset and
/// the records kept in the `favorites` slot. Every field tolerates being
/// absent or null.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    /// Thumbnail reference; empty means "derive from id"
    #[serde(default, alias = "thumbnailUrl", deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub view_count: u64,
    /// Publication date as stored (RFC 3339 or YYYY-MM-DD)
    #[serde(default, alias = "publishedDate", deserialize_with = "lenient::string")]
    pub date: String,
    #[serde(default, alias = "likeCount", deserialize_with = "lenient::count")]
    pub likes: u64,
    /// Pre-formatted, e.g. "12:34"
    #[serde(default, deserialize_with = "lenient::string")]
    pub duration: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub channel_name: String,
}

impl MediaItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Stored thumbnail when present, otherwise the player's still for this id.
    pub fn thumbnail_url(&self) -> String {
        if self.url.is_empty() {
            format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", self.id)
        } else {
            self.url.clone()
        }
    }

    /// Parse `date`, accepting a full timestamp or a bare calendar date.
    pub fn published_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        if raw.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc).date_naive())
            .ok()
            .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
    }
}
