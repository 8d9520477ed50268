//! The raw per-video input to the analytics engine.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// Public counters of a single video.
///
/// The YouTube API reports these as optional decimal strings. They are coerced into plain
/// counts at the boundary (see [`parse_count`]) so that nothing downstream has to deal with
/// missing or malformed numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub like_count: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub comment_count: u64,
}

impl VideoStats {
    pub fn new(view_count: u64, like_count: u64, comment_count: u64) -> Self {
        Self {
            view_count,
            like_count,
            comment_count,
        }
    }

    /// See [`crate::calculate_engagement_rate`].
    pub fn engagement_rate(&self) -> f64 {
        crate::calculate_engagement_rate(self.view_count, self.like_count, self.comment_count)
    }
}

impl AsRef<VideoStats> for VideoStats {
    fn as_ref(&self) -> &VideoStats {
        self
    }
}

/// A single video returned by a search, as supplied by the fetch layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub channel_id: String,
    #[serde(default)]
    pub channel_title: String,
    /// Display name of the video's category.
    #[serde(default = "unknown_category")]
    pub category: String,
    /// ISO 8601 duration, e.g. `PT4M13S`. Anything that is not a string reads as missing.
    #[serde(default, deserialize_with = "lenient_code")]
    pub duration_code: Option<String>,
    pub published_at: Timestamp,
    #[serde(flatten)]
    pub stats: VideoStats,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub has_captions: bool,
}

impl AsRef<VideoStats> for VideoRecord {
    fn as_ref(&self) -> &VideoStats {
        &self.stats
    }
}

fn unknown_category() -> String {
    String::from("Unknown")
}

/// Coerce an optional decimal count into a number, treating anything unusable as zero.
pub fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok()).unwrap_or(0)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Unsigned(u64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawCount>::deserialize(deserializer)? {
        Some(RawCount::Unsigned(n)) => n,
        Some(RawCount::Float(f)) if f.is_finite() && f > 0.0 => f as u64,
        Some(RawCount::Text(s)) => parse_count(Some(&s)),
        Some(RawCount::Float(_) | RawCount::Other(_)) | None => 0,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawCode>::deserialize(deserializer)? {
        Some(RawCode::Text(code)) => Some(code),
        Some(RawCode::Other(_)) | None => None,
    })
}
