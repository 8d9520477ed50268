//! Content duration parsing and classification.
//!
//! YouTube reports a video's length as an ISO 8601 duration restricted to the time part, such as
//! `PT1H2M3S`. Every component is optional, so `PT45S` and `PT10M` are both valid.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// The longest video (in seconds) that still counts as a Short.
pub const SHORTS_MAX_SECONDS: u64 = 60;

/// The longest video (in seconds) that still counts as mid-form content.
pub const MID_FORM_MAX_SECONDS: u64 = 600;

static DURATION_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("duration pattern is valid")
});

/// Duration-based content classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentBucket {
    /// At most one minute long.
    #[serde(rename = "Shorts")]
    Shorts,
    /// Longer than a minute, up to ten minutes.
    #[serde(rename = "Mid-form")]
    MidForm,
    /// Longer than ten minutes.
    #[serde(rename = "Long-form")]
    LongForm,
    /// The duration code was missing or could not be parsed.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ContentBucket {
    /// Classify a known duration.
    ///
    /// Never returns [`ContentBucket::Unknown`]; that state only comes out of
    /// [`DurationInfo::from_code`] when there was no duration to classify.
    pub fn from_seconds(seconds: u64) -> Self {
        if seconds <= SHORTS_MAX_SECONDS {
            ContentBucket::Shorts
        } else if seconds <= MID_FORM_MAX_SECONDS {
            ContentBucket::MidForm
        } else {
            ContentBucket::LongForm
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentBucket::Shorts => "Shorts",
            ContentBucket::MidForm => "Mid-form",
            ContentBucket::LongForm => "Long-form",
            ContentBucket::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ContentBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed length of a video and the bucket it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationInfo {
    pub total_seconds: u64,
    pub bucket: ContentBucket,
}

impl DurationInfo {
    /// An absent or unparseable duration.
    pub const UNKNOWN: Self = Self {
        total_seconds: 0,
        bucket: ContentBucket::Unknown,
    };

    /// Parse a duration code, degrading to [`DurationInfo::UNKNOWN`] on bad input.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.and_then(parse_components) {
            Some(total_seconds) => Self {
                total_seconds,
                bucket: ContentBucket::from_seconds(total_seconds),
            },
            None => Self::UNKNOWN,
        }
    }
}

/// Total number of seconds in a `PT[nH][nM][nS]` duration code.
///
/// Missing or malformed codes yield `0`.
pub fn parse_duration_seconds(code: Option<&str>) -> u64 {
    code.and_then(parse_components).unwrap_or(0)
}

fn parse_components(code: &str) -> Option<u64> {
    let captures = DURATION_CODE.captures(code.trim())?;

    // "PT" on its own matches the pattern but says nothing about the length.
    if captures.iter().skip(1).all(|group| group.is_none()) {
        return None;
    }

    let component = |index: usize| -> Option<u64> {
        match captures.get(index) {
            Some(group) => group.as_str().parse::<u64>().ok(),
            None => Some(0),
        }
    };

    let hours = component(1)?;
    let minutes = component(2)?;
    let seconds = component(3)?;

    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}
