//! Content gap detection: which categories and formats are missing from a result set.

use crate::duration::{MID_FORM_MAX_SECONDS, SHORTS_MAX_SECONDS};
use indexmap::IndexMap;
use serde::Serialize;

/// Categories with a smaller share of the results than this are underrepresented.
pub const UNDERREPRESENTED_SHARE: f64 = 0.10;

/// Suggest Shorts when there are fewer than this many per mid-form video.
const SHORTS_TO_MID_FORM_RATIO: f64 = 0.3;

/// Suggest long-form content when there are fewer than this many per mid-form video.
const LONG_FORM_TO_MID_FORM_RATIO: f64 = 0.2;

/// Number of videos in each duration bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationDistribution {
    pub shorts: usize,
    pub mid_form: usize,
    pub long_form: usize,
}

impl DurationDistribution {
    /// Tally one video.
    ///
    /// Videos without a known duration arrive here as 0 seconds and count as Shorts, so that
    /// the buckets always add up to the number of videos.
    fn record(&mut self, duration_seconds: u64) {
        if duration_seconds <= SHORTS_MAX_SECONDS {
            self.shorts += 1;
        } else if duration_seconds <= MID_FORM_MAX_SECONDS {
            self.mid_form += 1;
        } else {
            self.long_form += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.shorts + self.mid_form + self.long_form
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentGaps {
    /// Category name to number of videos, in order of first appearance.
    pub category_distribution: IndexMap<String, usize>,
    pub duration_distribution: DurationDistribution,
    /// In order of first appearance.
    pub underrepresented_categories: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Look for formats and categories that are thin on the ground for `query`.
///
/// `videos` yields each video's category and duration in seconds.
pub fn analyze_content_gaps<'a, I>(videos: I, query: &str) -> ContentGaps
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut category_distribution: IndexMap<String, usize> = IndexMap::new();
    let mut duration_distribution = DurationDistribution::default();

    for (category, duration_seconds) in videos {
        *category_distribution.entry(category.to_string()).or_insert(0) += 1;
        duration_distribution.record(duration_seconds);
    }

    let total = duration_distribution.total();
    let underrepresented_categories: Vec<String> = if total == 0 {
        Vec::new()
    } else {
        category_distribution
            .iter()
            .filter(|&(_, &count)| (count as f64 / total as f64) < UNDERREPRESENTED_SHARE)
            .map(|(category, _)| category.clone())
            .collect()
    };

    let DurationDistribution {
        shorts,
        mid_form,
        long_form,
    } = duration_distribution;

    let mut suggestions = Vec::new();
    if (shorts as f64) < mid_form as f64 * SHORTS_TO_MID_FORM_RATIO {
        suggestions.push(format!(
            "Create short-form content (60 seconds or less) about \"{query}\": \
            Shorts are underrepresented in these results"
        ));
    }
    if (long_form as f64) < mid_form as f64 * LONG_FORM_TO_MID_FORM_RATIO {
        suggestions.push(format!(
            "Long-form opportunity: few videos over 10 minutes cover \"{query}\" in depth"
        ));
    }
    for category in &underrepresented_categories {
        suggestions.push(format!(
            "Low competition for \"{query}\" in the {category} category"
        ));
    }

    tracing::trace!(
        videos = total,
        categories = category_distribution.len(),
        underrepresented = underrepresented_categories.len(),
        suggestions = suggestions.len(),
        "analyzed content gaps"
    );

    ContentGaps {
        category_distribution,
        duration_distribution,
        underrepresented_categories,
        suggestions,
    }
}
