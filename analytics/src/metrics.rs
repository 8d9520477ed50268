//! Per-video engagement metrics.

use crate::record::VideoStats;
use serde::{Deserialize, Serialize};

/// Engagement rate (in percent) above which a video counts as highly engaging.
pub const DEFAULT_HIGH_ENGAGEMENT_THRESHOLD: f64 = 2.0;

/// Likes plus comments as a percentage of views.
///
/// Zero when there are no views.
pub fn calculate_engagement_rate(views: u64, likes: u64, comments: u64) -> f64 {
    percent_of(likes.saturating_add(comments), views)
}

// Multiplying before dividing keeps whole-number results exact (60 of 1000 is exactly 6%).
pub(crate) fn percent_of(part: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / views as f64
}

/// Rates derived from a video's public counters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetrics {
    /// `(likes + comments) / views`, in percent.
    pub engagement_rate: f64,
    /// `likes / views`, in percent.
    pub like_rate: f64,
    /// `comments / views`, in percent.
    pub comment_rate: f64,
    pub views_per_second: f64,
    pub is_high_engagement: bool,
}

impl EngagementMetrics {
    pub fn compute(stats: &VideoStats, duration_seconds: u64, high_engagement_threshold: f64) -> Self {
        let engagement_rate = stats.engagement_rate();
        let views_per_second = if duration_seconds > 0 {
            stats.view_count as f64 / duration_seconds as f64
        } else {
            0.0
        };

        Self {
            engagement_rate,
            like_rate: percent_of(stats.like_count, stats.view_count),
            comment_rate: percent_of(stats.comment_count, stats.view_count),
            views_per_second,
            is_high_engagement: engagement_rate > high_engagement_threshold,
        }
    }
}
