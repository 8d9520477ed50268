//! Analytics for YouTube search results.
//!
//! The engine works in two passes over a set of [`VideoRecord`]s:
//!
//! 1. [`enrich`] derives everything that can be known about a single video: its duration and
//!    [`ContentBucket`], [`EngagementMetrics`], [`VelocityMetrics`], hashtags, and a
//!    [`performance_score`].
//! 2. [`analyze`] folds the enriched set into an [`AnalysisSummary`]: trending videos, upload
//!    timing patterns, and content-gap suggestions for the search query.
//!
//! Nothing here performs I/O or reads the clock. The current time and the time zone that
//! upload patterns are reported in are always passed in by the caller, and bad input data
//! (missing durations, zero views) degrades to zeroes rather than errors.
//!
//! ```
//! use jiff::{Timestamp, tz::TimeZone};
//! use youtube_analytics::{AnalysisConfig, VideoRecord, VideoStats, analyze, enrich};
//!
//! let record = VideoRecord {
//!     video_id: "dQw4w9WgXcQ".into(),
//!     title: "Learning #Rust".into(),
//!     description: String::new(),
//!     channel_id: "UC123".into(),
//!     channel_title: "Some Channel".into(),
//!     category: "Education".into(),
//!     duration_code: Some("PT8M20S".into()),
//!     published_at: "2024-03-04T09:00:00Z".parse().unwrap(),
//!     stats: VideoStats::new(1000, 50, 10),
//!     tags: vec![],
//!     has_captions: true,
//! };
//!
//! let config = AnalysisConfig::default();
//! let now: Timestamp = "2024-03-05T09:00:00Z".parse().unwrap();
//! let video = enrich(record, None, now, &config);
//! assert_eq!(video.engagement.engagement_rate, 6.0);
//!
//! let summary = analyze(&[video], "rust", &config, &TimeZone::UTC);
//! assert_eq!(summary.upload_patterns.best_upload_day, Some("Monday"));
//! assert_eq!(summary.trending_videos.len(), 1);
//! ```

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;
use std::collections::BTreeSet;

mod config;
pub mod duration;
pub mod gaps;
pub mod hashtags;
pub mod metrics;
pub mod patterns;
mod record;
pub mod score;
pub mod trending;
pub mod velocity;

pub use config::{AnalysisConfig, AnalysisConfigBuilder, AnalysisConfigBuilderError};
pub use duration::{ContentBucket, DurationInfo, parse_duration_seconds};
pub use gaps::{ContentGaps, DurationDistribution, analyze_content_gaps};
pub use hashtags::extract_hashtags;
pub use metrics::{EngagementMetrics, calculate_engagement_rate};
pub use patterns::{UploadPatterns, analyze_upload_patterns};
pub use record::{VideoRecord, VideoStats, parse_count};
pub use score::{PerformanceInput, performance_score};
pub use trending::identify_trending;
pub use velocity::VelocityMetrics;

/// A video together with everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedVideo {
    #[serde(flatten)]
    pub record: VideoRecord,
    /// Subscribers of the uploading channel, if the channel shows them.
    pub subscriber_count: Option<u64>,
    pub duration: DurationInfo,
    pub engagement: EngagementMetrics,
    pub velocity: VelocityMetrics,
    pub hashtags: BTreeSet<String>,
    pub performance_score: u8,
}

impl AsRef<VideoStats> for EnrichedVideo {
    fn as_ref(&self) -> &VideoStats {
        &self.record.stats
    }
}

/// Derive the per-video metrics for `record` as of `now`.
pub fn enrich(
    record: VideoRecord,
    subscriber_count: Option<u64>,
    now: Timestamp,
    config: &AnalysisConfig,
) -> EnrichedVideo {
    let duration = DurationInfo::from_code(record.duration_code.as_deref());
    let engagement = EngagementMetrics::compute(
        &record.stats,
        duration.total_seconds,
        config.high_engagement_threshold,
    );
    let velocity = VelocityMetrics::compute(record.stats.view_count, record.published_at, now);
    let hashtags = extract_hashtags(&record.title, &record.description);
    let performance_score = performance_score(&PerformanceInput {
        view_count: record.stats.view_count,
        like_count: record.stats.like_count,
        comment_count: record.stats.comment_count,
        subscriber_count,
        duration_seconds: duration.total_seconds,
    });

    tracing::trace!(
        video = %record.video_id,
        duration = duration.total_seconds,
        bucket = %duration.bucket,
        engagement_rate = engagement.engagement_rate,
        score = performance_score,
        "enriched video"
    );

    EnrichedVideo {
        record,
        subscriber_count,
        duration,
        engagement,
        velocity,
        hashtags,
        performance_score,
    }
}

/// Insights across a whole result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub query: String,
    pub video_count: usize,
    #[serde(flatten)]
    pub upload_patterns: UploadPatterns,
    #[serde(flatten)]
    pub content_gaps: ContentGaps,
    pub trending_videos: Vec<EnrichedVideo>,
}

/// Summarize a set of enriched videos returned for `query`.
///
/// Upload times are bucketed in `tz`. An empty set produces a summary with no best upload day
/// or hour, empty distributions, and no suggestions.
pub fn analyze(
    videos: &[EnrichedVideo],
    query: &str,
    config: &AnalysisConfig,
    tz: &TimeZone,
) -> AnalysisSummary {
    let trending_videos: Vec<EnrichedVideo> = identify_trending(videos, config.trending_threshold)
        .into_iter()
        .cloned()
        .collect();

    let upload_patterns = analyze_upload_patterns(videos.iter().map(|v| v.record.published_at), tz);

    let content_gaps = analyze_content_gaps(
        videos
            .iter()
            .map(|v| (v.record.category.as_str(), v.duration.total_seconds)),
        query,
    );

    tracing::debug!(
        query,
        videos = videos.len(),
        trending = trending_videos.len(),
        best_day = ?upload_patterns.best_upload_day,
        best_hour = ?upload_patterns.best_upload_hour,
        suggestions = content_gaps.suggestions.len(),
        "analysis complete"
    );

    AnalysisSummary {
        query: query.to_string(),
        video_count: videos.len(),
        upload_patterns,
        content_gaps,
        trending_videos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use jiff::ToSpan;
    use pretty_assertions::assert_eq;

    fn record(id: &str, category: &str, duration: Option<&str>, stats: VideoStats) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            title: format!("Video {id} #Test"),
            description: "More at #test and #Rust".to_string(),
            channel_id: "UC1".to_string(),
            channel_title: "Channel".to_string(),
            category: category.to_string(),
            duration_code: duration.map(String::from),
            published_at: "2024-03-04T09:00:00Z".parse().unwrap(),
            stats,
            tags: vec!["tag".to_string()],
            has_captions: false,
        }
    }

    fn now() -> Timestamp {
        "2024-03-04T09:00:00Z".parse::<Timestamp>().unwrap() + 10.hours()
    }

    #[test]
    fn enrich_derives_everything() {
        let video = enrich(
            record("a", "Education", Some("PT5M"), VideoStats::new(1000, 50, 10)),
            Some(12_000),
            now(),
            &AnalysisConfig::default(),
        );

        assert_eq!(video.duration.total_seconds, 300);
        assert_eq!(video.duration.bucket, ContentBucket::MidForm);
        assert_eq!(video.engagement.engagement_rate, 6.0);
        assert!(video.engagement.is_high_engagement);
        assert!(approx_eq!(f64, video.velocity.views_per_hour, 100.0, ulps = 2));
        assert_eq!(
            video.hashtags.into_iter().collect::<Vec<_>>(),
            vec!["#rust".to_string(), "#test".to_string()]
        );
        assert_eq!(video.performance_score, 64);
        assert_eq!(video.subscriber_count, Some(12_000));
    }

    #[test]
    fn enrich_tolerates_missing_data() {
        let video = enrich(
            record("b", "Music", None, VideoStats::default()),
            None,
            now(),
            &AnalysisConfig::default(),
        );
        assert_eq!(video.duration, DurationInfo::UNKNOWN);
        assert_eq!(video.engagement.engagement_rate, 0.0);
        assert_eq!(video.velocity.views_per_hour, 0.0);
        assert_eq!(video.performance_score, 0);
    }

    #[test]
    fn analyze_combines_all_aggregates() {
        let config = AnalysisConfig::default();
        let videos: Vec<_> = [
            record("a", "Education", Some("PT5M"), VideoStats::new(1000, 50, 10)),
            record("b", "Education", Some("PT7M"), VideoStats::new(1000, 1, 0)),
            record("c", "Gaming", Some("PT30M"), VideoStats::new(500, 20, 5)),
        ]
        .into_iter()
        .map(|r| enrich(r, None, now(), &config))
        .collect();

        let summary = analyze(&videos, "rust", &config, &TimeZone::UTC);
        assert_eq!(summary.video_count, 3);
        assert_eq!(
            summary
                .trending_videos
                .iter()
                .map(|v| v.record.video_id.as_str())
                .collect::<Vec<_>>(),
            vec!["a", "c"]
        );
        assert_eq!(summary.upload_patterns.best_upload_day, Some("Monday"));
        assert_eq!(summary.upload_patterns.best_upload_hour.as_deref(), Some("9:00"));
        assert_eq!(summary.content_gaps.duration_distribution.total(), 3);
        assert_eq!(
            summary.content_gaps.category_distribution.values().sum::<usize>(),
            3
        );
    }

    #[test]
    fn analyze_empty_dataset() {
        let summary = analyze(&[], "rust", &AnalysisConfig::default(), &TimeZone::UTC);
        assert_eq!(summary.video_count, 0);
        assert_eq!(summary.upload_patterns.best_upload_day, None);
        assert_eq!(summary.upload_patterns.best_upload_hour, None);
        assert!(summary.content_gaps.suggestions.is_empty());
        assert!(summary.content_gaps.underrepresented_categories.is_empty());
        assert!(summary.trending_videos.is_empty());
    }

    #[test]
    fn analysis_is_repeatable() {
        let config = AnalysisConfig::default();
        let videos: Vec<_> = (0..10)
            .map(|i| {
                let category = if i % 3 == 0 { "Comedy" } else { "Education" };
                let stats = VideoStats::new(1000 + i, 10 * i, i);
                record(&i.to_string(), category, Some("PT3M"), stats)
            })
            .map(|r| enrich(r, None, now(), &config))
            .collect();

        let first = analyze(&videos, "rust", &config, &TimeZone::UTC);
        let second = analyze(&videos, "rust", &config, &TimeZone::UTC);
        assert_eq!(first, second);
    }
}
