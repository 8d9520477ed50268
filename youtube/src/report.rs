//! Flattens analysis results into rows and summary lines for display.
//!
//! Cells carry plain values only. Thousands separators, links, and styling are left to
//! whatever ends up rendering the report.

use serde::Serialize;
use std::fmt;
use youtube_analytics::{AnalysisSummary, EnrichedVideo};

const NOT_ENOUGH_DATA: &str = "Not enough data";

/// Column headers, in the order cells appear in each row.
pub const HEADERS: [&str; 17] = [
    "Video ID",
    "Title",
    "Channel",
    "Category",
    "Published",
    "Duration (s)",
    "Content Type",
    "Views",
    "Likes",
    "Comments",
    "Subscribers",
    "Engagement Rate (%)",
    "High Engagement",
    "Views/Hour",
    "Views/Day",
    "Performance Score",
    "Hashtags",
];

/// A single display value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Number(f64),
    Flag(bool),
    Empty,
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Self::Integer(value as u64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Flag(true) => f.write_str("Yes"),
            Self::Flag(false) => f.write_str("No"),
            Self::Empty => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub label: String,
    pub value: Cell,
}

impl SummaryLine {
    fn new(label: impl Into<String>, value: impl Into<Cell>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
    pub summary: Vec<SummaryLine>,
}

impl Report {
    pub fn build(videos: &[EnrichedVideo], summary: &AnalysisSummary) -> Self {
        Self {
            headers: HEADERS.to_vec(),
            rows: videos.iter().map(row).collect(),
            summary: summary_lines(summary),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn row(video: &EnrichedVideo) -> Vec<Cell> {
    let record = &video.record;
    let hashtags = video
        .hashtags
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");

    vec![
        record.video_id.as_str().into(),
        record.title.as_str().into(),
        record.channel_title.as_str().into(),
        record.category.as_str().into(),
        record.published_at.to_string().into(),
        video.duration.total_seconds.into(),
        video.duration.bucket.label().into(),
        record.stats.view_count.into(),
        record.stats.like_count.into(),
        record.stats.comment_count.into(),
        video.subscriber_count.into(),
        round2(video.engagement.engagement_rate).into(),
        video.engagement.is_high_engagement.into(),
        video.velocity.views_per_hour_rounded().into(),
        video.velocity.views_per_day_rounded().into(),
        u64::from(video.performance_score).into(),
        hashtags.into(),
    ]
}

fn summary_lines(summary: &AnalysisSummary) -> Vec<SummaryLine> {
    let patterns = &summary.upload_patterns;
    let gaps = &summary.content_gaps;

    let mut lines = vec![
        SummaryLine::new("Search Query", summary.query.as_str()),
        SummaryLine::new("Videos Analyzed", summary.video_count),
        SummaryLine::new(
            "Best Upload Day",
            patterns.best_upload_day.unwrap_or(NOT_ENOUGH_DATA),
        ),
        SummaryLine::new(
            "Best Upload Hour",
            patterns.best_upload_hour.as_deref().unwrap_or(NOT_ENOUGH_DATA),
        ),
        SummaryLine::new("Shorts", gaps.duration_distribution.shorts),
        SummaryLine::new("Mid-form Videos", gaps.duration_distribution.mid_form),
        SummaryLine::new("Long-form Videos", gaps.duration_distribution.long_form),
        SummaryLine::new("Trending Videos", summary.trending_videos.len()),
    ];

    let underrepresented = if gaps.underrepresented_categories.is_empty() {
        Cell::from("None")
    } else {
        Cell::from(gaps.underrepresented_categories.join(", "))
    };
    lines.push(SummaryLine::new("Underrepresented Categories", underrepresented));

    lines.extend(
        gaps.suggestions
            .iter()
            .enumerate()
            .map(|(i, suggestion)| SummaryLine::new(format!("Suggestion {}", i + 1), suggestion.as_str())),
    );

    lines
}
