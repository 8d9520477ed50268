use eyre::Context;
use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use std::path::Path;
use youtube_analytics::{AnalysisConfig, AnalysisSummary, EnrichedVideo, VideoRecord};

pub mod report;
pub mod settings;
pub mod youtube_api;

/// One search result, ready for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEntry {
    #[serde(flatten)]
    pub record: VideoRecord,
    /// Subscribers of the uploading channel, if public.
    #[serde(default)]
    pub subscriber_count: Option<u64>,
}

/// The videos found for a search query.
///
/// On disk a dataset is just a JSON array of its entries, so saved results can be analyzed
/// again later (for example under a different query label or time zone) without spending API
/// quota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub query: String,
    pub entries: Vec<DatasetEntry>,
}

impl Dataset {
    /// Read the entries written by [`Dataset::save`] and analyze them as results for `query`.
    pub fn load(query: impl Into<String>, path: &Path) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("read dataset {}", path.display()))?;
        let entries: Vec<DatasetEntry> = serde_json::from_str(&contents)
            .with_context(|| format!("parse dataset {}", path.display()))?;
        Ok(Self {
            query: query.into(),
            entries,
        })
    }

    pub fn save(&self, path: &Path) -> eyre::Result<()> {
        let json = serde_json::to_string_pretty(&self.entries).context("serialize dataset")?;
        std::fs::write(path, json).with_context(|| format!("write dataset {}", path.display()))
    }

    /// Run the analytics engine over every entry.
    ///
    /// Videos are enriched as of `now`, and upload patterns are reported in `tz`.
    pub fn analyze(
        self,
        config: &AnalysisConfig,
        tz: &TimeZone,
        now: Timestamp,
    ) -> (Vec<EnrichedVideo>, AnalysisSummary) {
        let videos: Vec<EnrichedVideo> = self
            .entries
            .into_iter()
            .map(|entry| youtube_analytics::enrich(entry.record, entry.subscriber_count, now, config))
            .collect();

        let summary = youtube_analytics::analyze(&videos, &self.query, config, tz);

        tracing::info!(
            query = %self.query,
            videos = summary.video_count,
            trending = summary.trending_videos.len(),
            best_day = summary.upload_patterns.best_upload_day.unwrap_or("-"),
            "analyzed search results"
        );

        (videos, summary)
    }
}
