//! User-provided settings for an analysis run.

use eyre::Context;
use jiff::tz::TimeZone;
use serde::Deserialize;
use std::path::Path;
use youtube_analytics::AnalysisConfig;

/// Environment variable the API key is read from when the settings file does not set one.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// Number of search results analyzed when none is configured.
pub const DEFAULT_MAX_RESULTS: u32 = 25;

/// Upper bound on `maxResults`; every 50 results costs 100 quota units of the daily 10,000.
pub const MAX_RESULTS_LIMIT: u32 = 500;

/// Settings for one analysis run.
///
/// Loaded from an optional JSON file; command-line flags are applied on top by the binary.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// YouTube Data API key. Falls back to the `YOUTUBE_API_KEY` environment variable.
    pub api_key: Option<String>,
    /// The search query to analyze.
    pub query: Option<String>,
    /// How many search results to analyze.
    pub max_results: Option<u32>,
    /// IANA time zone that upload days and hours are reported in. Defaults to the system zone.
    pub time_zone: Option<String>,
    pub analysis: AnalysisConfig,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("query", &self.query)
            .field("max_results", &self.max_results)
            .field("time_zone", &self.time_zone)
            .field("analysis", &self.analysis)
            .finish()
    }
}

impl Settings {
    /// Read settings from `path` if given, then fill in the API key from the environment.
    pub fn load(path: Option<&Path>) -> eyre::Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("read settings file {}", path.display()))?;
                Self::from_json(&contents)
                    .with_context(|| format!("parse settings file {}", path.display()))?
            }
            None => Self::default(),
        };

        if settings.api_key.is_none() {
            settings.api_key = std::env::var(API_KEY_ENV).ok();
        }

        Ok(settings)
    }

    pub fn from_json(json: &str) -> eyre::Result<Self> {
        let settings: Self = serde_json::from_str(json).context("decode settings JSON")?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings that have fixed bounds.
    pub fn validate(&self) -> eyre::Result<()> {
        if let Some(max_results) = self.max_results
            && !(1..=MAX_RESULTS_LIMIT).contains(&max_results)
        {
            eyre::bail!("maxResults must be between 1 and {MAX_RESULTS_LIMIT}, got {max_results}");
        }

        self.analysis
            .validate()
            .map_err(|e| eyre::eyre!(e))
            .context("invalid analysis settings")?;

        Ok(())
    }

    /// The API key, if one is configured and non-empty.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// The search query, if one is configured and non-empty.
    pub fn query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }

    pub fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    /// Resolve the configured time zone, falling back to the system's.
    pub fn time_zone(&self) -> eyre::Result<TimeZone> {
        match self.time_zone.as_deref() {
            Some(name) => {
                TimeZone::get(name).with_context(|| format!("look up time zone {name:?}"))
            }
            None => Ok(TimeZone::system()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings.max_results(), DEFAULT_MAX_RESULTS);
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.query(), None);
        assert_eq!(settings.analysis, AnalysisConfig::default());
    }

    #[test]
    fn full_file() {
        let settings = Settings::from_json(
            r#"{
                "apiKey": "  secret  ",
                "query": "rust tutorial",
                "maxResults": 50,
                "timeZone": "UTC",
                "analysis": { "highEngagementThreshold": 5.0 }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.api_key(), Some("secret"));
        assert_eq!(settings.query(), Some("rust tutorial"));
        assert_eq!(settings.max_results(), 50);
        assert_eq!(settings.analysis.high_engagement_threshold, 5.0);
        assert_eq!(settings.analysis.trending_threshold, 2.0);
    }

    #[test]
    fn blank_values_count_as_missing() {
        let settings = Settings::from_json(r#"{ "apiKey": "", "query": "   " }"#).unwrap();
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.query(), None);
    }

    #[test]
    fn rejects_out_of_range_max_results() {
        let err = Settings::from_json(r#"{ "maxResults": 0 }"#).unwrap_err();
        assert_snapshot!(err, @"maxResults must be between 1 and 500, got 0");

        assert!(Settings::from_json(r#"{ "maxResults": 501 }"#).is_err());
        assert!(Settings::from_json(r#"{ "maxResults": 500 }"#).is_ok());
    }

    #[test]
    fn rejects_negative_thresholds() {
        let err = Settings::from_json(r#"{ "analysis": { "trendingThreshold": -2 } }"#);
        assert!(err.is_err());
    }

    #[test]
    fn debug_hides_api_key() {
        let settings = Settings::from_json(r#"{ "apiKey": "hunter2" }"#).unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("hunter2"), "{debug}");
    }
}
