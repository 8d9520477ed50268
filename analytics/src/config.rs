use crate::metrics::DEFAULT_HIGH_ENGAGEMENT_THRESHOLD;
use crate::trending::DEFAULT_TRENDING_THRESHOLD;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Tunable thresholds for an analysis run.
///
/// Both thresholds are engagement rates in percent.
#[derive(Debug, Clone, Copy, PartialEq, Builder, Deserialize, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisConfig {
    /// Videos at or above this engagement rate are reported as trending.
    #[builder(default = "DEFAULT_TRENDING_THRESHOLD")]
    pub trending_threshold: f64,

    /// Videos strictly above this engagement rate are flagged as highly engaging.
    #[builder(default = "DEFAULT_HIGH_ENGAGEMENT_THRESHOLD")]
    pub high_engagement_threshold: f64,
}

impl AnalysisConfig {
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Check a configuration that did not come through the builder (e.g. from a file).
    pub fn validate(&self) -> Result<(), String> {
        check_threshold("trending_threshold", self.trending_threshold)?;
        check_threshold("high_engagement_threshold", self.high_engagement_threshold)
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trending_threshold: DEFAULT_TRENDING_THRESHOLD,
            high_engagement_threshold: DEFAULT_HIGH_ENGAGEMENT_THRESHOLD,
        }
    }
}

impl AnalysisConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(threshold) = self.trending_threshold {
            check_threshold("trending_threshold", threshold)?;
        }
        if let Some(threshold) = self.high_engagement_threshold {
            check_threshold("high_engagement_threshold", threshold)?;
        }
        Ok(())
    }
}

fn check_threshold(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a non-negative percentage, got {value}"))
    }
}
