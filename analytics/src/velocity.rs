//! View velocity since publication.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// How fast a video has been collecting views.
///
/// Values are kept at full precision; use [`VelocityMetrics::views_per_hour_rounded`] and
/// [`VelocityMetrics::views_per_day_rounded`] for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityMetrics {
    pub views_per_hour: f64,
    pub views_per_day: f64,
    pub hours_elapsed: f64,
    pub days_elapsed: f64,
}

impl VelocityMetrics {
    /// Compute velocity as of `now`.
    ///
    /// A publish time at or after `now` (clock skew, scheduled premieres) yields zero velocity.
    pub fn compute(view_count: u64, published_at: Timestamp, now: Timestamp) -> Self {
        let hours_elapsed =
            (now.duration_since(published_at).as_secs_f64() / SECONDS_PER_HOUR).max(0.0);
        let days_elapsed = hours_elapsed / 24.0;

        let per = |elapsed: f64| {
            if elapsed > 0.0 {
                view_count as f64 / elapsed
            } else {
                0.0
            }
        };

        Self {
            views_per_hour: per(hours_elapsed),
            views_per_day: per(days_elapsed),
            hours_elapsed,
            days_elapsed,
        }
    }

    /// Views per hour rounded to two decimals.
    pub fn views_per_hour_rounded(&self) -> f64 {
        (self.views_per_hour * 100.0).round() / 100.0
    }

    /// Views per day rounded to a whole number.
    pub fn views_per_day_rounded(&self) -> u64 {
        self.views_per_day.round() as u64
    }
}
