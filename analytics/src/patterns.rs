//! Upload timing patterns across a result set.

use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::Serialize;
use std::collections::BTreeMap;

/// Weekday names indexed from Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// When the videos in a result set were published.
///
/// The best day and hour are `None` only when there were no videos to look at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPatterns {
    pub best_upload_day: Option<&'static str>,
    /// Formatted as `H:00`.
    pub best_upload_hour: Option<String>,
    /// Weekday index (0 = Sunday) to number of uploads.
    pub day_distribution: BTreeMap<u8, usize>,
    /// Hour of day (0-23) to number of uploads.
    pub hour_distribution: BTreeMap<u8, usize>,
}

/// Histogram publish times by weekday and hour in `tz`, and pick the most common of each.
///
/// Ties go to the earliest weekday (starting on Sunday) or hour.
pub fn analyze_upload_patterns<I>(published: I, tz: &TimeZone) -> UploadPatterns
where
    I: IntoIterator<Item = Timestamp>,
{
    let mut day_distribution = BTreeMap::new();
    let mut hour_distribution = BTreeMap::new();

    for timestamp in published {
        let local = tz.to_datetime(timestamp);
        let day = local.weekday().to_sunday_zero_offset() as u8;
        let hour = local.hour() as u8;
        *day_distribution.entry(day).or_insert(0) += 1;
        *hour_distribution.entry(hour).or_insert(0) += 1;
    }

    UploadPatterns {
        best_upload_day: most_common(&day_distribution).map(|day| WEEKDAY_NAMES[day as usize]),
        best_upload_hour: most_common(&hour_distribution).map(|hour| format!("{hour}:00")),
        day_distribution,
        hour_distribution,
    }
}

fn most_common(counts: &BTreeMap<u8, usize>) -> Option<u8> {
    counts
        .iter()
        .fold(None, |best, (&key, &count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
        .map(|(key, _)| key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_json_snapshot;
    use pretty_assertions::assert_eq;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn picks_most_common_day() {
        // 2024-03-04 is a Monday
        let published = [
            ts("2024-03-04T09:00:00Z"),
            ts("2024-03-11T15:30:00Z"),
            ts("2024-03-18T15:10:00Z"),
            ts("2024-03-05T09:45:00Z"),
        ];
        let patterns = analyze_upload_patterns(published, &TimeZone::UTC);

        assert_eq!(patterns.best_upload_day, Some("Monday"));
        assert_eq!(patterns.day_distribution, BTreeMap::from([(1, 3), (2, 1)]));
        assert_eq!(patterns.hour_distribution, BTreeMap::from([(9, 2), (15, 2)]));
        assert_eq!(patterns.best_upload_hour.as_deref(), Some("9:00"));
    }

    #[test]
    fn ties_go_to_the_earliest_key() {
        // Saturday then Sunday, one each
        let published = [ts("2024-03-09T23:00:00Z"), ts("2024-03-10T01:00:00Z")];
        let patterns = analyze_upload_patterns(published, &TimeZone::UTC);
        assert_eq!(patterns.best_upload_day, Some("Sunday"));
        assert_eq!(patterns.best_upload_hour.as_deref(), Some("1:00"));
    }

    #[test]
    fn uses_the_given_time_zone() {
        // Monday 02:00 UTC is still Sunday evening at UTC-5
        let tz = TimeZone::fixed(jiff::tz::offset(-5));
        let patterns = analyze_upload_patterns([ts("2024-03-04T02:00:00Z")], &tz);
        assert_eq!(patterns.best_upload_day, Some("Sunday"));
        assert_eq!(patterns.best_upload_hour.as_deref(), Some("21:00"));
    }

    #[test]
    fn empty_dataset_has_no_best_values() {
        let patterns = analyze_upload_patterns([], &TimeZone::UTC);
        assert_eq!(patterns, UploadPatterns::default());
        assert_json_snapshot!(patterns, @r#"
        {
          "bestUploadDay": null,
          "bestUploadHour": null,
          "dayDistribution": {},
          "hourDistribution": {}
        }
        "#);
    }
}
