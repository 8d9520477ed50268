use crate::record::VideoStats;

/// Engagement rate (in percent) at or above which a video counts as trending.
pub const DEFAULT_TRENDING_THRESHOLD: f64 = 2.0;

/// Keep the videos whose engagement rate is at least `threshold`, in their original order.
pub fn identify_trending<V>(videos: &[V], threshold: f64) -> Vec<&V>
where
    V: AsRef<VideoStats>,
{
    videos
        .iter()
        .filter(|video| video.as_ref().engagement_rate() >= threshold)
        .collect()
}
