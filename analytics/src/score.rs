//! Composite 0-100 performance score.

use crate::duration::SHORTS_MAX_SECONDS;
use crate::metrics::{calculate_engagement_rate, percent_of};
use serde::{Deserialize, Serialize};

/// Videos above this length get a small penalty.
const LONG_VIDEO_PENALTY_SECONDS: u64 = 1200;

/// Videos with more views than this get a flat bonus.
const VIEW_BONUS_MIN_VIEWS: u64 = 1000;

/// Inputs to [`performance_score`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceInput {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// Accepted but not yet part of the score.
    pub subscriber_count: Option<u64>,
    pub duration_seconds: u64,
}

/// Rate a video from 0 to 100.
///
/// The score blends, before the duration multiplier:
///
/// | signal                                   | weight |
/// |------------------------------------------|--------|
/// | engagement rate, saturating at 10%       | 0.4    |
/// | like rate, saturating at 1%              | 0.3    |
/// | comment rate, saturating at 2%           | 0.2    |
/// | more than 1000 views (flat)              | 0.1    |
///
/// The sum is multiplied by 0.8 for Shorts (at most 60 seconds), 0.9 for videos over 20 minutes,
/// and 1.0 otherwise. The channel's subscriber count currently has no effect.
pub fn performance_score(input: &PerformanceInput) -> u8 {
    let views = input.view_count;

    let engagement_rate = calculate_engagement_rate(views, input.like_count, input.comment_count);
    let normalized_engagement = (engagement_rate / 10.0).min(1.0);

    let like_ratio = percent_of(input.like_count, views).min(1.0);
    let comment_ratio = (percent_of(input.comment_count, views) / 2.0).min(1.0);

    let duration_factor = if input.duration_seconds <= SHORTS_MAX_SECONDS {
        0.8
    } else if input.duration_seconds > LONG_VIDEO_PENALTY_SECONDS {
        0.9
    } else {
        1.0
    };

    let view_bonus = if views > VIEW_BONUS_MIN_VIEWS { 0.1 } else { 0.0 };

    let raw = (normalized_engagement * 0.4 + like_ratio * 0.3 + comment_ratio * 0.2 + view_bonus)
        * duration_factor
        * 100.0;

    raw.clamp(0.0, 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(views: u64, likes: u64, comments: u64, duration: u64) -> PerformanceInput {
        PerformanceInput {
            view_count: views,
            like_count: likes,
            comment_count: comments,
            subscriber_count: None,
            duration_seconds: duration,
        }
    }

    #[test]
    fn maxed_out_mid_form_video_scores_100() {
        assert_eq!(performance_score(&input(10_000, 1000, 200, 300)), 100);
    }

    #[test]
    fn duration_factor_applies() {
        // every signal saturated: 1.0 before the multiplier
        assert_eq!(performance_score(&input(10_000, 1000, 200, 60)), 80);
        assert_eq!(performance_score(&input(10_000, 1000, 200, 61)), 100);
        assert_eq!(performance_score(&input(10_000, 1000, 200, 1200)), 100);
        assert_eq!(performance_score(&input(10_000, 1000, 200, 1201)), 90);
    }

    #[test]
    fn worked_example() {
        // engagement 6% -> 0.6 * 0.4 = 0.24
        // likes 5% -> capped at 1 -> 0.3
        // comments 1% * 0.5 -> 0.5 * 0.2 = 0.1
        // 1000 views is not above the bonus threshold
        assert_eq!(performance_score(&input(1000, 50, 10, 300)), 64);
    }

    #[test]
    fn no_views_scores_zero() {
        assert_eq!(performance_score(&input(0, 10, 10, 300)), 0);
        assert_eq!(performance_score(&PerformanceInput::default()), 0);
    }

    #[test]
    fn subscribers_do_not_affect_score() {
        let without = input(5000, 40, 3, 400);
        let with = PerformanceInput {
            subscriber_count: Some(1_000_000),
            ..without
        };
        assert_eq!(performance_score(&without), performance_score(&with));
    }

    #[test]
    fn monotonic_in_likes_and_comments() {
        for duration in [30, 300, 3000] {
            let views = 2000;
            let mut previous = 0;
            for likes in (0..=400).step_by(7) {
                let score = performance_score(&input(views, likes, 5, duration));
                assert!(score >= previous, "likes={likes} score={score} prev={previous}");
                assert!(score <= 100);
                previous = score;
            }

            let mut previous = 0;
            for comments in (0..=400).step_by(7) {
                let score = performance_score(&input(views, 12, comments, duration));
                assert!(score >= previous, "comments={comments} score={score} prev={previous}");
                assert!(score <= 100);
                previous = score;
            }
        }
    }

    #[test]
    fn bounded_for_extreme_inputs() {
        let score = performance_score(&input(1, u64::MAX, u64::MAX, u64::MAX));
        assert!(score <= 100);
        let score = performance_score(&input(u64::MAX, 0, 0, 0));
        assert_eq!(score, 8);
    }
}
