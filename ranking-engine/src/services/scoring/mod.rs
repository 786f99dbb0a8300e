//! Relevance scoring.
//!
//! Pure arithmetic over a review and the active question's tag sets. The
//! weights are load-bearing: tests and the pacing layer downstream depend on
//! the relative magnitudes, so they are module constants rather than
//! call-time parameters.

use crate::models::{MediaAttachment, Review};
use crate::utils::{distinct_overlap, tags_intersect};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Weight applied to the question-match component.
const QUESTION_MATCH_WEIGHT: f64 = 5.0;
/// Match strength credited to adjacent-tag ("closest experience") matches.
const ADJACENT_MATCH_STRENGTH: f64 = 0.6;
const INTENSITY_WEIGHT: f64 = 2.0;
const HELPFUL_WEIGHT: f64 = 0.1;
const VERIFIED_TRIP_BONUS: f64 = 1.0;
/// Bonus for a brand-new review; decays linearly to zero over a year.
const RECENCY_MAX_BONUS: f64 = 0.5;
const RECENCY_WINDOW_DAYS: f64 = 365.0;
const BIAS_BOOST_PER_TAG: f64 = 0.6;
const BIAS_BOOST_CAP: f64 = 2.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Multi-factor relevance scorer. Total over well-formed input; no errors,
/// no side effects.
pub struct RelevanceScorer;

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RelevanceScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(
        &self,
        review: &Review,
        question_tags: &HashSet<String>,
        adjacent_tags: &HashSet<String>,
        bias_tags: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> f64 {
        let question_match = if tags_intersect(&review.question_tags, question_tags) {
            1.0
        } else if tags_intersect(&review.question_tags, adjacent_tags) {
            ADJACENT_MATCH_STRENGTH
        } else {
            0.0
        };

        question_match * QUESTION_MATCH_WEIGHT
            + review.intensity_score * INTENSITY_WEIGHT
            + Self::media_bonus(review.media.as_ref())
            + f64::from(review.helpful_count) * HELPFUL_WEIGHT
            + if review.is_verified() {
                VERIFIED_TRIP_BONUS
            } else {
                0.0
            }
            + Self::recency_bonus(review.created_at, now)
            + Self::bias_boost(review, bias_tags)
    }

    /// Voice carries the most weight: hearing a real traveller lands harder
    /// than photos or video.
    fn media_bonus(media: Option<&MediaAttachment>) -> f64 {
        match media {
            Some(MediaAttachment::Voice { .. }) => 2.0,
            Some(MediaAttachment::Photos { .. }) => 1.0,
            Some(MediaAttachment::Video { .. }) => 0.5,
            None => 0.0,
        }
    }

    /// Linear decay from `RECENCY_MAX_BONUS` (brand new) to 0 (a year old or
    /// more). Clock skew (created_at in the future) clamps to the maximum.
    fn recency_bonus(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        let age_days = ((now - created_at).num_seconds().max(0) as f64) / SECONDS_PER_DAY;
        let decay = (age_days / RECENCY_WINDOW_DAYS).min(1.0);
        RECENCY_MAX_BONUS * (1.0 - decay)
    }

    /// Overlap between the review's tags (thematic ∪ persona) and the
    /// accumulated bias tags, capped so one heavily-interacted theme cannot
    /// dominate the question match.
    fn bias_boost(review: &Review, bias_tags: &HashSet<String>) -> f64 {
        if bias_tags.is_empty() {
            return 0.0;
        }
        let overlap = distinct_overlap(&review.question_tags, &review.persona_tags, bias_tags);
        (overlap as f64 * BIAS_BOOST_PER_TAG).min(BIAS_BOOST_CAP)
    }
}
