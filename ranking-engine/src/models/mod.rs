use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single testimonial record, supplied by the catalogue provider at
/// startup and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub context: String,
    /// Thematic tags; never empty (enforced at catalogue construction).
    pub question_tags: Vec<String>,
    /// Emotional weight in [0, 1].
    pub intensity_score: f64,
    #[serde(default)]
    pub helpful_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_trip: Option<bool>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaAttachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    /// Reviewer demographic/context tags, distinct from `question_tags`.
    #[serde(default)]
    pub persona_tags: Vec<String>,
}

impl Review {
    pub fn is_verified(&self) -> bool {
        self.verified_trip.unwrap_or(false)
    }
}

/// Media attached to a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MediaAttachment {
    #[serde(rename_all = "camelCase")]
    Voice { duration_sec: u32 },
    #[serde(rename_all = "camelCase")]
    Photos { count: u32 },
    #[serde(rename_all = "camelCase")]
    Video { duration_sec: u32 },
}

/// A question the visitor can select; its tag sets drive candidate gating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    /// Primary match set.
    pub tags: Vec<String>,
    /// Fallback match set, used only when the primary pool is undersized.
    #[serde(default)]
    pub adjacent_tags: Vec<String>,
}

/// Input for one ranking pass. Rebuilt on every invocation; never persisted.
#[derive(Debug, Clone)]
pub struct RankingRequest {
    pub question_tags: HashSet<String>,
    pub adjacent_tags: HashSet<String>,
    pub bias_tags: HashSet<String>,
    /// Reference instant for recency decay.
    pub now: DateTime<Utc>,
}

/// A review together with its relevance score and original catalogue
/// position (the final sort tie-break).
#[derive(Debug, Clone)]
pub struct RankedReview {
    pub review: Review,
    pub score: f64,
    pub catalogue_index: usize,
}

/// Output of a full ranking pass: gated, scored, sorted, and paced.
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    pub items: Vec<RankedReview>,
    /// True when the pool mixes in adjacent-tag ("closest experience")
    /// matches; consumed by the UI label.
    pub used_adjacent_tags: bool,
    pub stats: GateStats,
}

/// Counters describing how the candidate pool was assembled.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateStats {
    pub primary_count: usize,
    pub adjacent_count: usize,
    pub total_count: usize,
}
