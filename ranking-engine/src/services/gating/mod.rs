//! Candidate gating.
//!
//! Builds the working pool for a question, expanding to adjacent-tag matches
//! when the primary pool is undersized. Catalogue order is preserved within
//! each group, primary matches first.

use crate::models::{GateStats, Review};
use crate::utils::tags_intersect;
use std::collections::HashSet;
use tracing::debug;

/// Minimum working-set size before adjacent-tag expansion kicks in.
pub const DEFAULT_MIN_MATCHES: usize = 18;

/// A pool member with its original catalogue position.
#[derive(Debug, Clone)]
pub struct GatedCandidate {
    pub review: Review,
    pub catalogue_index: usize,
}

/// Result of one gating pass.
#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub pool: Vec<GatedCandidate>,
    /// True when the expansion branch was taken; the UI labels the result
    /// as including "closest experience" matches.
    pub used_adjacent_tags: bool,
    pub stats: GateStats,
}

pub struct CandidateGate {
    min_matches: usize,
}

impl Default for CandidateGate {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateGate {
    pub fn new() -> Self {
        Self {
            min_matches: DEFAULT_MIN_MATCHES,
        }
    }

    pub fn with_min_matches(min_matches: usize) -> Self {
        Self { min_matches }
    }

    /// Select the candidate pool for the given tag sets.
    pub fn select(
        &self,
        reviews: &[Review],
        question_tags: &HashSet<String>,
        adjacent_tags: &HashSet<String>,
    ) -> GateOutcome {
        let mut pool: Vec<GatedCandidate> = reviews
            .iter()
            .enumerate()
            .filter(|(_, review)| tags_intersect(&review.question_tags, question_tags))
            .map(|(idx, review)| GatedCandidate {
                review: review.clone(),
                catalogue_index: idx,
            })
            .collect();

        let primary_count = pool.len();
        let mut adjacent_count = 0;
        let mut used_adjacent_tags = false;

        if primary_count < self.min_matches && !adjacent_tags.is_empty() {
            used_adjacent_tags = true;
            let adjacent_only: Vec<GatedCandidate> = reviews
                .iter()
                .enumerate()
                .filter(|(_, review)| {
                    !tags_intersect(&review.question_tags, question_tags)
                        && tags_intersect(&review.question_tags, adjacent_tags)
                })
                .map(|(idx, review)| GatedCandidate {
                    review: review.clone(),
                    catalogue_index: idx,
                })
                .collect();
            adjacent_count = adjacent_only.len();
            pool.extend(adjacent_only);
        }

        let stats = GateStats {
            primary_count,
            adjacent_count,
            total_count: pool.len(),
        };

        debug!(
            primary = stats.primary_count,
            adjacent = stats.adjacent_count,
            total = stats.total_count,
            used_adjacent_tags,
            "candidate pool assembled"
        );

        GateOutcome {
            pool,
            used_adjacent_tags,
            stats,
        }
    }
}
