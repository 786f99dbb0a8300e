//! Ranking engine composition: gate → score → sort → pace.
//!
//! Deterministic, synchronous, side-effect-free. Safe to re-run on every
//! dependency change; the feed layer recomputes rather than patching scores
//! incrementally.

use crate::models::{RankedReview, RankingOutcome, RankingRequest, Review};
use crate::services::{CandidateGate, IntensityPacer, RelevanceScorer};
use std::cmp::Ordering;
use tracing::debug;

pub struct RankingEngine {
    gate: CandidateGate,
    scorer: RelevanceScorer,
    pacer: IntensityPacer,
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingEngine {
    pub fn new() -> Self {
        Self {
            gate: CandidateGate::new(),
            scorer: RelevanceScorer::new(),
            pacer: IntensityPacer::new(),
        }
    }

    pub fn with_gate(gate: CandidateGate) -> Self {
        Self {
            gate,
            scorer: RelevanceScorer::new(),
            pacer: IntensityPacer::new(),
        }
    }

    /// Rank the catalogue for one request.
    pub fn rank(&self, reviews: &[Review], request: &RankingRequest) -> RankingOutcome {
        let outcome = self
            .gate
            .select(reviews, &request.question_tags, &request.adjacent_tags);

        let mut scored: Vec<RankedReview> = outcome
            .pool
            .into_iter()
            .map(|candidate| {
                let score = self.scorer.score(
                    &candidate.review,
                    &request.question_tags,
                    &request.adjacent_tags,
                    &request.bias_tags,
                    request.now,
                );
                RankedReview {
                    score,
                    catalogue_index: candidate.catalogue_index,
                    review: candidate.review,
                }
            })
            .collect();

        // Score descending, newest first on ties, then catalogue order so
        // equal records always come back in a reproducible order.
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.review.created_at.cmp(&a.review.created_at))
                .then_with(|| a.catalogue_index.cmp(&b.catalogue_index))
        });

        let items = self.pacer.pace(scored);

        debug!(
            pool = outcome.stats.total_count,
            ranked = items.len(),
            used_adjacent_tags = outcome.used_adjacent_tags,
            top_score = items.first().map(|c| c.score),
            "ranking pass complete"
        );

        RankingOutcome {
            items,
            used_adjacent_tags: outcome.used_adjacent_tags,
            stats: outcome.stats,
        }
    }
}
