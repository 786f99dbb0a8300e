//! Intensity pacing.
//!
//! Reorders a scored sequence so emotionally heavy reviews never cluster:
//! after three consecutive heavy picks, the next lighter item remaining in
//! the queue is pulled forward. Same multiset out as in; relative order is
//! otherwise preserved.

use crate::models::RankedReview;

/// Intensity above which a review counts as heavy for pacing.
const HIGH_INTENSITY_THRESHOLD: f64 = 0.75;
/// Longest allowed run of heavy picks before a lighter item is borrowed.
const MAX_HIGH_STREAK: usize = 3;

pub struct IntensityPacer;

impl Default for IntensityPacer {
    fn default() -> Self {
        Self::new()
    }
}

impl IntensityPacer {
    pub fn new() -> Self {
        Self
    }

    pub fn pace(&self, items: Vec<RankedReview>) -> Vec<RankedReview> {
        let mut remaining = items;
        let mut paced = Vec::with_capacity(remaining.len());
        let mut high_streak = 0usize;

        while !remaining.is_empty() {
            // After a full streak, borrow the first lighter item still in the
            // queue; if only heavy items remain, the head goes out as-is.
            let pick_idx = if high_streak >= MAX_HIGH_STREAK {
                remaining
                    .iter()
                    .position(|c| !Self::is_high(c))
                    .unwrap_or(0)
            } else {
                0
            };

            let picked = remaining.remove(pick_idx);
            high_streak = if Self::is_high(&picked) {
                high_streak + 1
            } else {
                0
            };
            paced.push(picked);
        }

        paced
    }

    fn is_high(candidate: &RankedReview) -> bool {
        candidate.review.intensity_score > HIGH_INTENSITY_THRESHOLD
    }
}
