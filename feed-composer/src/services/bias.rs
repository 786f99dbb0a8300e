//! Bias-tag derivation.
//!
//! Interaction history is folded into a flat tag set that boosts the next
//! ranking pass. Already-displayed items are never re-scored retroactively;
//! the boost only shapes subsequent passes.

use crate::services::session::SessionState;
use ranking_engine::Catalogue;
use std::collections::HashSet;
use tracing::debug;

/// Personalization tags verbatim, plus the thematic and persona tags of
/// every review the user expanded, marked helpful, or played. Ids no longer
/// in the catalogue are skipped.
pub fn derive_bias(state: &SessionState, catalogue: &Catalogue) -> HashSet<String> {
    let mut tags: HashSet<String> = state.personalization_tags.clone();

    let interacted = state
        .expanded_ids
        .iter()
        .chain(state.helped_ids.iter())
        .chain(state.played_ids.iter());

    for id in interacted {
        if let Some(review) = catalogue.review_by_id(id) {
            tags.extend(review.question_tags.iter().cloned());
            tags.extend(review.persona_tags.iter().cloned());
        } else {
            debug!(review_id = %id, "interacted review missing from catalogue, skipped");
        }
    }

    tags
}
