//! Feed composition state machine.
//!
//! Owns the session interaction state, re-runs the ranking engine on every
//! pass, applies the search filter, manages incremental reveal, and
//! interleaves secondary blocks. Ranking itself stays pure; this is the only
//! stateful piece.

use crate::config::FeedConfig;
use crate::models::FeedView;
use crate::services::bias::derive_bias;
use crate::services::blocks::{assemble, BlockFlags};
use crate::services::search::apply_filter;
use crate::services::session::SessionState;
use chrono::{DateTime, Utc};
use ranking_engine::{Catalogue, RankingEngine, RankingRequest, Review};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct FeedComposer {
    catalogue: Arc<Catalogue>,
    engine: RankingEngine,
    config: FeedConfig,
    session: SessionState,
    active_question_id: String,
    search_query: String,
    session_id: Uuid,
}

impl FeedComposer {
    pub fn new(catalogue: Arc<Catalogue>, config: FeedConfig) -> Self {
        let session = SessionState::new(config.initial_window);
        let active_question_id = catalogue.default_question().id.clone();
        Self {
            catalogue,
            engine: RankingEngine::new(),
            config,
            session,
            active_question_id,
            search_query: String::new(),
            session_id: Uuid::new_v4(),
        }
    }

    pub fn active_question_id(&self) -> &str {
        &self.active_question_id
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Switch the active question. A change resets the session window;
    /// re-selecting the current question is a no-op.
    pub fn select_question(&mut self, question_id: &str) {
        if question_id == self.active_question_id {
            return;
        }
        info!(
            session_id = %self.session_id,
            question_id,
            "question changed, resetting feed window"
        );
        self.active_question_id = question_id.to_string();
        self.session.reset(self.config.initial_window);
    }

    /// Update the search query. Queries are compared trimmed; a change
    /// resets the session window.
    pub fn set_search_query(&mut self, query: &str) {
        let trimmed = query.trim();
        if trimmed == self.search_query {
            return;
        }
        debug!(session_id = %self.session_id, query = trimmed, "search changed, resetting feed window");
        self.search_query = trimmed.to_string();
        self.session.reset(self.config.initial_window);
    }

    /// Reveal the next window increment. Explicit "show more" requests and
    /// sentinel-visibility callbacks both land here; the step is idempotent
    /// with respect to the underlying ranked sequence.
    pub fn reveal_more(&mut self) {
        self.session.revealed_count += self.config.reveal_step;
    }

    /// Host viewport callback: the trailing sentinel became visible.
    pub fn sentinel_visible(&mut self) {
        self.reveal_more();
    }

    pub fn toggle_expanded(&mut self, review_id: &str) -> bool {
        self.session.toggle_expanded(review_id)
    }

    pub fn mark_helpful(&mut self, review_id: &str) {
        self.session.mark_helpful(review_id);
    }

    pub fn toggle_play(&mut self, review_id: &str) -> bool {
        self.session.toggle_play(review_id)
    }

    pub fn toggle_personalization_tag(&mut self, tag: &str) -> bool {
        self.session.toggle_personalization_tag(tag)
    }

    /// Run one full composition pass: derive bias, re-rank, filter, window,
    /// interleave. Deterministic for a fixed catalogue, session state, and
    /// `now`.
    pub fn compose(&mut self, now: DateTime<Utc>) -> FeedView {
        let (question_tags, adjacent_tags) =
            self.catalogue.question_tag_sets(&self.active_question_id);
        let bias_tags = derive_bias(&self.session, &self.catalogue);

        let request = RankingRequest {
            question_tags,
            adjacent_tags,
            bias_tags,
            now,
        };
        let outcome = self.engine.rank(self.catalogue.reviews(), &request);

        let filtered = apply_filter(outcome.items, &self.search_query);
        let total_matches = filtered.len();
        let shown = total_matches.min(self.session.revealed_count);

        // Latches until the next reset
        if shown > self.config.initial_window {
            self.session.scrolled_past_six = true;
        }

        let visible: Vec<Review> = filtered
            .into_iter()
            .take(shown)
            .map(|item| item.review)
            .collect();

        let flags = BlockFlags {
            scrolled_past_six: self.session.scrolled_past_six,
            has_intent: self.session.has_intent(),
            show_conversion_card: self.session.shows_conversion_card(),
        };
        let blocks = assemble(&visible, &self.active_question_id, flags);

        debug!(
            session_id = %self.session_id,
            question_id = %self.active_question_id,
            total_matches,
            shown,
            blocks = blocks.len(),
            "feed composed"
        );

        FeedView {
            blocks,
            used_adjacent_tags: outcome.used_adjacent_tags,
            total_matches,
            revealed_count: shown,
            has_more: shown < total_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentBlock;
    use chrono::TimeZone;
    use ranking_engine::Question;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn create_test_review(id: &str, question_tags: &[&str], intensity: f64) -> Review {
        Review {
            id: id.to_string(),
            quote: format!("quote {id}"),
            name: None,
            city: None,
            context: "context".to_string(),
            question_tags: question_tags.iter().map(|t| t.to_string()).collect(),
            intensity_score: intensity,
            helpful_count: 0,
            verified_trip: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            media: None,
            story: None,
            persona_tags: vec![],
        }
    }

    fn create_test_catalogue(review_count: usize) -> Arc<Catalogue> {
        let reviews: Vec<Review> = (0..review_count)
            .map(|i| create_test_review(&format!("r{i}"), &["solo_awkward"], 0.3))
            .collect();
        let questions = vec![
            Question {
                id: "solo_awkward".to_string(),
                text: "Will it be awkward travelling solo?".to_string(),
                tags: vec!["solo_awkward".to_string()],
                adjacent_tags: vec!["no_one".to_string()],
            },
            Question {
                id: "packing".to_string(),
                text: "What should I pack?".to_string(),
                tags: vec!["packing".to_string()],
                adjacent_tags: vec![],
            },
        ];
        Arc::new(Catalogue::new(reviews, questions, "solo_awkward").unwrap())
    }

    fn review_ids(view: &FeedView) -> Vec<String> {
        view.blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Review { review } => Some(review.id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_initial_window_is_six() {
        let mut composer = FeedComposer::new(create_test_catalogue(20), FeedConfig::default());
        let view = composer.compose(now());

        assert_eq!(review_ids(&view).len(), 6);
        assert_eq!(view.total_matches, 20);
        assert!(view.has_more);
    }

    #[test]
    fn test_reveal_grows_window_and_latches_flag() {
        let mut composer = FeedComposer::new(create_test_catalogue(20), FeedConfig::default());
        composer.compose(now());
        assert!(!composer.session().scrolled_past_six);

        composer.sentinel_visible();
        let view = composer.compose(now());

        assert_eq!(review_ids(&view).len(), 12);
        assert!(composer.session().scrolled_past_six);
    }

    #[test]
    fn test_window_clamps_to_matches() {
        let mut composer = FeedComposer::new(create_test_catalogue(4), FeedConfig::default());
        composer.reveal_more();
        composer.reveal_more();
        let view = composer.compose(now());

        assert_eq!(view.revealed_count, 4);
        assert!(!view.has_more);
        // Window never outgrew the initial 6, so the flag stays down
        assert!(!composer.session().scrolled_past_six);
    }

    #[test]
    fn test_question_change_resets_window() {
        let mut composer = FeedComposer::new(create_test_catalogue(20), FeedConfig::default());
        composer.reveal_more();
        composer.toggle_expanded("r0");
        composer.compose(now());

        composer.select_question("packing");
        let view = composer.compose(now());

        assert_eq!(view.revealed_count, 0); // no packing-tagged reviews
        assert!(composer.session().expanded_ids.is_empty());
        assert!(!composer.session().scrolled_past_six);
    }

    #[test]
    fn test_reselecting_same_question_keeps_state() {
        let mut composer = FeedComposer::new(create_test_catalogue(20), FeedConfig::default());
        composer.toggle_expanded("r0");
        composer.select_question("solo_awkward");
        assert!(composer.session().expanded_ids.contains("r0"));
    }

    #[test]
    fn test_search_change_resets_and_filters() {
        let mut composer = FeedComposer::new(create_test_catalogue(20), FeedConfig::default());
        composer.reveal_more();
        composer.compose(now());
        assert!(composer.session().scrolled_past_six);

        composer.set_search_query("quote r1");
        let view = composer.compose(now());

        // r1, r10..r19 match the substring
        assert_eq!(view.total_matches, 11);
        assert_eq!(view.revealed_count, 6);
        assert!(!composer.session().scrolled_past_six);
    }

    #[test]
    fn test_whitespace_only_query_change_is_ignored() {
        let mut composer = FeedComposer::new(create_test_catalogue(20), FeedConfig::default());
        composer.reveal_more();
        composer.set_search_query("   ");
        assert_eq!(composer.session().revealed_count, 12);
    }

    #[test]
    fn test_empty_pool_renders_empty_stream() {
        let mut composer = FeedComposer::new(create_test_catalogue(0), FeedConfig::default());
        let view = composer.compose(now());

        assert!(view.blocks.is_empty());
        assert_eq!(view.total_matches, 0);
        assert!(!view.has_more);
    }

    #[test]
    fn test_unknown_question_falls_back_to_default() {
        let mut composer = FeedComposer::new(create_test_catalogue(8), FeedConfig::default());
        composer.select_question("exploring");
        let view = composer.compose(now());

        // Default question's tags still match the catalogue
        assert_eq!(view.total_matches, 8);
    }
}
