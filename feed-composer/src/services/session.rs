//! Session-local interaction state.
//!
//! One instance per active session, owned exclusively by the composer. Reset
//! whenever the active question or search query changes; personalization
//! chips are an explicit opt-in and survive resets.

use std::collections::HashSet;

/// Expanded-card count at which the conversion card starts showing.
const CONVERSION_EXPANDED_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub expanded_ids: HashSet<String>,
    pub helped_ids: HashSet<String>,
    pub played_ids: HashSet<String>,
    pub personalization_tags: HashSet<String>,
    /// At most one review plays media at a time.
    pub playing_id: Option<String>,
    /// Reveal progress; the displayed window is the first
    /// `min(revealed_count, filtered_len)` ranked entries.
    pub revealed_count: usize,
    /// Latches once the displayed window has grown past the initial one.
    pub scrolled_past_six: bool,
}

impl SessionState {
    pub fn new(initial_window: usize) -> Self {
        Self {
            revealed_count: initial_window,
            ..Default::default()
        }
    }

    /// Drop everything tied to the current question/search pair.
    pub fn reset(&mut self, initial_window: usize) {
        self.expanded_ids.clear();
        self.helped_ids.clear();
        self.played_ids.clear();
        self.playing_id = None;
        self.revealed_count = initial_window;
        self.scrolled_past_six = false;
    }

    /// Flip a card open or closed. Collapsing a card that is currently
    /// playing media stops playback.
    pub fn toggle_expanded(&mut self, id: &str) -> bool {
        if self.expanded_ids.remove(id) {
            if self.playing_id.as_deref() == Some(id) {
                self.playing_id = None;
            }
            false
        } else {
            self.expanded_ids.insert(id.to_string());
            true
        }
    }

    /// One-way and idempotent.
    pub fn mark_helpful(&mut self, id: &str) {
        self.helped_ids.insert(id.to_string());
    }

    /// Start or stop playback for a review. Starting displaces any other
    /// playing review; having played is recorded one-way.
    pub fn toggle_play(&mut self, id: &str) -> bool {
        if self.playing_id.as_deref() == Some(id) {
            self.playing_id = None;
            false
        } else {
            self.playing_id = Some(id.to_string());
            self.played_ids.insert(id.to_string());
            true
        }
    }

    pub fn toggle_personalization_tag(&mut self, tag: &str) -> bool {
        if self.personalization_tags.remove(tag) {
            false
        } else {
            self.personalization_tags.insert(tag.to_string());
            true
        }
    }

    pub fn has_intent(&self) -> bool {
        self.scrolled_past_six
            || !self.expanded_ids.is_empty()
            || !self.played_ids.is_empty()
            || !self.helped_ids.is_empty()
    }

    pub fn shows_conversion_card(&self) -> bool {
        self.expanded_ids.len() >= CONVERSION_EXPANDED_THRESHOLD
            || !self.played_ids.is_empty()
            || !self.personalization_tags.is_empty()
    }
}
