//! Secondary-block interleaving.
//!
//! A single left-to-right pass over the visible reviews. Each review emits
//! one review block, possibly followed by secondary blocks. The four
//! insertion rules are independent and may co-occur after the same review.
//! Counters are explicit so each rule is unit-testable on its own.

use crate::models::ContentBlock;
use ranking_engine::Review;

/// Copy pool for the completeness notice. Selection keys off the question
/// id length, matching the shipped behavior.
const COMPLETENESS_MESSAGES: &[&str] = &[
    "Every story here was shared by a real traveller, in their own words.",
    "These are unedited experiences from people who felt the same way before going.",
    "Nothing here is scripted. Travellers wrote these after coming home.",
];

/// Copy pool for breather interstitials; cycles independently of the cadence.
const BREATHER_MESSAGES: &[&str] = &[
    "Take a breath. There's no rush to decide anything today.",
    "Wherever you are right now is a fine place to start.",
    "Plenty of travellers felt exactly this way before their first trip.",
    "You can close this tab and come back. The stories will still be here.",
];

/// Intense-review counts between consecutive breathers.
const BREATHER_CADENCE: &[usize] = &[5, 6, 7];
/// Intensity at or above which a review counts toward the breather cadence.
const INTENSE_THRESHOLD: f64 = 0.75;

/// Zero-based review positions the threshold blocks anchor to.
const COMPLETENESS_INDEX: usize = 4;
const PROMPT_INDEX: usize = 5;
const CONVERSION_INDEX: usize = 7;

/// Session-derived conditions, evaluated once per assembly pass.
#[derive(Debug, Clone, Copy)]
pub struct BlockFlags {
    pub scrolled_past_six: bool,
    pub has_intent: bool,
    pub show_conversion_card: bool,
}

/// Interleave secondary blocks into the visible review window.
///
/// Threshold blocks (completeness, prompt, conversion) land immediately
/// after their anchor review; when the window is non-empty but too short to
/// contain the anchor, they append at the end instead. An empty window
/// yields an empty stream.
pub fn assemble(visible: &[Review], question_id: &str, flags: BlockFlags) -> Vec<ContentBlock> {
    if visible.is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::with_capacity(visible.len() + 4);
    let mut completeness_done = false;
    let mut prompt_done = false;
    let mut conversion_done = false;

    let mut intense_count = 0usize;
    let mut cadence_idx = 0usize;
    let mut next_breather_at = BREATHER_CADENCE[0];
    let mut breather_msg_idx = 0usize;

    for (idx, review) in visible.iter().enumerate() {
        blocks.push(ContentBlock::Review {
            review: review.clone(),
        });

        if flags.scrolled_past_six && !completeness_done && idx == COMPLETENESS_INDEX {
            blocks.push(completeness_block(question_id));
            completeness_done = true;
        }
        if flags.has_intent && !prompt_done && idx == PROMPT_INDEX {
            blocks.push(ContentBlock::PersonalizationPrompt);
            prompt_done = true;
        }
        if flags.show_conversion_card && !conversion_done && idx == CONVERSION_INDEX {
            blocks.push(ContentBlock::ConversionCard);
            conversion_done = true;
        }

        if review.intensity_score >= INTENSE_THRESHOLD {
            intense_count += 1;
            if intense_count >= next_breather_at {
                blocks.push(ContentBlock::Breather {
                    text: BREATHER_MESSAGES[breather_msg_idx % BREATHER_MESSAGES.len()]
                        .to_string(),
                });
                breather_msg_idx += 1;
                intense_count = 0;
                cadence_idx = (cadence_idx + 1) % BREATHER_CADENCE.len();
                next_breather_at = BREATHER_CADENCE[cadence_idx];
            }
        }
    }

    // Short-window fallbacks: the condition held but the anchor index never
    // existed, so the block appends at the end.
    if flags.scrolled_past_six && !completeness_done {
        blocks.push(completeness_block(question_id));
    }
    if flags.has_intent && !prompt_done {
        blocks.push(ContentBlock::PersonalizationPrompt);
    }
    if flags.show_conversion_card && !conversion_done {
        blocks.push(ContentBlock::ConversionCard);
    }

    blocks
}

fn completeness_block(question_id: &str) -> ContentBlock {
    let idx = question_id.len() % COMPLETENESS_MESSAGES.len();
    ContentBlock::Completeness {
        text: COMPLETENESS_MESSAGES[idx].to_string(),
    }
}
