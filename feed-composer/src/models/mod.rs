use ranking_engine::Review;
use serde::{Deserialize, Serialize};

/// One render-ready element of the composed feed. Consumed purely for
/// display; the renderer switches on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentBlock {
    #[serde(rename_all = "camelCase")]
    Review { review: Review },
    #[serde(rename_all = "camelCase")]
    Breather { text: String },
    #[serde(rename_all = "camelCase")]
    Completeness { text: String },
    PersonalizationPrompt,
    ConversionCard,
}

impl ContentBlock {
    pub fn is_review(&self) -> bool {
        matches!(self, ContentBlock::Review { .. })
    }
}

/// Feed response for the rendering layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedView {
    pub blocks: Vec<ContentBlock>,
    /// Drives the auxiliary "showing closest experiences" label.
    pub used_adjacent_tags: bool,
    /// Size of the full filtered/ranked sequence, before windowing.
    pub total_matches: usize,
    /// How many reviews are currently revealed.
    pub revealed_count: usize,
    pub has_more: bool,
}
