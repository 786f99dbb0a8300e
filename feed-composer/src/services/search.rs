//! Free-text filtering of the ranked sequence.
//!
//! Applied after ranking and before windowing; ranking order is preserved.

use ranking_engine::{RankedReview, Review};

/// Case-insensitive substring match across the review's text fields.
pub fn matches_query(review: &Review, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    let mut haystack = String::new();
    haystack.push_str(&review.quote);
    for field in [&review.name, &review.city] {
        if let Some(value) = field {
            haystack.push(' ');
            haystack.push_str(value);
        }
    }
    haystack.push(' ');
    haystack.push_str(&review.context);
    if let Some(story) = &review.story {
        haystack.push(' ');
        haystack.push_str(story);
    }

    haystack.to_lowercase().contains(&needle)
}

/// Keep only items matching the trimmed query.
pub fn apply_filter(items: Vec<RankedReview>, query: &str) -> Vec<RankedReview> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| matches_query(&item.review, trimmed))
        .collect()
}
