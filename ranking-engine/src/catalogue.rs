//! Validated wrapper around the catalogue provider's data.
//!
//! The provider hands over an ordered list of reviews and questions once at
//! startup. Construction checks the invariants the ranking layers rely on;
//! after that the catalogue is immutable and shared by reference.

use crate::models::{Question, Review};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("review {review_id} has an empty questionTags set")]
    EmptyQuestionTags { review_id: String },

    #[error("review {review_id} has intensityScore {value} outside [0, 1]")]
    IntensityOutOfRange { review_id: String, value: f64 },

    #[error("duplicate review id {review_id}")]
    DuplicateReviewId { review_id: String },

    #[error("default question {question_id} is not in the question list")]
    UnknownDefaultQuestion { question_id: String },
}

/// Immutable review/question catalogue with id lookups.
#[derive(Debug, Clone)]
pub struct Catalogue {
    reviews: Vec<Review>,
    questions: Vec<Question>,
    review_index: HashMap<String, usize>,
    default_question_index: usize,
}

impl Catalogue {
    /// Validate and index the provider's records. Catalogue order is
    /// preserved; it is the final ranking tie-break.
    pub fn new(
        reviews: Vec<Review>,
        questions: Vec<Question>,
        default_question_id: &str,
    ) -> Result<Self, CatalogueError> {
        let mut review_index = HashMap::with_capacity(reviews.len());
        for (idx, review) in reviews.iter().enumerate() {
            if review.question_tags.is_empty() {
                return Err(CatalogueError::EmptyQuestionTags {
                    review_id: review.id.clone(),
                });
            }
            if !(0.0..=1.0).contains(&review.intensity_score) {
                return Err(CatalogueError::IntensityOutOfRange {
                    review_id: review.id.clone(),
                    value: review.intensity_score,
                });
            }
            if review_index.insert(review.id.clone(), idx).is_some() {
                return Err(CatalogueError::DuplicateReviewId {
                    review_id: review.id.clone(),
                });
            }
        }

        let default_question_index = questions
            .iter()
            .position(|q| q.id == default_question_id)
            .ok_or_else(|| CatalogueError::UnknownDefaultQuestion {
                question_id: default_question_id.to_string(),
            })?;

        Ok(Self {
            reviews,
            questions,
            review_index,
            default_question_index,
        })
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn review_by_id(&self, id: &str) -> Option<&Review> {
        self.review_index.get(id).map(|&idx| &self.reviews[idx])
    }

    pub fn default_question(&self) -> &Question {
        &self.questions[self.default_question_index]
    }

    /// Resolve a question id to the question whose tag sets drive matching.
    ///
    /// Unknown ids and tagless pseudo-questions (the "exploring" entry) fall
    /// back to the default question.
    pub fn resolve_question(&self, id: &str) -> &Question {
        match self.questions.iter().find(|q| q.id == id) {
            Some(question) if !question.tags.is_empty() => question,
            _ => self.default_question(),
        }
    }

    /// The resolved question's tag sets, ready for a `RankingRequest`.
    pub fn question_tag_sets(&self, id: &str) -> (HashSet<String>, HashSet<String>) {
        let question = self.resolve_question(id);
        (
            question.tags.iter().cloned().collect(),
            question.adjacent_tags.iter().cloned().collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn create_test_review(id: &str, question_tags: &[&str], intensity: f64) -> Review {
        Review {
            id: id.to_string(),
            quote: "Worth every second".to_string(),
            name: None,
            city: None,
            context: "First group trip".to_string(),
            question_tags: question_tags.iter().map(|t| t.to_string()).collect(),
            intensity_score: intensity,
            helpful_count: 0,
            verified_trip: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 15, 9, 0, 0).unwrap(),
            media: None,
            story: None,
            persona_tags: vec![],
        }
    }

    fn create_test_questions() -> Vec<Question> {
        vec![
            Question {
                id: "solo_awkward".to_string(),
                text: "Will it be awkward travelling solo?".to_string(),
                tags: vec!["solo_awkward".to_string()],
                adjacent_tags: vec!["no_one".to_string()],
            },
            Question {
                id: "exploring".to_string(),
                text: "Just exploring".to_string(),
                tags: vec![],
                adjacent_tags: vec![],
            },
        ]
    }

    #[test]
    fn test_valid_catalogue() {
        let catalogue = Catalogue::new(
            vec![create_test_review("r1", &["solo_awkward"], 0.5)],
            create_test_questions(),
            "solo_awkward",
        )
        .unwrap();

        assert_eq!(catalogue.reviews().len(), 1);
        assert!(catalogue.review_by_id("r1").is_some());
        assert!(catalogue.review_by_id("missing").is_none());
    }

    #[test]
    fn test_rejects_empty_question_tags() {
        let result = Catalogue::new(
            vec![create_test_review("r1", &[], 0.5)],
            create_test_questions(),
            "solo_awkward",
        );
        assert!(matches!(
            result,
            Err(CatalogueError::EmptyQuestionTags { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_intensity() {
        let result = Catalogue::new(
            vec![create_test_review("r1", &["solo_awkward"], 1.2)],
            create_test_questions(),
            "solo_awkward",
        );
        assert!(matches!(
            result,
            Err(CatalogueError::IntensityOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalogue::new(
            vec![
                create_test_review("r1", &["solo_awkward"], 0.5),
                create_test_review("r1", &["no_one"], 0.2),
            ],
            create_test_questions(),
            "solo_awkward",
        );
        assert!(matches!(
            result,
            Err(CatalogueError::DuplicateReviewId { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_default_question() {
        let result = Catalogue::new(vec![], create_test_questions(), "nope");
        assert!(matches!(
            result,
            Err(CatalogueError::UnknownDefaultQuestion { .. })
        ));
    }

    #[test]
    fn test_exploring_resolves_to_default() {
        let catalogue =
            Catalogue::new(vec![], create_test_questions(), "solo_awkward").unwrap();

        let resolved = catalogue.resolve_question("exploring");
        assert_eq!(resolved.id, "solo_awkward");

        let resolved = catalogue.resolve_question("does-not-exist");
        assert_eq!(resolved.id, "solo_awkward");
    }
}
