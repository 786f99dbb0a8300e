pub mod catalogue;
pub mod models;
pub mod services;
pub mod utils;

pub use catalogue::{Catalogue, CatalogueError};
pub use models::{
    GateStats, MediaAttachment, Question, RankedReview, RankingOutcome, RankingRequest, Review,
};
pub use services::{CandidateGate, IntensityPacer, RankingEngine, RelevanceScorer};
