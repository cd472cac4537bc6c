// Core algorithm exports
pub mod fallback;
pub mod profile;
pub mod ranking;
pub mod reasons;
pub mod recommender;
pub mod scoring;

pub use fallback::FallbackProvider;
pub use profile::extract_profile;
pub use ranking::rank;
pub use reasons::explain;
pub use recommender::{Recommender, RecommendationOutcome, RecommendationError};
pub use scoring::{calculate_match_score, FactorMatch, MatchScorer, Scorer, ScoringError};
