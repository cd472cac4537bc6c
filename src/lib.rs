//! Eyecare Reco - personalized eye-care product recommendation service
//!
//! This library provides the recommendation pipeline: profile extraction,
//! multi-factor scoring, stable ranking, reason generation and a fixed
//! fallback list, plus the embedding cache and content analyzers served by the
//! HTTP layer.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Recommender, RecommendationOutcome, FallbackProvider, extract_profile, rank, explain, calculate_match_score};
pub use crate::models::{UserProfile, Product, ProductCategory, ScoredProduct, ScoringWeights, RecommendationRequest, RecommendationResponse};
pub use crate::services::{ProductCatalog, EmbeddingCache};
