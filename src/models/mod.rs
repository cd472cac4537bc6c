// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, PriceRange, AgeRange, Product, ProductCategory, ScoredProduct, ScoringWeights};
pub use requests::{RecommendationRequest, EmbeddingRequest, AnalyzeQuery};
pub use responses::{RecommendationItem, RecommendationResponse, EmbeddingResponse, AnalysisResponse, ServiceInfo, HealthResponse, ErrorResponse};
