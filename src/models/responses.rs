use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredProduct;
use crate::services::AnalysisResult;

/// Single recommended product as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub product_id: String,
    pub product_name: String,
    pub score: f64,
    pub reason: String,
    pub category: String,
    pub price: f64,
    pub description: String,
}

impl From<&ScoredProduct> for RecommendationItem {
    fn from(scored: &ScoredProduct) -> Self {
        Self {
            product_id: scored.product.id.clone(),
            product_name: scored.product.name.clone(),
            score: scored.score,
            reason: scored.reason.clone(),
            category: scored.product.category.as_str().to_string(),
            price: scored.product.price,
            description: scored.product.description.clone(),
        }
    }
}

/// Response for the recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationItem>,
    pub model_version: String,
    pub confidence: f64,
    /// Seconds spent producing the list
    pub processing_time: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Response for the embedding endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
    pub model: String,
    pub cached: bool,
    pub dimension: usize,
    #[serde(rename = "cacheKey")]
    pub cache_key: String,
}

/// Response for the analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis_type: String,
    pub file_name: Option<String>,
    pub file_type: String,
    pub result: AnalysisResult,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Service banner for the root path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub models: Vec<String>,
    pub catalog_size: usize,
    pub cached_embeddings: u64,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
