// Route exports
pub mod analysis;
pub mod embeddings;
pub mod health;
pub mod recommendations;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::config::{RecommendationSettings, Settings};
use crate::core::Recommender;
use crate::models::ErrorResponse;
use crate::services::{Analyzer, EmbeddingCache, ProductCatalog, StatisticsAnalyzer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProductCatalog>,
    pub recommender: Arc<Recommender>,
    pub embeddings: Arc<EmbeddingCache>,
    pub analyzer: Arc<dyn Analyzer>,
    pub settings: Arc<RecommendationSettings>,
}

impl AppState {
    /// Wire the pipeline components from configuration around a loaded catalog
    pub fn from_settings(settings: &Settings, catalog: ProductCatalog) -> Self {
        let embedding = &settings.embedding;

        Self {
            catalog: Arc::new(catalog),
            recommender: Arc::new(Recommender::new(settings.scoring_weights())),
            embeddings: Arc::new(EmbeddingCache::new(
                embedding.models.clone(),
                embedding.max_entries,
                embedding.ttl(),
            )),
            analyzer: Arc::new(StatisticsAnalyzer::default()),
            settings: Arc::new(settings.recommendation.clone()),
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope("/api/v1")
            .configure(recommendations::configure)
            .configure(embeddings::configure)
            .configure(analysis::configure),
    );
}

/// Error raised by the JSON and query extractors
#[derive(Debug)]
pub struct PayloadError(ErrorResponse);

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for PayloadError {}

impl error::ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    PayloadError(bad_request("invalid_json", format!("Invalid JSON: {}", err))).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query payload error on {}: {}", req.path(), err);
    PayloadError(bad_request("invalid_query", format!("Invalid query: {}", err))).into()
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: 400,
    }
}
