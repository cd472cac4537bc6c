use actix_web::{web, HttpResponse, Responder};

use crate::models::{HealthResponse, ServiceInfo};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check));
}

/// Service banner
async fn root() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        message: "Eye care recommendation service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "running".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Health check endpoint
///
/// Reports `degraded` when the catalog is empty, since every recommendation
/// would then be served from the fallback list.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let stats = state.embeddings.stats();
    let status = if state.catalog.is_empty() { "degraded" } else { "healthy" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        models: stats.models,
        catalog_size: state.catalog.len(),
        cached_embeddings: stats.entries,
    })
}
