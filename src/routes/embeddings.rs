use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{EmbeddingRequest, EmbeddingResponse};
use crate::routes::{bad_request, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/embedding", web::post().to(generate_embedding));
}

/// Text embedding endpoint
///
/// POST /api/v1/embedding
///
/// Request body:
/// ```json
/// { "text": "string", "model": "text" }
/// ```
async fn generate_embedding(
    state: web::Data<AppState>,
    req: web::Json<EmbeddingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(bad_request("Validation failed", errors.to_string()));
    }

    match state.embeddings.get_or_compute(&req.text, &req.model) {
        Ok(embedding) => HttpResponse::Ok().json(EmbeddingResponse {
            dimension: embedding.vector.len(),
            embedding: embedding.vector.to_vec(),
            model: req.model.clone(),
            cached: embedding.cached,
            cache_key: embedding.key,
        }),
        Err(e) => {
            tracing::warn!("Embedding request rejected: {}", e);
            HttpResponse::BadRequest().json(bad_request("Embedding failed", e.to_string()))
        }
    }
}
