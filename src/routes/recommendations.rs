use actix_web::{web, HttpResponse, Responder};
use std::time::Instant;
use validator::Validate;

use crate::config::RecommendationSettings;
use crate::models::{RecommendationItem, RecommendationRequest, RecommendationResponse};
use crate::routes::{bad_request, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendation", web::post().to(get_recommendations));
}

/// Personalized recommendation endpoint
///
/// POST /api/v1/recommendation
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "context": { "age": 30, "screenTimeHours": 8, "symptoms": ["eye_strain"] },
///   "topK": 5
/// }
/// ```
///
/// Always answers 200 once the request is valid: pipeline failures are
/// replaced by the fallback list and only show up in the logs.
async fn get_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(bad_request("Validation failed", errors.to_string()));
    }

    let top_k = resolve_top_k(req.top_k, &state.settings);
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("recommendation", %request_id, user_id = %req.user_id, top_k);

    let started = Instant::now();
    let outcome = span.in_scope(|| {
        state
            .recommender
            .recommend(state.catalog.products(), &req.context, top_k)
    });
    let processing_time = started.elapsed().as_secs_f64();

    let response = RecommendationResponse {
        recommendations: outcome.items.iter().map(RecommendationItem::from).collect(),
        model_version: state.settings.model_version.clone(),
        confidence: state.settings.confidence,
        processing_time,
        timestamp: chrono::Utc::now(),
    };

    HttpResponse::Ok().json(response)
}

/// Absent means the configured default, negative means zero, and the result
/// never exceeds the configured maximum
pub fn resolve_top_k(requested: Option<i64>, settings: &RecommendationSettings) -> usize {
    let top_k = match requested {
        Some(k) => usize::try_from(k).unwrap_or(0),
        None => settings.default_top_k,
    };
    top_k.min(settings.max_top_k)
}
