use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};

use crate::models::{AnalysisResponse, AnalyzeQuery};
use crate::routes::{bad_request, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze", web::post().to(analyze_data));
}

/// Uploaded content analysis endpoint
///
/// POST /api/v1/analyze?analysisType=multimodal&fileName=report.pdf
///
/// The raw request body is analyzed according to its `Content-Type`.
async fn analyze_data(
    state: web::Data<AppState>,
    query: web::Query<AnalyzeQuery>,
    body: web::Bytes,
    http_req: HttpRequest,
) -> impl Responder {
    let file_type = http_req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    match state.analyzer.analyze(&body, &file_type) {
        Ok(result) => {
            tracing::debug!("Analyzed {} bytes of {}", body.len(), file_type);
            let query = query.into_inner();
            HttpResponse::Ok().json(AnalysisResponse {
                analysis_type: query.analysis_type,
                file_name: query.file_name,
                file_type,
                result,
                timestamp: chrono::Utc::now(),
            })
        }
        Err(e) => {
            tracing::error!("Data analysis failed: {}", e);
            HttpResponse::BadRequest().json(bad_request("Analysis failed", e.to_string()))
        }
    }
}
