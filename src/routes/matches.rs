use crate::core::{SkillMatcher, SuggestionGenerator};
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, SuggestRequest, SuggestResponse};
use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Arc<SkillMatcher>,
    pub suggester: Arc<SuggestionGenerator>,
    pub max_results_cap: usize,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match", web::post().to(find_matches))
        .route("/suggest", web::post().to(suggest));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match endpoint
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "query": "string",
///   "pool": [{"id": "...", "name": "...", "skills": [], "tools": [], "isAvailable": true}],
///   "maxResults": 10
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Cap to keep ranking prompts and responses bounded
    let max_results = req.max_results.clamp(1, state.max_results_cap);

    tracing::info!(
        "Matching query against {} candidates, max_results: {}",
        req.pool.len(),
        max_results
    );

    let result = state
        .matcher
        .match_candidates(&req.query, &req.pool, max_results)
        .await;

    tracing::info!(
        "Returning {} matches (confidence: {:.2})",
        result.matches.len(),
        result.confidence
    );

    HttpResponse::Ok().json(result)
}

/// Suggestion endpoint
///
/// POST /api/v1/suggest
///
/// Request body:
/// ```json
/// {
///   "query": "string"
/// }
/// ```
async fn suggest(
    state: web::Data<AppState>,
    req: web::Json<SuggestRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let suggestions = state.suggester.suggest(&req.query).await;

    HttpResponse::Ok().json(SuggestResponse { suggestions })
}
