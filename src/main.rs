mod config;
mod core;
mod models;
mod routes;
mod services;

use actix_cors::Cors;
use actix_web::{error, http::StatusCode, middleware, web, App, HttpResponse, HttpServer};
use config::Settings;
use core::{SkillMatcher, SuggestionGenerator};
use models::{ScoringWeights, StrategyLimits};
use routes::matches::AppState;
use services::{CompletionService, LlmClient};
use std::sync::Arc;
use tracing::{error, info};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting Rooms Match service...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // Initialize the completion client
    let llm: Arc<dyn CompletionService> = Arc::new(LlmClient::new(
        settings.llm.endpoint,
        settings.llm.api_key,
        settings.llm.model.clone(),
        settings.llm.timeout_secs.unwrap_or(30),
    ));

    info!("Completion client initialized (model: {})", settings.llm.model);

    // Initialize matcher with configured weights and thresholds
    let weights = ScoringWeights {
        skill: settings.scoring.weights.skill,
        tool: settings.scoring.weights.tool,
        availability: settings.scoring.weights.availability,
        reputation: settings.scoring.weights.reputation,
    };

    let limits = StrategyLimits {
        detailed_pool_max: settings.matching.detailed_pool_max.unwrap_or(50),
        hybrid_pool_cap: settings.matching.hybrid_pool_cap.unwrap_or(30),
    };

    let matcher = Arc::new(SkillMatcher::new(llm.clone(), weights, limits));
    let suggester = Arc::new(SuggestionGenerator::new(llm));

    info!(
        "Matcher initialized with weights: {:?}, limits: {:?}",
        weights, limits
    );

    // Build application state
    let app_state = AppState {
        matcher,
        suggester,
        max_results_cap: settings.matching.max_results_cap.unwrap_or(50),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
