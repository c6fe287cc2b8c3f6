// src/routes/mod.rs
pub mod chat;
pub mod slides;

use crate::{
    config::AppConfig,
    message::{HealthResponse, StatusMessage},
    state::SharedState,
};
use axum::{
    Json, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use chat::chat_handler;
use slides::generate_ppt_handler;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/chat", post(chat_handler))
        .route("/generate-ppt", post(generate_ppt_handler))
        .route("/health", get(health_handler))
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
}

/// Origin allow-list with credentials. Request headers are mirrored, since a
/// literal `*` is not permitted alongside credentials.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn root_handler() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "Slide generator API is running".to_string(),
    })
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
