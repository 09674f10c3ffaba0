//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, compression,
//! tracing) and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::MAX_UPLOAD_BYTES;

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
///
/// `allowed_origins` restricts CORS to the given origins; an empty list
/// keeps it permissive for local development.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let cors = cors_layer(allowed_origins);

    Router::new()
        .route("/", get(handlers::health_check))
        .route("/api/samples", get(handlers::list_samples))
        .route("/api/predict", post(handlers::predict))
        .route("/api/predict/upload", post(handlers::predict_upload))
        .route("/api/metrics", get(handlers::model_metrics))
        // Uploads are size-checked in the handler; the transport limit just
        // needs headroom above the cap so oversized files get the proper
        // error message instead of a blunt 413.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 2 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<axum::http::HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::services::PredictionService;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Arc::new(PredictionService::new()));
        let _router = create_router(state, &[]);
        // If we got here, router was created successfully
    }

    #[test]
    fn test_router_creation_with_origins() {
        let state = AppState::new(Arc::new(PredictionService::new()));
        let origins = vec!["https://cosmic-optic.example".to_string()];
        let _router = create_router(state, &origins);
    }
}
