//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Prediction work is CPU-bound
//! (curve synthesis plus explanation), so it runs under `spawn_blocking`.

use axum::extract::{Multipart, State};
use axum::Json;

use crate::api::{
    has_allowed_extension, AnalysisResponse, HealthResponse, ModelMetrics, SampleListResponse,
    SampleSummary, SignalRequest, ALLOWED_UPLOAD_EXTENSIONS, MAX_UPLOAD_BYTES,
};
use crate::services;
use crate::services::MODEL_VERSION;

use super::error::AppError;
use super::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /
///
/// Health check endpoint to verify the service is running.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "operational".to_string(),
        service: "CosmicOptic API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_status: MODEL_VERSION.to_string(),
    })
}

/// GET /api/samples
///
/// List the available pre-loaded signals. Ground-truth labels and
/// generator parameters are intentionally not exposed.
pub async fn list_samples(State(state): State<AppState>) -> Json<SampleListResponse> {
    let samples = state
        .service
        .catalog()
        .iter()
        .map(|s| SampleSummary {
            id: s.id.to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
        })
        .collect();

    Json(SampleListResponse { samples })
}

/// POST /api/predict
///
/// Analyze a stellar light curve signal by sample id.
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<SignalRequest>,
) -> HandlerResult<AnalysisResponse> {
    simulate_latency(&state).await;

    let service = state.service.clone();
    let sample_id = request.sample_id;
    let result = tokio::task::spawn_blocking(move || service.predict(&sample_id))
        .await
        .map_err(|e| AppError::Internal(format!("task join error: {e}")))?;

    Ok(Json(result?))
}

/// POST /api/predict/upload
///
/// Accept an uploaded light-curve file and analyze it. File contents are
/// not parsed yet; the upload routes deterministically to a catalog sample.
pub async fn predict_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HandlerResult<AnalysisResponse> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let contents = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            upload = Some((file_name, contents));
            break;
        }
    }

    let (file_name, contents) = upload
        .ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".to_string()))?;

    if !has_allowed_extension(&file_name) {
        return Err(AppError::BadRequest(format!(
            "Invalid file type. Allowed: {}",
            ALLOWED_UPLOAD_EXTENSIONS.join(", ")
        )));
    }
    if contents.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::BadRequest(
            "File too large. Maximum size is 10 MB.".to_string(),
        ));
    }

    simulate_latency(&state).await;

    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || service.predict_upload(&contents))
        .await
        .map_err(|e| AppError::Internal(format!("task join error: {e}")))?;

    Ok(Json(result?))
}

/// GET /api/metrics
///
/// Published model performance metrics.
pub async fn model_metrics() -> Json<ModelMetrics> {
    Json(services::model_metrics())
}

async fn simulate_latency(state: &AppState) {
    if !state.simulated_latency.is_zero() {
        tokio::time::sleep(state.simulated_latency).await;
    }
}
