//! HTTP handlers for the REST API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use super::dto::{HealthResponse, PredictRequest, PredictResponse};
use super::error::AppError;
use super::state::AppState;
use crate::inference::InputTensor;
use crate::models::sample_window;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and report whether
/// the inference backend loaded at startup.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let backend = if state.backend.is_some() {
        "loaded"
    } else {
        "unavailable"
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        backend: backend.to_string(),
    }))
}

/// POST /api/predict
///
/// Run one forward pass over a fixed-shape input patch and return the
/// predicted grid together with the sample's time window. Three terminal
/// outcomes, checked in order:
///
/// 1. backend missing (failed to load at startup) → 500, before the body is
///    even parsed;
/// 2. unparseable body or missing/malformed bounding-box fields → 400,
///    backend never invoked;
/// 3. inference, which either succeeds (200) or surfaces the backend error
///    (500) without retry.
///
/// The body is taken as a `Result` so a JSON parse failure lands in the
/// handler instead of short-circuiting in the extractor; the unavailable
/// check must win over input validity, and every 400 keeps the
/// `{"error": ...}` body shape.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> HandlerResult<PredictResponse> {
    let backend = state.backend.clone().ok_or(AppError::BackendUnavailable)?;

    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let bounds = request.bounds().map_err(AppError::BadRequest)?;
    // A non-simulated deployment would clip the input region to these bounds.
    tracing::debug!(?bounds, "received prediction bounds");

    let sample_index = request
        .sample_index
        .unwrap_or(state.config.default_sample_index);
    let time_details = sample_window(sample_index, &state.config.window());

    // Simulation behavior: synthetic input of the contracted shape.
    let input = InputTensor::random(state.config.input_shape());

    // The forward pass may block for an arbitrary duration; keep it off the
    // async workers.
    let prediction_results = tokio::task::spawn_blocking(move || backend.predict(&input))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {e}")))?
        .map_err(AppError::Inference)?;

    Ok(Json(PredictResponse {
        prediction_results,
        time_details,
    }))
}
