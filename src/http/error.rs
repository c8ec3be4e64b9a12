//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::inference::InferenceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Application error type for HTTP handlers.
///
/// Each variant maps to one terminal outcome of the prediction state machine;
/// none of them crash the process.
#[derive(Debug)]
pub enum AppError {
    /// The inference backend failed to initialize at startup
    BackendUnavailable,
    /// Invalid request (missing or malformed bounding-box fields)
    BadRequest(String),
    /// The backend raised during the prediction call
    Inference(InferenceError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BackendUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("Model failed to load on server startup."),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new(format!("Invalid input coordinates: {msg}")),
            ),
            AppError::Inference(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new(e.to_string()),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(msg)),
        };

        (status, Json(error)).into_response()
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::Inference(err)
    }
}
