//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::pipeline::PredictError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },
    #[error("Feature mismatch: {0}")]
    FeatureMismatch(String),
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Inference failed: {0}")]
    Inference(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Validation(detail) => ApiError::Validation(detail),
            PredictError::UnknownCategory { field, value } => {
                ApiError::UnknownCategory { field, value }
            }
            PredictError::FeatureMismatch(detail) => ApiError::FeatureMismatch(detail),
            PredictError::ModelUnavailable(e) => ApiError::ModelUnavailable(e.to_string()),
            PredictError::Inference(detail) => ApiError::Inference(detail),
            // The orchestrator serves predictions without narratives;
            // reaching here means a caller opted into a hard failure.
            PredictError::ExplanationUnavailable(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
            ),
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail.clone())
            }
            ApiError::Validation(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION",
                detail.clone(),
            ),
            ApiError::UnknownCategory { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNKNOWN_CATEGORY",
                self.to_string(),
            ),
            ApiError::FeatureMismatch(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "FEATURE_MISMATCH",
                detail.clone(),
            ),
            ApiError::ModelUnavailable(detail) => {
                tracing::error!(%detail, "model artifacts unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MODEL_UNAVAILABLE",
                    "Model artifacts unavailable".to_string(),
                )
            }
            ApiError::Inference(detail) => {
                tracing::error!(%detail, "inference failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INFERENCE",
                    "Prediction failed".to_string(),
                )
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}
