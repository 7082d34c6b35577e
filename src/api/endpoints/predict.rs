//! Prediction endpoints, one per disease model.
//!
//! `POST /predict/pneumonia` · `POST /predict/heart_failure` ·
//! `POST /predict/diabetes`
//!
//! Each handler deserializes the disease-specific input, runs the
//! CPU-bound pipeline on the blocking pool, and returns the full
//! envelope or a typed error, never a partial success.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::{Extension, Json};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{
    CallerIdentity, DiabetesInput, HeartFailureInput, PneumoniaInput, PredictionEnvelope,
};

pub async fn pneumonia(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<CallerIdentity>,
    payload: Result<Json<PneumoniaInput>, JsonRejection>,
) -> Result<Json<PredictionEnvelope>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let predictor = ctx.predictor.clone();
    let envelope = tokio::task::spawn_blocking(move || {
        predictor.predict_pneumonia(&caller, &input)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(envelope))
}

pub async fn heart_failure(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<CallerIdentity>,
    payload: Result<Json<HeartFailureInput>, JsonRejection>,
) -> Result<Json<PredictionEnvelope>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let predictor = ctx.predictor.clone();
    let envelope = tokio::task::spawn_blocking(move || {
        predictor.predict_heart_failure(&caller, &input)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(envelope))
}

pub async fn diabetes(
    State(ctx): State<ApiContext>,
    Extension(caller): Extension<CallerIdentity>,
    payload: Result<Json<DiabetesInput>, JsonRejection>,
) -> Result<Json<PredictionEnvelope>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let predictor = ctx.predictor.clone();
    let envelope = tokio::task::spawn_blocking(move || {
        predictor.predict_diabetes(&caller, &input)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(Json(envelope))
}
