//! Per-disease feature encoders: deterministic transforms from one raw
//! clinical input to one model-ready feature vector, applying the
//! trained label/one-hot/multi-label encoders and scalers in the exact
//! order used at training time, then reindexing into the trained
//! feature order.
//!
//! Unknown-category policy: fail fast everywhere. Any raw value absent
//! from a trained vocabulary (including a member of a comorbidity
//! list) is `PredictError::UnknownCategory`.

pub mod age;
pub mod diabetes;
pub mod heart_failure;
pub mod pneumonia;

pub use age::age_bucket;

use super::PredictError;
use crate::artifacts::EncoderSet;

/// Look up a label code, failing fast on vocabulary misses. A missing
/// table altogether means the artifact set does not match this
/// encoder's schema.
pub(crate) fn label_code(
    encoders: &EncoderSet,
    field: &str,
    value: &str,
) -> Result<f64, PredictError> {
    let table = encoders.label(field).ok_or_else(|| {
        PredictError::FeatureMismatch(format!("no label encoder for field '{field}'"))
    })?;
    table
        .code(value)
        .map(|c| c as f64)
        .ok_or_else(|| PredictError::UnknownCategory {
            field: field.to_string(),
            value: value.to_string(),
        })
}
