//! The prediction pipeline: raw clinical input → feature encoding →
//! classifier inference → risk tiering → feature attribution →
//! narrative explanation → response envelope.
//!
//! Each request computes synchronously end-to-end over read-only
//! shared artifacts; the only network-bound step is the narrative
//! generation call, which is timeout-bounded and never blocks other
//! requests.

pub mod attribution;
pub mod classify;
pub mod encode;
pub mod explain;
pub mod predictor;
pub mod risk;
pub mod vector;

pub use attribution::*;
pub use classify::*;
pub use explain::ExplainError;
pub use predictor::*;
pub use risk::*;
pub use vector::*;

use thiserror::Error;

use crate::artifacts::ArtifactError;

/// Error taxonomy for one prediction request. None of these are
/// retried automatically; each surfaces as a request-level failure
/// with a distinguishing code at the API layer.
#[derive(Error, Debug)]
pub enum PredictError {
    /// Malformed or out-of-range input (e.g. age outside [0, 99]).
    #[error("invalid input: {0}")]
    Validation(String),

    /// Categorical value absent from the trained vocabulary. Never
    /// silently default-coded: a model trained on fixed integer codes
    /// produces meaningless output for unseen categories.
    #[error("unknown category '{value}' for field '{field}'")]
    UnknownCategory { field: String, value: String },

    /// Encoded vector shape/order mismatch against the trained
    /// feature order. Always fatal, never auto-corrected.
    #[error("feature mismatch: {0}")]
    FeatureMismatch(String),

    #[error("model artifacts unavailable: {0}")]
    ModelUnavailable(#[from] ArtifactError),

    /// Classifier or attribution evaluation failure.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Narrative generation failure. The already-computed prediction
    /// and attribution remain valid; callers may serve them without a
    /// narrative.
    #[error("explanation unavailable: {0}")]
    ExplanationUnavailable(#[from] ExplainError),
}
