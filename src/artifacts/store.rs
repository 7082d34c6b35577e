//! Read-only disk store for per-disease artifact sets.
//!
//! Layout under the artifact root, one directory per disease:
//!
//! ```text
//! <root>/pneumonia/
//!   model.json       classifier parameters (RiskModel)
//!   threshold.json   {"best_threshold": 0.55}
//!   features.json    {"feature_order": ["age", ...]}
//!   encoders.json    label tables / multi-label vocab / one-hot groups
//!   scaler.json      optional standard-scaler parameters
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::encoders::{EncoderSet, StandardScaler};
use super::model::RiskModel;
use super::ArtifactError;
use crate::models::Disease;

#[derive(Debug, Deserialize)]
struct ThresholdFile {
    best_threshold: f64,
}

#[derive(Debug, Deserialize)]
struct FeaturesFile {
    feature_order: Vec<String>,
}

/// Everything needed to serve one disease model, loaded once and
/// shared immutably across requests.
#[derive(Debug, Clone)]
pub struct DiseaseArtifacts {
    pub disease: Disease,
    pub model: RiskModel,
    pub threshold: f64,
    pub feature_order: Vec<String>,
    pub encoders: EncoderSet,
    pub scaler: Option<StandardScaler>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|e| ArtifactError::Malformed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Load and cross-validate the artifact set for one disease.
pub fn load_artifacts(root: &Path, disease: Disease) -> Result<DiseaseArtifacts, ArtifactError> {
    let dir: PathBuf = root.join(disease.as_str());

    let model: RiskModel = read_json(&dir.join("model.json"))?;
    let threshold: ThresholdFile = read_json(&dir.join("threshold.json"))?;
    let features: FeaturesFile = read_json(&dir.join("features.json"))?;
    let encoders: EncoderSet = read_json(&dir.join("encoders.json"))?;

    let scaler_path = dir.join("scaler.json");
    let scaler: Option<StandardScaler> = if scaler_path.exists() {
        Some(read_json(&scaler_path)?)
    } else {
        None
    };

    let inconsistent = |detail: String| ArtifactError::Inconsistent {
        disease: disease.as_str().to_string(),
        detail,
    };

    model.validate().map_err(inconsistent)?;
    if model.arity() != features.feature_order.len() {
        return Err(inconsistent(format!(
            "model expects {} features but feature_order lists {}",
            model.arity(),
            features.feature_order.len()
        )));
    }
    if !(0.0..=1.0).contains(&threshold.best_threshold) {
        return Err(inconsistent(format!(
            "decision threshold {} outside [0, 1]",
            threshold.best_threshold
        )));
    }
    if let Some(scaler) = &scaler {
        scaler.validate().map_err(inconsistent)?;
        for col in &scaler.columns {
            if !features.feature_order.iter().any(|f| f == col) {
                return Err(inconsistent(format!(
                    "scaler column '{col}' is not a trained feature"
                )));
            }
        }
    }

    Ok(DiseaseArtifacts {
        disease,
        model,
        threshold: threshold.best_threshold,
        feature_order: features.feature_order,
        encoders,
        scaler,
    })
}

#[cfg(test)]
pub(crate) fn testdata_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}
