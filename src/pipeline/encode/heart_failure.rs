//! Heart-failure feature encoder.
//!
//! Transform order (matching training): expand the three categorical
//! fields into one-hot `Field_Category` columns, reindex into the
//! trained feature order, then standard-scale the numeric columns.
//! Scaling after reordering mirrors the training pipeline; the values
//! are identical either way since scaling is per-column.

use super::PredictError;
use crate::artifacts::DiseaseArtifacts;
use crate::models::HeartFailureInput;
use crate::pipeline::vector::{FeatureFrame, FeatureVector};

pub fn encode(
    input: &HeartFailureInput,
    artifacts: &DiseaseArtifacts,
) -> Result<FeatureVector, PredictError> {
    let mut frame = FeatureFrame::new();
    frame.insert("Age", input.Age as f64);
    frame.insert("Length_of_Stay", input.Length_of_Stay as f64);
    frame.insert("Previous_Admissions", input.Previous_Admissions as f64);
    frame.insert("Pulse", input.Pulse as f64);
    frame.insert("Temperature", input.Temperature);
    frame.insert("Heart_Rate", input.Heart_Rate as f64);
    frame.insert("Systolic_BP", input.Systolic_BP as f64);
    frame.insert("Diastolic_BP", input.Diastolic_BP as f64);
    frame.insert("Respiratory_Rate", input.Respiratory_Rate as f64);
    frame.insert("BUN", input.BUN);
    frame.insert("Creatinine", input.Creatinine);
    frame.insert("Sodium", input.Sodium as f64);
    frame.insert("Hemoglobin", input.Hemoglobin);
    frame.insert("NT_proBNP", input.NT_proBNP);
    frame.insert("Ejection_Fraction", input.Ejection_Fraction as f64);

    for group in &artifacts.encoders.one_hot {
        let raw = match group.field.as_str() {
            "Gender" => input.Gender.as_str(),
            "Ethnicity" => input.Ethnicity.as_str(),
            "Discharge_Disposition" => input.Discharge_Disposition.as_str(),
            other => {
                return Err(PredictError::FeatureMismatch(format!(
                    "one-hot group '{other}' has no matching input field"
                )))
            }
        };
        if !group.categories.iter().any(|c| c == raw) {
            return Err(PredictError::UnknownCategory {
                field: group.field.clone(),
                value: raw.to_string(),
            });
        }
        for category in &group.categories {
            let hit = category == raw;
            frame.insert(group.column_name(category), if hit { 1.0 } else { 0.0 });
        }
    }

    let mut frame = frame.reorder(&artifacts.feature_order)?;
    let scaler = artifacts.scaler.as_ref().ok_or_else(|| {
        PredictError::FeatureMismatch("no scaler in heart-failure artifact set".to_string())
    })?;
    frame.scale(scaler)?;

    Ok(frame.into_vector())
}
