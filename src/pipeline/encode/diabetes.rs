//! Diabetes feature encoder.
//!
//! Transform order (matching training): bucket the raw age into its
//! decade label, label-encode the fifteen categorical fields, then
//! reindex into the trained feature order. No scaler; the diabetes
//! model was trained on unscaled values.

use super::{age_bucket, label_code, PredictError};
use crate::artifacts::DiseaseArtifacts;
use crate::models::DiabetesInput;
use crate::pipeline::vector::{FeatureFrame, FeatureVector};

pub fn encode(
    input: &DiabetesInput,
    artifacts: &DiseaseArtifacts,
) -> Result<FeatureVector, PredictError> {
    let enc = &artifacts.encoders;

    let mut frame = FeatureFrame::new();
    frame.insert("time_in_hospital", input.time_in_hospital);
    frame.insert("time_in_hospital_max", input.time_in_hospital_max as f64);
    frame.insert("num_lab_procedures", input.num_lab_procedures);
    frame.insert("num_procedures", input.num_procedures);
    frame.insert("num_medications_mean", input.num_medications_mean);
    frame.insert("number_outpatient_sum", input.number_outpatient_sum as f64);
    frame.insert("number_emergency", input.number_emergency as f64);
    frame.insert("number_inpatient", input.number_inpatient as f64);
    frame.insert("number_diagnoses", input.number_diagnoses);
    frame.insert("admission_type_id", input.admission_type_id as f64);
    frame.insert(
        "discharge_disposition_id",
        input.discharge_disposition_id as f64,
    );
    frame.insert("admission_source_id", input.admission_source_id as f64);

    frame.insert("diag_1", label_code(enc, "diag_1", &input.diag_1)?);
    frame.insert("diag_2", label_code(enc, "diag_2", &input.diag_2)?);
    frame.insert("diag_3", label_code(enc, "diag_3", &input.diag_3)?);
    frame.insert(
        "metformin",
        label_code(enc, "metformin", input.metformin.as_str())?,
    );
    frame.insert(
        "glipizide",
        label_code(enc, "glipizide", input.glipizide.as_str())?,
    );
    frame.insert(
        "glyburide",
        label_code(enc, "glyburide", input.glyburide.as_str())?,
    );
    frame.insert("race", label_code(enc, "race", input.race.as_str())?);
    frame.insert("gender", label_code(enc, "gender", input.gender.as_str())?);

    let bucket = age_bucket(input.age)?;
    frame.insert("age", label_code(enc, "age", &bucket)?);

    frame.insert(
        "max_glu_serum",
        label_code(enc, "max_glu_serum", input.max_glu_serum.as_str())?,
    );
    frame.insert(
        "A1Cresult",
        label_code(enc, "A1Cresult", input.A1Cresult.as_str())?,
    );
    frame.insert("insulin", label_code(enc, "insulin", input.insulin.as_str())?);
    frame.insert("change", label_code(enc, "change", input.change.as_str())?);
    frame.insert(
        "diabetesMed",
        label_code(enc, "diabetesMed", &input.diabetesMed)?,
    );
    frame.insert(
        "medical_specialty",
        label_code(enc, "medical_specialty", input.medical_specialty.as_str())?,
    );

    Ok(frame.reorder(&artifacts.feature_order)?.into_vector())
}
