//! Pneumonia feature encoder.
//!
//! Transform order (matching training): label-encode the three
//! categorical fields, binarize the comorbidity list against the
//! trained vocabulary, standard-scale the continuous columns, then
//! reindex into the trained feature order.

use super::{label_code, PredictError};
use crate::artifacts::DiseaseArtifacts;
use crate::models::PneumoniaInput;
use crate::pipeline::vector::{FeatureFrame, FeatureVector};

pub fn encode(
    input: &PneumoniaInput,
    artifacts: &DiseaseArtifacts,
) -> Result<FeatureVector, PredictError> {
    let enc = &artifacts.encoders;

    let mut frame = FeatureFrame::new();
    frame.insert("age", input.age as f64);
    frame.insert("gender", label_code(enc, "gender", input.gender.as_str())?);
    frame.insert("bmi", input.bmi);
    frame.insert(
        "smoking_status",
        label_code(enc, "smoking_status", input.smoking_status.as_str())?,
    );
    frame.insert("length_of_stay", input.length_of_stay as f64);
    frame.insert("num_prior_admissions", input.num_prior_admissions as f64);
    frame.insert("oxygen_saturation", input.oxygen_saturation);
    frame.insert("wbc_count", input.wbc_count);
    frame.insert("crp_level", input.crp_level);
    frame.insert("antibiotic_given", input.antibiotic_given as f64);
    frame.insert("icu_admission", input.icu_admission as f64);
    frame.insert(
        "discharge_disposition",
        label_code(
            enc,
            "discharge_disposition",
            input.discharge_disposition.as_str(),
        )?,
    );

    // Comorbidities: set membership over the trained vocabulary.
    let mlb = enc.multi_label.as_ref().ok_or_else(|| {
        PredictError::FeatureMismatch("no multi-label binarizer in artifact set".to_string())
    })?;
    let present = input.comorbidities.normalized();
    for item in &present {
        if !mlb.contains(item) {
            return Err(PredictError::UnknownCategory {
                field: mlb.field.clone(),
                value: item.clone(),
            });
        }
    }
    for class in &mlb.classes {
        let bit = present.iter().any(|p| p == class);
        frame.insert(class.clone(), if bit { 1.0 } else { 0.0 });
    }

    let scaler = artifacts.scaler.as_ref().ok_or_else(|| {
        PredictError::FeatureMismatch("no scaler in pneumonia artifact set".to_string())
    })?;
    frame.scale(scaler)?;

    Ok(frame.reorder(&artifacts.feature_order)?.into_vector())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{load_artifacts, store::testdata_dir};
    use crate::models::{Comorbidities, Disease};

    fn fixture_input() -> PneumoniaInput {
        serde_json::from_value(serde_json::json!({
            "patient_id": "PT-1001",
            "age": 60,
            "gender": "Male",
            "bmi": 30.0,
            "smoking_status": "Former",
            "length_of_stay": 8,
            "num_prior_admissions": 4,
            "oxygen_saturation": 89.0,
            "wbc_count": 12.0,
            "crp_level": 90.0,
            "antibiotic_given": 1,
            "icu_admission": 1,
            "discharge_disposition": "Nursing Facility",
            "comorbidities": "CHF,COPD"
        }))
        .unwrap()
    }

    #[test]
    fn golden_fixture_encodes_to_known_vector() {
        let artifacts = load_artifacts(&testdata_dir(), Disease::Pneumonia).unwrap();
        let vector = encode(&fixture_input(), &artifacts).unwrap();

        assert_eq!(vector.names, artifacts.feature_order);
        assert_eq!(
            vector.values,
            vec![
                1.0, // age (60 - 50) / 10
                1.0, // gender = Male
                1.0, // bmi (30 - 25) / 5
                1.0, // smoking_status = Former
                1.0, // length_of_stay (8 - 5) / 3
                1.0, // num_prior_admissions (4 - 2) / 2
                -2.0, // oxygen_saturation (89 - 95) / 3
                1.0, // wbc_count (12 - 8) / 4
                1.0, // crp_level (90 - 50) / 40
                1.0, // antibiotic_given
                1.0, // icu_admission
                2.0, // discharge_disposition = Nursing Facility
                1.0, 0.0, 1.0, 0.0, 0.0, // CHF, CKD, COPD, Diabetes, None
            ]
        );
    }

    #[test]
    fn encoding_is_deterministic_across_runs() {
        let artifacts = load_artifacts(&testdata_dir(), Disease::Pneumonia).unwrap();
        let first = encode(&fixture_input(), &artifacts).unwrap();
        let second = encode(&fixture_input(), &artifacts).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_comorbidity_fails_fast() {
        let artifacts = load_artifacts(&testdata_dir(), Disease::Pneumonia).unwrap();
        let mut input = fixture_input();
        input.comorbidities = Comorbidities::Text("CHF,Gout".into());
        let err = encode(&input, &artifacts).unwrap_err();
        match err {
            PredictError::UnknownCategory { field, value } => {
                assert_eq!(field, "comorbidities");
                assert_eq!(value, "Gout");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn column_count_and_order_match_trained_list() {
        let artifacts = load_artifacts(&testdata_dir(), Disease::Pneumonia).unwrap();
        let vector = encode(&fixture_input(), &artifacts).unwrap();
        assert_eq!(vector.len(), artifacts.feature_order.len());
        assert_eq!(vector.names, artifacts.feature_order);
    }
}
