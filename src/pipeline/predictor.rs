//! Pipeline orchestrator: one entry point per disease model, each
//! running encode → inference → tiering → audit → attribution →
//! explanation and assembling the response envelope.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::artifacts::{ArtifactCache, DiseaseArtifacts};
use crate::audit::PredictionSink;
use crate::models::{
    round4, CallerIdentity, DiabetesInput, Disease, HeartFailureInput, PneumoniaInput,
    PredictionEnvelope, PredictionRecord, PredictionResult,
};

use super::attribution::attribute;
use super::classify::{predicted_class, predict_probability};
use super::encode;
use super::explain::{compose_explanation, TextGenerate};
use super::risk::risk_tier;
use super::vector::FeatureVector;
use super::PredictError;

pub struct Predictor {
    artifacts: Arc<ArtifactCache>,
    generator: Arc<dyn TextGenerate>,
    sink: Arc<dyn PredictionSink>,
}

impl Predictor {
    pub fn new(
        artifacts: Arc<ArtifactCache>,
        generator: Arc<dyn TextGenerate>,
        sink: Arc<dyn PredictionSink>,
    ) -> Self {
        Self {
            artifacts,
            generator,
            sink,
        }
    }

    pub fn predict_pneumonia(
        &self,
        caller: &CallerIdentity,
        input: &PneumoniaInput,
    ) -> Result<PredictionEnvelope, PredictError> {
        let artifacts = self.artifacts.get(Disease::Pneumonia)?;
        let vector = encode::pneumonia::encode(input, &artifacts)?;
        self.finish(&artifacts, caller, &input.patient_id, raw_input(input)?, vector)
    }

    pub fn predict_heart_failure(
        &self,
        caller: &CallerIdentity,
        input: &HeartFailureInput,
    ) -> Result<PredictionEnvelope, PredictError> {
        let artifacts = self.artifacts.get(Disease::HeartFailure)?;
        let vector = encode::heart_failure::encode(input, &artifacts)?;
        self.finish(&artifacts, caller, &input.patient_id, raw_input(input)?, vector)
    }

    pub fn predict_diabetes(
        &self,
        caller: &CallerIdentity,
        input: &DiabetesInput,
    ) -> Result<PredictionEnvelope, PredictError> {
        let artifacts = self.artifacts.get(Disease::Diabetes)?;
        let vector = encode::diabetes::encode(input, &artifacts)?;
        self.finish(&artifacts, caller, &input.patient_id, raw_input(input)?, vector)
    }

    fn finish(
        &self,
        artifacts: &DiseaseArtifacts,
        caller: &CallerIdentity,
        patient_id: &str,
        raw_input: serde_json::Value,
        vector: FeatureVector,
    ) -> Result<PredictionEnvelope, PredictError> {
        let probability = predict_probability(&artifacts.model, &vector)?;
        let class = predicted_class(probability, artifacts.threshold);
        let tier = risk_tier(class, probability);

        tracing::debug!(
            disease = %artifacts.disease.as_str(),
            predicted_class = class,
            probability,
            risk = %tier.as_str(),
            "prediction computed"
        );

        // Fire-and-forget: the audit trail must never fail a prediction.
        let record = PredictionRecord {
            id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            user_id: caller.user_id,
            user_name: caller.name.clone(),
            disease: artifacts.disease,
            patient_id: patient_id.to_string(),
            input: raw_input,
            predicted_class: class,
            probability,
            risk: tier,
        };
        if let Err(e) = self.sink.append(&record) {
            tracing::warn!(
                disease = %artifacts.disease.as_str(),
                error = %e,
                "prediction log append failed"
            );
        }

        let attribution = attribute(&artifacts.model, &vector)?;
        let result = PredictionResult {
            predicted_class: class,
            probability,
            risk_tier: tier,
        };

        // The prediction stands even when the narrative service is down.
        let explanation = match compose_explanation(self.generator.as_ref(), &result, &attribution)
        {
            Ok(narrative) => Some(narrative),
            Err(e) => {
                tracing::warn!(
                    disease = %artifacts.disease.as_str(),
                    error = %e,
                    "explanation unavailable, serving prediction without narrative"
                );
                None
            }
        };

        Ok(PredictionEnvelope {
            prediction: class,
            probability: round4(probability),
            risk: tier,
            shap: attribution.into(),
            explanation,
        })
    }
}

fn raw_input<T: serde::Serialize>(input: &T) -> Result<serde_json::Value, PredictError> {
    serde_json::to_value(input).map_err(|e| PredictError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::store::testdata_dir;
    use crate::audit::test_support::MemorySink;
    use crate::models::{Comorbidities, RiskTier};
    use crate::pipeline::explain::test_support::MockGenerator;
    use crate::pipeline::ExplainError;

    fn pneumonia_input() -> PneumoniaInput {
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

    fn caller() -> CallerIdentity {
        CallerIdentity {
            user_id: Uuid::new_v4(),
            name: Some("dr-lee".into()),
        }
    }

    fn predictor(generator: MockGenerator, sink: MemorySink) -> (Predictor, Arc<MemorySink>) {
        let sink = Arc::new(sink);
        let predictor = Predictor::new(
            Arc::new(ArtifactCache::new(testdata_dir())),
            Arc::new(generator),
            Arc::clone(&sink) as Arc<dyn PredictionSink>,
        );
        (predictor, sink)
    }

    #[test]
    fn pneumonia_fixture_yields_high_risk_with_narrative() {
        let (predictor, sink) = predictor(
            MockGenerator::returning("<h3>Summary</h3><p>High readmission risk.</p>"),
            MemorySink::new(),
        );
        let envelope = predictor
            .predict_pneumonia(&caller(), &pneumonia_input())
            .unwrap();

        // The fixture model's margin is ln(9): probability 0.9.
        assert_eq!(envelope.prediction, 1);
        assert_eq!(envelope.probability, 0.9);
        assert_eq!(envelope.risk, RiskTier::High);
        let explanation = envelope.explanation.unwrap();
        assert!(explanation.contains("Summary"));

        // Attribution is additively consistent and column-aligned.
        let sum: f64 = envelope.shap.shap_values.iter().sum();
        let margin = (0.9_f64 / 0.1).ln();
        assert!((envelope.shap.base_value + sum - margin).abs() < 1e-9);
        assert_eq!(envelope.shap.features.len(), envelope.shap.shap_values.len());

        let records = sink.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].patient_id, "PT-1001");
        assert_eq!(records[0].predicted_class, 1);
        assert_eq!(records[0].risk, RiskTier::High);
    }

    #[test]
    fn narrative_failure_keeps_the_prediction() {
        let (predictor, sink) = predictor(
            MockGenerator::failing(|| ExplainError::Timeout(60)),
            MemorySink::new(),
        );
        let envelope = predictor
            .predict_pneumonia(&caller(), &pneumonia_input())
            .unwrap();
        assert_eq!(envelope.prediction, 1);
        assert_eq!(envelope.risk, RiskTier::High);
        assert!(envelope.explanation.is_none());
        assert_eq!(sink.records.lock().unwrap().len(), 1);
    }

    #[test]
    fn sink_failure_does_not_fail_the_prediction() {
        let (predictor, _sink) = predictor(
            MockGenerator::returning("<p>Summary</p>"),
            MemorySink::failing(),
        );
        let envelope = predictor
            .predict_pneumonia(&caller(), &pneumonia_input())
            .unwrap();
        assert_eq!(envelope.prediction, 1);
    }

    #[test]
    fn unknown_category_surfaces_as_typed_error() {
        let (predictor, sink) =
            predictor(MockGenerator::returning("unused"), MemorySink::new());
        let mut input = pneumonia_input();
        input.comorbidities = Comorbidities::Text("CHF,Gout".into());
        let err = predictor.predict_pneumonia(&caller(), &input).unwrap_err();
        assert!(matches!(err, PredictError::UnknownCategory { .. }));
        // Nothing is logged for a failed prediction.
        assert!(sink.records.lock().unwrap().is_empty());
    }

    #[test]
    fn heart_failure_and_diabetes_models_serve_envelopes() {
        let (predictor, _sink) = predictor(
            MockGenerator::returning("<p>Summary</p>"),
            MemorySink::new(),
        );

        let hf: HeartFailureInput = serde_json::from_value(serde_json::json!({
            "patient_id": "PT-2002",
            "Age": 74,
            "Gender": "Female",
            "Ethnicity": "White",
            "Length_of_Stay": 9,
            "Previous_Admissions": 3,
            "Discharge_Disposition": "Home",
            "Pulse": 88,
            "Temperature": 37.1,
            "Heart_Rate": 92,
            "Systolic_BP": 134,
            "Diastolic_BP": 82,
            "Respiratory_Rate": 20,
            "BUN": 28.0,
            "Creatinine": 1.4,
            "Sodium": 136,
            "Hemoglobin": 11.8,
            "NT_proBNP": 4200.0,
            "Ejection_Fraction": 35
        }))
        .unwrap();
        let envelope = predictor.predict_heart_failure(&caller(), &hf).unwrap();
        assert!(envelope.probability >= 0.0 && envelope.probability <= 1.0);
        assert_eq!(envelope.shap.features.len(), envelope.shap.shap_values.len());

        let db: DiabetesInput = serde_json::from_value(serde_json::json!({
            "patient_id": "PT-3003",
            "time_in_hospital": 4.0,
            "time_in_hospital_max": 6,
            "num_lab_procedures": 45.0,
            "num_procedures": 1.0,
            "num_medications_mean": 16.0,
            "number_outpatient_sum": 0,
            "number_emergency": 1,
            "number_inpatient": 2,
            "number_diagnoses": 9.0,
            "admission_type_id": 1,
            "discharge_disposition_id": 1,
            "admission_source_id": 7,
            "diag_1": "428",
            "diag_2": "250.01",
            "diag_3": "401",
            "metformin": "Steady",
            "glipizide": "No",
            "glyburide": "No",
            "race": "Caucasian",
            "gender": "Female",
            "age": 67,
            "max_glu_serum": "Norm",
            "A1Cresult": ">8",
            "insulin": "Up",
            "change": "Ch",
            "diabetesMed": "Yes",
            "medical_specialty": "InternalMedicine"
        }))
        .unwrap();
        let envelope = predictor.predict_diabetes(&caller(), &db).unwrap();
        assert!(envelope.probability >= 0.0 && envelope.probability <= 1.0);
    }
}
