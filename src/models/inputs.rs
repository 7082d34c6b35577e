//! Raw clinical inputs as submitted by callers, one record type per
//! disease model. Field names and categorical vocabularies mirror the
//! training data exactly, including the heart-failure model's
//! capitalized column names. The `patient_id` field identifies the
//! patient for audit purposes and is never fed to a model.

use serde::{Deserialize, Deserializer, Serialize};

use super::enums::{
    A1CResult, DischargeDisposition, Ethnicity, Gender, HfDischargeDisposition, MaxGluSerum,
    MedAdjustment, MedChange, MedicalSpecialty, Race, SmokingStatus,
};

/// Accept only literal 0 or 1 for indicator fields.
fn bit_flag<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let v = u8::deserialize(deserializer)?;
    if v > 1 {
        return Err(serde::de::Error::custom(format!(
            "expected 0 or 1, got {v}"
        )));
    }
    Ok(v)
}

/// Comorbidity list, accepted either as a comma-separated string
/// ("CHF,COPD") or as a JSON array (["CHF", "COPD"]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Comorbidities {
    Text(String),
    List(Vec<String>),
}

impl Comorbidities {
    /// Split, trim, and drop empty entries. Order is preserved;
    /// the binarizer is set-valued so duplicates are harmless.
    pub fn normalized(&self) -> Vec<String> {
        let items: Vec<String> = match self {
            Comorbidities::Text(s) => s.split(',').map(str::to_string).collect(),
            Comorbidities::List(v) => v.clone(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PneumoniaInput {
    pub patient_id: String,
    pub age: i64,
    pub gender: Gender,
    pub bmi: f64,
    pub smoking_status: SmokingStatus,
    pub length_of_stay: i64,
    pub num_prior_admissions: i64,
    pub oxygen_saturation: f64,
    pub wbc_count: f64,
    pub crp_level: f64,
    #[serde(deserialize_with = "bit_flag")]
    pub antibiotic_given: u8,
    #[serde(deserialize_with = "bit_flag")]
    pub icu_admission: u8,
    pub discharge_disposition: DischargeDisposition,
    pub comorbidities: Comorbidities,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct HeartFailureInput {
    pub patient_id: String,
    pub Age: i64,
    pub Gender: Gender,
    pub Ethnicity: Ethnicity,
    pub Length_of_Stay: i64,
    pub Previous_Admissions: i64,
    pub Discharge_Disposition: HfDischargeDisposition,
    pub Pulse: i64,
    pub Temperature: f64,
    pub Heart_Rate: i64,
    pub Systolic_BP: i64,
    pub Diastolic_BP: i64,
    pub Respiratory_Rate: i64,
    pub BUN: f64,
    pub Creatinine: f64,
    pub Sodium: i64,
    pub Hemoglobin: f64,
    pub NT_proBNP: f64,
    pub Ejection_Fraction: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(non_snake_case)]
pub struct DiabetesInput {
    pub patient_id: String,
    pub time_in_hospital: f64,
    pub time_in_hospital_max: i64,
    pub num_lab_procedures: f64,
    pub num_procedures: f64,
    pub num_medications_mean: f64,
    pub number_outpatient_sum: i64,
    pub number_emergency: i64,
    pub number_inpatient: i64,
    pub number_diagnoses: f64,
    pub admission_type_id: i64,
    pub discharge_disposition_id: i64,
    pub admission_source_id: i64,
    pub diag_1: String,
    pub diag_2: String,
    pub diag_3: String,
    pub metformin: MedAdjustment,
    pub glipizide: MedAdjustment,
    pub glyburide: MedAdjustment,
    pub race: Race,
    pub gender: Gender,
    pub age: i64,
    pub max_glu_serum: MaxGluSerum,
    pub A1Cresult: A1CResult,
    pub insulin: MedAdjustment,
    pub change: MedChange,
    pub diabetesMed: String,
    pub medical_specialty: MedicalSpecialty,
}
