//! Prediction outputs: the internal result/attribution pair, the audit
//! record, and the HTTP response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Disease, RiskTier};

/// Outcome of classifier inference plus risk tiering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 0 or 1.
    pub predicted_class: u8,
    /// Positive-class probability, unrounded.
    pub probability: f64,
    pub risk_tier: RiskTier,
}

/// Per-feature signed contributions for one prediction instance,
/// aligned with the feature vector's column order. `base_value` is the
/// model's expected margin before contributions; contributions plus
/// base value reproduce the instance margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribution {
    pub features: Vec<String>,
    pub values: Vec<f64>,
    pub base_value: f64,
}

/// `shap` section of the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapSummary {
    pub features: Vec<String>,
    pub shap_values: Vec<f64>,
    pub base_value: f64,
}

impl From<Attribution> for ShapSummary {
    fn from(a: Attribution) -> Self {
        Self {
            features: a.features,
            shap_values: a.values,
            base_value: a.base_value,
        }
    }
}

/// Success response body for the prediction endpoints. Either the full
/// envelope is returned or a typed error, never a partial success,
/// except that `explanation` is omitted when the narrative service is
/// unavailable (the prediction itself is still valid).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionEnvelope {
    pub prediction: u8,
    /// Rounded to 4 decimal places for display.
    pub probability: f64,
    pub risk: RiskTier,
    pub shap: ShapSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Already-authenticated caller, as asserted by the upstream gateway.
/// The core never performs authentication itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: Uuid,
    pub name: Option<String>,
}

/// One append-only audit entry per served prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub user_name: Option<String>,
    pub disease: Disease,
    pub patient_id: String,
    pub input: serde_json::Value,
    pub predicted_class: u8,
    pub probability: f64,
    pub risk: RiskTier,
}

/// Round for the envelope only; upstream math keeps full precision.
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round4_truncates_to_display_precision() {
        assert_eq!(round4(0.123_456_78), 0.1235);
        assert_eq!(round4(0.9), 0.9);
        assert_eq!(round4(0.0), 0.0);
    }

    #[test]
    fn envelope_omits_missing_explanation() {
        let envelope = PredictionEnvelope {
            prediction: 1,
            probability: 0.9,
            risk: RiskTier::High,
            shap: ShapSummary {
                features: vec!["age".into()],
                shap_values: vec![0.5],
                base_value: 0.1,
            },
            explanation: None,
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("explanation").is_none());
        assert_eq!(json["risk"], "High");
    }

    #[test]
    fn envelope_serializes_explanation_when_present() {
        let envelope = PredictionEnvelope {
            prediction: 0,
            probability: 0.12,
            risk: RiskTier::Low,
            shap: ShapSummary {
                features: vec![],
                shap_values: vec![],
                base_value: 0.0,
            },
            explanation: Some("<p>Summary</p>".into()),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["explanation"], "<p>Summary</p>");
    }
}
