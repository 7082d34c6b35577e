//! Categorical and numeric encoder tables, fixed at training time.
//!
//! These are dumb lookup structures. Raising `UnknownCategoryError`
//! for values outside the trained vocabulary is the pipeline's job;
//! lookups here return `Option`/indices only.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category label → integer code, e.g. {"Female": 0, "Male": 1}.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: BTreeMap<String, i64>,
}

impl LabelEncoder {
    pub fn code(&self, label: &str) -> Option<i64> {
        self.classes.get(label).copied()
    }
}

/// Set-valued encoding: membership in each trained class becomes one
/// binary indicator column, in the trained class order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiLabelBinarizer {
    /// Raw input field consumed (e.g. "comorbidities").
    pub field: String,
    /// Trained vocabulary, in output column order.
    pub classes: Vec<String>,
}

impl MultiLabelBinarizer {
    pub fn contains(&self, label: &str) -> bool {
        self.classes.iter().any(|c| c == label)
    }
}

/// One-hot group: one input field expands to `field_category` columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneHotGroup {
    pub field: String,
    /// Trained categories, in output column order.
    pub categories: Vec<String>,
}

impl OneHotGroup {
    pub fn column_name(&self, category: &str) -> String {
        format!("{}_{}", self.field, category)
    }
}

/// Standard scaler: `(x - mean) / std` applied to exactly `columns`,
/// in the stored column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<String>,
    pub means: Vec<f64>,
    pub stds: Vec<f64>,
}

impl StandardScaler {
    /// Internal-consistency check run at artifact load.
    pub fn validate(&self) -> Result<(), String> {
        if self.columns.len() != self.means.len() || self.columns.len() != self.stds.len() {
            return Err(format!(
                "scaler arity mismatch: {} columns, {} means, {} stds",
                self.columns.len(),
                self.means.len(),
                self.stds.len()
            ));
        }
        if let Some(i) = self.stds.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(format!("scaler std for '{}' is degenerate", self.columns[i]));
        }
        Ok(())
    }

    pub fn transform(&self, index: usize, value: f64) -> f64 {
        (value - self.means[index]) / self.stds[index]
    }
}

/// Full encoder set for one disease model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderSet {
    #[serde(default)]
    pub labels: BTreeMap<String, LabelEncoder>,
    #[serde(default)]
    pub multi_label: Option<MultiLabelBinarizer>,
    #[serde(default)]
    pub one_hot: Vec<OneHotGroup>,
}

impl EncoderSet {
    pub fn label(&self, field: &str) -> Option<&LabelEncoder> {
        self.labels.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_encoder_lookup() {
        let enc = LabelEncoder {
            classes: BTreeMap::from([("Female".to_string(), 0), ("Male".to_string(), 1)]),
        };
        assert_eq!(enc.code("Male"), Some(1));
        assert_eq!(enc.code("Unknown"), None);
    }

    #[test]
    fn one_hot_column_names_join_with_underscore() {
        let group = OneHotGroup {
            field: "Discharge_Disposition".into(),
            categories: vec!["Home".into(), "Nursing Facility".into()],
        };
        assert_eq!(
            group.column_name("Nursing Facility"),
            "Discharge_Disposition_Nursing Facility"
        );
    }

    #[test]
    fn scaler_validation_catches_arity_and_zero_std() {
        let ok = StandardScaler {
            columns: vec!["age".into()],
            means: vec![50.0],
            stds: vec![10.0],
        };
        assert!(ok.validate().is_ok());
        assert_eq!(ok.transform(0, 60.0), 1.0);

        let short = StandardScaler {
            columns: vec!["age".into(), "bmi".into()],
            means: vec![50.0],
            stds: vec![10.0, 5.0],
        };
        assert!(short.validate().is_err());

        let degenerate = StandardScaler {
            columns: vec!["age".into()],
            means: vec![50.0],
            stds: vec![0.0],
        };
        assert!(degenerate.validate().is_err());
    }

    #[test]
    fn encoder_set_defaults_optional_sections() {
        let set: EncoderSet = serde_json::from_str(r#"{"labels": {}}"#).unwrap();
        assert!(set.multi_label.is_none());
        assert!(set.one_hot.is_empty());
    }
}
