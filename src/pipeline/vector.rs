//! Ordered named feature columns.
//!
//! `FeatureFrame` is the mutable working set while encoding;
//! `FeatureVector` is the finished, reordered result handed to the
//! classifier. Reordering is the last encoding step and must match the
//! trained column order exactly; a missing or extra column causes an
//! undetectable misprediction, so it fails instead.

use super::PredictError;
use crate::artifacts::StandardScaler;

/// Named f64 columns in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FeatureFrame {
    columns: Vec<(String, f64)>,
}

impl FeatureFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a column, replacing any existing value under the name.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.columns.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Apply a standard scaler to exactly its listed columns, in the
    /// stored column order.
    pub fn scale(&mut self, scaler: &StandardScaler) -> Result<(), PredictError> {
        for (i, col) in scaler.columns.iter().enumerate() {
            let slot = self
                .columns
                .iter_mut()
                .find(|(n, _)| n == col)
                .ok_or_else(|| {
                    PredictError::FeatureMismatch(format!("scaler column '{col}' not present"))
                })?;
            slot.1 = scaler.transform(i, slot.1);
        }
        Ok(())
    }

    /// Reindex into the trained feature order. Any missing or extra
    /// column is fatal.
    pub fn reorder(self, feature_order: &[String]) -> Result<FeatureFrame, PredictError> {
        let mut ordered = Vec::with_capacity(feature_order.len());
        for name in feature_order {
            let value = self.get(name).ok_or_else(|| {
                PredictError::FeatureMismatch(format!("encoded input is missing column '{name}'"))
            })?;
            ordered.push((name.clone(), value));
        }
        if self.columns.len() != feature_order.len() {
            let extra: Vec<&str> = self
                .columns
                .iter()
                .filter(|(n, _)| !feature_order.iter().any(|f| f == n))
                .map(|(n, _)| n.as_str())
                .collect();
            return Err(PredictError::FeatureMismatch(format!(
                "encoded input has unexpected columns: {}",
                extra.join(", ")
            )));
        }
        Ok(FeatureFrame { columns: ordered })
    }

    pub fn into_vector(self) -> FeatureVector {
        let (names, values) = self.columns.into_iter().unzip();
        FeatureVector { names, values }
    }
}

/// Finished model input: column names and values in trained order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
