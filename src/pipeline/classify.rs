//! Classifier evaluation: margin and positive-class probability for a
//! finished feature vector, plus the per-disease decision threshold.

use crate::artifacts::{RiskModel, Tree, TreeNode};

use super::vector::FeatureVector;
use super::PredictError;

pub fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

/// Walk one tree to its leaf for this instance.
fn tree_leaf(tree: &Tree, values: &[f64]) -> Result<f64, PredictError> {
    let mut idx = 0usize;
    // Bounded by node count; child indices were validated at load.
    for _ in 0..=tree.nodes.len() {
        match &tree.nodes[idx] {
            TreeNode::Leaf { value } => return Ok(*value),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                idx = if values[*feature] < *threshold {
                    *left
                } else {
                    *right
                };
            }
        }
    }
    Err(PredictError::Inference(
        "tree traversal did not reach a leaf".to_string(),
    ))
}

/// Raw margin (log-odds) of the positive class.
pub fn predict_margin(model: &RiskModel, vector: &FeatureVector) -> Result<f64, PredictError> {
    if vector.len() != model.arity() {
        return Err(PredictError::Inference(format!(
            "feature vector has {} values but model expects {}",
            vector.len(),
            model.arity()
        )));
    }

    let margin = match model {
        RiskModel::Logistic {
            weights, intercept, ..
        } => {
            intercept
                + weights
                    .iter()
                    .zip(&vector.values)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
        }
        RiskModel::Gbdt {
            base_score, trees, ..
        } => {
            let mut sum = *base_score;
            for tree in trees {
                sum += tree_leaf(tree, &vector.values)?;
            }
            sum
        }
    };

    if !margin.is_finite() {
        return Err(PredictError::Inference(
            "model produced a non-finite margin".to_string(),
        ));
    }
    Ok(margin)
}

/// Positive-class probability.
pub fn predict_probability(
    model: &RiskModel,
    vector: &FeatureVector,
) -> Result<f64, PredictError> {
    Ok(sigmoid(predict_margin(model, vector)?))
}

/// Threshold comparison: the threshold is calibrated per disease at
/// training time, deliberately not a hardcoded 0.5.
pub fn predicted_class(probability: f64, threshold: f64) -> u8 {
    u8::from(probability >= threshold)
}
