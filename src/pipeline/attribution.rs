//! Per-feature contribution scores for a single prediction, additive
//! in margin space.
//!
//! The method is matched to the model family:
//!
//! - logistic: exact linear attribution against the training-set
//!   background, `w_i * (x_i - mean_i)`; base value is the margin at
//!   the background point.
//! - gbdt: decision-path attribution. At each split on the instance's
//!   path, the change in the node's expected value is credited to the
//!   split feature; base value is the sum of root expectations plus
//!   the base margin.
//!
//! Both satisfy `base_value + Σ contributions == margin` for the
//! instance, up to floating-point error.

use crate::artifacts::{RiskModel, Tree, TreeNode};
use crate::models::Attribution;

use super::vector::FeatureVector;
use super::PredictError;

fn attribute_tree(
    tree: &Tree,
    values: &[f64],
    contributions: &mut [f64],
) -> Result<f64, PredictError> {
    let root = tree
        .root_value()
        .ok_or_else(|| PredictError::Inference("empty tree in ensemble".to_string()))?;

    let mut idx = 0usize;
    let mut current = root;
    for _ in 0..=tree.nodes.len() {
        match &tree.nodes[idx] {
            TreeNode::Leaf { .. } => return Ok(root),
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } => {
                let child = if values[*feature] < *threshold {
                    *left
                } else {
                    *right
                };
                let child_value = match &tree.nodes[child] {
                    TreeNode::Split { value, .. } => *value,
                    TreeNode::Leaf { value } => *value,
                };
                contributions[*feature] += child_value - current;
                current = child_value;
                idx = child;
            }
        }
    }
    Err(PredictError::Inference(
        "tree traversal did not reach a leaf".to_string(),
    ))
}

/// Compute the attribution for one instance under an already-fitted
/// model. Feature names and contribution order match the vector's
/// columns one-to-one.
pub fn attribute(model: &RiskModel, vector: &FeatureVector) -> Result<Attribution, PredictError> {
    if vector.len() != model.arity() {
        return Err(PredictError::Inference(format!(
            "feature vector has {} values but model expects {}",
            vector.len(),
            model.arity()
        )));
    }

    let mut contributions = vec![0.0; vector.len()];
    let base_value = match model {
        RiskModel::Logistic {
            weights,
            intercept,
            background_mean,
        } => {
            let mut base = *intercept;
            for i in 0..weights.len() {
                contributions[i] = weights[i] * (vector.values[i] - background_mean[i]);
                base += weights[i] * background_mean[i];
            }
            base
        }
        RiskModel::Gbdt {
            base_score, trees, ..
        } => {
            let mut base = *base_score;
            for tree in trees {
                base += attribute_tree(tree, &vector.values, &mut contributions)?;
            }
            base
        }
    };

    #[cfg(debug_assertions)]
    {
        let margin = super::classify::predict_margin(model, vector)?;
        let reconstructed = base_value + contributions.iter().sum::<f64>();
        debug_assert!(
            (margin - reconstructed).abs() < 1e-6,
            "attribution must reconstruct the margin: {margin} vs {reconstructed}"
        );
    }

    Ok(Attribution {
        features: vector.names.clone(),
        values: contributions,
        base_value,
    })
}

/// (feature, contribution) pairs sorted by descending |contribution|.
/// Ties keep the vector's column order.
pub fn rank_by_magnitude(attribution: &Attribution) -> Vec<(&str, f64)> {
    let mut pairs: Vec<(&str, f64)> = attribution
        .features
        .iter()
        .map(String::as_str)
        .zip(attribution.values.iter().copied())
        .collect();
    pairs.sort_by(|a, b| {
        b.1.abs()
            .partial_cmp(&a.1.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(names: &[&str], values: Vec<f64>) -> FeatureVector {
        FeatureVector {
            names: names.iter().map(|s| s.to_string()).collect(),
            values,
        }
    }

    #[test]
    fn linear_attribution_reconstructs_margin() {
        let model = RiskModel::Logistic {
            weights: vec![0.5, -1.0, 0.25],
            intercept: 0.1,
            background_mean: vec![1.0, 0.5, 2.0],
        };
        let v = vector(&["a", "b", "c"], vec![2.0, 1.0, 2.0]);
        let attribution = attribute(&model, &v).unwrap();

        let margin = super::super::classify::predict_margin(&model, &v).unwrap();
        let sum: f64 = attribution.values.iter().sum();
        assert!((attribution.base_value + sum - margin).abs() < 1e-12);
        // w * (x - mean) per feature.
        assert!((attribution.values[0] - 0.5).abs() < 1e-12);
        assert!((attribution.values[1] - (-0.5)).abs() < 1e-12);
        assert!((attribution.values[2] - 0.0).abs() < 1e-12);
    }

    #[test]
    fn tree_attribution_credits_path_splits() {
        // Root expects 0.3; going left on f0 lands in a leaf of 1.4,
        // so f0 is credited 1.1.
        let model = RiskModel::Gbdt {
            num_features: 2,
            base_score: 0.0,
            trees: vec![Tree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 0.0,
                        left: 1,
                        right: 2,
                        value: 0.3,
                    },
                    TreeNode::Leaf { value: 1.4 },
                    TreeNode::Leaf { value: -0.6 },
                ],
            }],
        };
        let v = vector(&["f0", "f1"], vec![-1.0, 5.0]);
        let attribution = attribute(&model, &v).unwrap();
        assert!((attribution.base_value - 0.3).abs() < 1e-12);
        assert!((attribution.values[0] - 1.1).abs() < 1e-12);
        assert_eq!(attribution.values[1], 0.0);
    }

    #[test]
    fn tree_attribution_reconstructs_margin_over_ensemble() {
        let model = RiskModel::Gbdt {
            num_features: 2,
            base_score: 0.05,
            trees: vec![
                Tree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 0,
                            threshold: 0.5,
                            left: 1,
                            right: 2,
                            value: 0.2,
                        },
                        TreeNode::Leaf { value: -0.1 },
                        TreeNode::Split {
                            feature: 1,
                            threshold: 1.5,
                            left: 3,
                            right: 4,
                            value: 0.6,
                        },
                        TreeNode::Leaf { value: 0.4 },
                        TreeNode::Leaf { value: 0.9 },
                    ],
                },
                Tree {
                    nodes: vec![TreeNode::Leaf { value: 0.3 }],
                },
            ],
        };
        let v = vector(&["f0", "f1"], vec![1.0, 2.0]);
        let attribution = attribute(&model, &v).unwrap();
        let margin = super::super::classify::predict_margin(&model, &v).unwrap();
        let sum: f64 = attribution.values.iter().sum();
        assert!((attribution.base_value + sum - margin).abs() < 1e-12);
    }

    #[test]
    fn ranking_orders_by_absolute_magnitude() {
        let attribution = Attribution {
            features: vec!["A".into(), "B".into(), "C".into()],
            values: vec![-0.5, 0.8, 0.1],
            base_value: 0.0,
        };
        let ranked = rank_by_magnitude(&attribution);
        let top2: Vec<&str> = ranked.iter().take(2).map(|(n, _)| *n).collect();
        assert_eq!(top2, vec!["B", "A"]);
    }
}
