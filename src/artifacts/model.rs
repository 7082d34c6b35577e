//! Classifier parameters exported at training time.
//!
//! Two model families cover the trained estimators: a logistic model
//! (weights + intercept) and a gradient-boosted tree ensemble stored
//! as flattened binary trees. Both produce a margin; the positive
//! class probability is the sigmoid of that margin. Evaluation and
//! attribution live in `pipeline::classify` / `pipeline::attribution`.

use serde::{Deserialize, Serialize};

/// One node of a flattened decision tree. Internal nodes carry the
/// node's expected value so decision-path attribution can credit each
/// split with the change in expectation it causes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        value: f64,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn root_value(&self) -> Option<f64> {
        self.nodes.first().map(|n| match n {
            TreeNode::Split { value, .. } => *value,
            TreeNode::Leaf { value } => *value,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RiskModel {
    Logistic {
        weights: Vec<f64>,
        intercept: f64,
        /// Training-set feature means, the attribution background.
        background_mean: Vec<f64>,
    },
    Gbdt {
        num_features: usize,
        /// Margin added before any tree, e.g. xgboost's base_score margin.
        base_score: f64,
        trees: Vec<Tree>,
    },
}

impl RiskModel {
    /// Number of input features the model was trained on.
    pub fn arity(&self) -> usize {
        match self {
            RiskModel::Logistic { weights, .. } => weights.len(),
            RiskModel::Gbdt { num_features, .. } => *num_features,
        }
    }

    /// Structural checks run once at artifact load.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            RiskModel::Logistic {
                weights,
                background_mean,
                ..
            } => {
                if weights.len() != background_mean.len() {
                    return Err(format!(
                        "logistic arity mismatch: {} weights, {} background means",
                        weights.len(),
                        background_mean.len()
                    ));
                }
                Ok(())
            }
            RiskModel::Gbdt {
                num_features,
                trees,
                ..
            } => {
                for (t, tree) in trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return Err(format!("tree {t} has no nodes"));
                    }
                    for node in &tree.nodes {
                        if let TreeNode::Split {
                            feature,
                            left,
                            right,
                            ..
                        } = node
                        {
                            if *feature >= *num_features {
                                return Err(format!(
                                    "tree {t} splits on feature {feature} beyond arity {num_features}"
                                ));
                            }
                            if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                                return Err(format!("tree {t} has a dangling child index"));
                            }
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
