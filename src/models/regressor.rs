//! Pre-trained regressors.
//!
//! A model artifact is opaque to the pipeline apart from its contract: it
//! takes the 18-column row in schema order and returns one scalar. Two
//! persisted families are understood:
//!
//! - `linear`: intercept plus one coefficient per column
//! - `tree_ensemble`: boosted regression trees, `base_score + Σ leaf(tree)`
//!
//! Every artifact records the feature names it was trained on; loading fails
//! unless they match the schema exactly.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::features::{FEATURE_COUNT, FeatureRow, column_names};

/// One node of a regression tree.
///
/// Splits send `x[feature] < threshold` to `left`, everything else to `right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A flat regression tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Children must point forward, which rules out cycles and keeps
    /// evaluation bounded by the node count.
    fn validate(&self, width: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split { feature, threshold, left, right } => {
                    if *feature >= width {
                        return Err(format!("node {i} splits on feature {feature} (width {width})"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= self.nodes.len() {
                            return Err(format!("node {i} has invalid child {child}"));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {i} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Callers must pass a row at least as wide as the validated tree.
    pub(crate) fn evaluate(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split { feature, threshold, left, right } => {
                    idx = if x[*feature] < *threshold { *left } else { *right };
                }
            }
        }
    }
}

/// Fitted regressor parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Regressor {
    Linear { intercept: f64, coefficients: Vec<f64> },
    TreeEnsemble { base_score: f64, trees: Vec<Tree> },
}

impl Regressor {
    fn validate(&self) -> Result<(), String> {
        match self {
            Regressor::Linear { intercept, coefficients } => {
                if coefficients.len() != FEATURE_COUNT {
                    return Err(format!(
                        "linear model has {} coefficients, expected {FEATURE_COUNT}",
                        coefficients.len()
                    ));
                }
                if !intercept.is_finite() || !coefficients.iter().all(|c| c.is_finite()) {
                    return Err("linear model parameters must be finite".to_string());
                }
            }
            Regressor::TreeEnsemble { base_score, trees } => {
                if !base_score.is_finite() {
                    return Err("base_score must be finite".to_string());
                }
                if trees.is_empty() {
                    return Err("tree ensemble has no trees".to_string());
                }
                for (i, tree) in trees.iter().enumerate() {
                    tree.validate(FEATURE_COUNT).map_err(|e| format!("tree {i}: {e}"))?;
                }
            }
        }
        Ok(())
    }

    /// Evaluate on a row laid out in schema order. Only reached through
    /// [`ModelArtifact::predict`], after validation.
    pub(crate) fn predict(&self, x: &[f64]) -> f64 {
        match self {
            Regressor::Linear { intercept, coefficients } => {
                let x = DVector::from_column_slice(x);
                let w = DVector::from_column_slice(coefficients);
                intercept + w.dot(&x)
            }
            Regressor::TreeEnsemble { base_score, trees } => {
                base_score + trees.iter().map(|t| t.evaluate(x)).sum::<f64>()
            }
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            Regressor::Linear { .. } => "linear",
            Regressor::TreeEnsemble { .. } => "tree_ensemble",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawModel {
    feature_names: Vec<String>,
    #[serde(flatten)]
    regressor: Regressor,
}

/// A trained model bound to its (validated) training schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawModel")]
pub struct ModelArtifact {
    feature_names: Vec<String>,
    #[serde(flatten)]
    regressor: Regressor,
}

impl TryFrom<RawModel> for ModelArtifact {
    type Error = String;

    fn try_from(raw: RawModel) -> Result<Self, Self::Error> {
        ModelArtifact::new(raw.feature_names, raw.regressor)
    }
}

impl ModelArtifact {
    pub fn new(feature_names: Vec<String>, regressor: Regressor) -> Result<Self, String> {
        let expected = column_names();
        if feature_names.len() != expected.len() {
            return Err(format!(
                "model was trained on {} features, expected {}",
                feature_names.len(),
                expected.len()
            ));
        }
        for (i, (got, want)) in feature_names.iter().zip(expected).enumerate() {
            if got != want {
                return Err(format!("feature {i} is '{got}', expected '{want}'"));
            }
        }
        regressor.validate()?;
        Ok(Self {
            feature_names,
            regressor,
        })
    }

    /// Build an artifact for the canonical schema.
    pub fn for_schema(regressor: Regressor) -> Result<Self, String> {
        Self::new(column_names().map(str::to_string).to_vec(), regressor)
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn regressor(&self) -> &Regressor {
        &self.regressor
    }

    pub fn predict(&self, row: &FeatureRow) -> f64 {
        self.regressor.predict(row.as_slice())
    }
}
