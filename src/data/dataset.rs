use serde::{Deserialize, Serialize};

/// One fully encoded training pair: a feature vector produced by
/// the FeatureEncoder and the binary target encoding of its label.
/// Built fresh per training run, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledExample {
    pub features: Vec<f64>,
    pub target:   Vec<f64>,
}

impl LabeledExample {
    pub fn new(features: Vec<f64>, target: Vec<f64>) -> Self {
        Self { features, target }
    }
}
