//! Feature extraction: applicant records → fixed-order numeric vectors.

mod behavioral;
mod pipeline;

pub use behavioral::BehavioralIndicators;
pub use pipeline::{FeatureExtractor, BASIC_FEATURE_DIM, ENHANCED_FEATURE_DIM};

use serde::{Deserialize, Serialize};

/// Fixed-order feature vector for model input. Position is load-bearing:
/// it must match the order used at scaler-fit and model-fit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub dim: usize,
    pub values: Vec<f32>,
}

impl FeatureVector {
    pub fn as_slice(&self) -> &[f32] {
        &self.values[..self.dim.min(self.values.len())]
    }
}
