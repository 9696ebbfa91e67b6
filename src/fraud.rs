//! Transaction fraud assessment: five transaction features → binary
//! classifier probability → risk bucket and suspicion flag.

use crate::config::FraudConfig;
use crate::error::ScoreError;
use crate::features::FeatureVector;
use crate::model::ModelBundle;
use crate::record::TransactionRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

pub const FRAUD_FEATURE_DIM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FraudRiskLevel {
    Low,
    Medium,
    High,
}

impl FraudRiskLevel {
    pub fn from_probability(probability: f64, config: &FraudConfig) -> Self {
        if probability < config.medium_threshold {
            FraudRiskLevel::Low
        } else if probability < config.high_threshold {
            FraudRiskLevel::Medium
        } else {
            FraudRiskLevel::High
        }
    }
}

/// Fraud result for a single transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudAssessment {
    pub fraud_probability: f64,
    pub is_suspicious: bool,
    pub risk_level: FraudRiskLevel,
}

impl FraudAssessment {
    /// Suspicion requires strictly exceeding the high threshold; a
    /// probability sitting exactly on it buckets HIGH but is not flagged.
    pub fn from_probability(probability: f64, config: &FraudConfig) -> Self {
        Self {
            fraud_probability: probability,
            is_suspicious: probability > config.high_threshold,
            risk_level: FraudRiskLevel::from_probability(probability, config),
        }
    }
}

/// Fraud pipeline over the shared bundle's classifier. Fraud features are fed
/// to the model unscaled, matching how it was trained.
pub struct FraudDetector {
    config: FraudConfig,
    bundle: Arc<ModelBundle>,
}

impl FraudDetector {
    pub fn new(bundle: Arc<ModelBundle>, config: FraudConfig) -> Self {
        Self { config, bundle }
    }

    pub fn config(&self) -> &FraudConfig {
        &self.config
    }

    /// Transaction fields in model-input order.
    pub fn extract_features(transaction: &TransactionRecord) -> FeatureVector {
        FeatureVector {
            dim: FRAUD_FEATURE_DIM,
            values: vec![
                transaction.amount as f32,
                transaction.time_of_day as f32,
                transaction.distance_from_last_transaction as f32,
                transaction.frequency_last_24h as f32,
                transaction.average_transaction_amount as f32,
            ],
        }
    }

    pub fn assess(&self, transaction: &TransactionRecord) -> Result<FraudAssessment, ScoreError> {
        transaction.validate()?;
        let features = Self::extract_features(transaction);
        let probability = f64::from(self.bundle.predict_fraud(&features)?);
        let assessment = FraudAssessment::from_probability(probability, &self.config);
        debug!(
            probability = assessment.fraud_probability,
            level = ?assessment.risk_level,
            suspicious = assessment.is_suspicious,
            "fraud assessment"
        );
        Ok(assessment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_buckets() {
        let config = FraudConfig::default();
        assert_eq!(
            FraudRiskLevel::from_probability(0.0, &config),
            FraudRiskLevel::Low
        );
        assert_eq!(
            FraudRiskLevel::from_probability(0.29, &config),
            FraudRiskLevel::Low
        );
        assert_eq!(
            FraudRiskLevel::from_probability(0.3, &config),
            FraudRiskLevel::Medium
        );
        assert_eq!(
            FraudRiskLevel::from_probability(0.69, &config),
            FraudRiskLevel::Medium
        );
        assert_eq!(
            FraudRiskLevel::from_probability(0.7, &config),
            FraudRiskLevel::High
        );
        assert_eq!(
            FraudRiskLevel::from_probability(1.0, &config),
            FraudRiskLevel::High
        );
    }

    #[test]
    fn suspicion_is_strictly_above_threshold() {
        let config = FraudConfig::default();
        let on_threshold = FraudAssessment::from_probability(0.7, &config);
        assert_eq!(on_threshold.risk_level, FraudRiskLevel::High);
        assert!(!on_threshold.is_suspicious);

        let above = FraudAssessment::from_probability(0.75, &config);
        assert_eq!(above.risk_level, FraudRiskLevel::High);
        assert!(above.is_suspicious);
    }

    #[test]
    fn feature_order_matches_training() {
        let tx = TransactionRecord {
            amount: 250.0,
            time_of_day: 23.0,
            distance_from_last_transaction: 120.0,
            frequency_last_24h: 7.0,
            average_transaction_amount: 40.0,
        };
        let fv = FraudDetector::extract_features(&tx);
        assert_eq!(fv.dim, FRAUD_FEATURE_DIM);
        assert_eq!(fv.values, vec![250.0, 23.0, 120.0, 7.0, 40.0]);
    }
}
