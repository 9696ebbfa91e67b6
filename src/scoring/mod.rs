//! Credit score composition: combines the raw model prediction with
//! rule-based component scores into a bounded score, a risk level, and
//! improvement guidance.

mod composer;

pub use composer::{adjustments, component_scores, compose_basic, compose_enhanced};

use crate::config::ScoringVariant;
use crate::error::ScoreError;
use crate::features::FeatureExtractor;
use crate::model::ModelBundle;
use crate::record::ApplicantRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Credit risk bucket for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 750.0 {
            RiskLevel::Excellent
        } else if score >= 700.0 {
            RiskLevel::Good
        } else if score >= 650.0 {
            RiskLevel::Fair
        } else if score >= 600.0 {
            RiskLevel::Poor
        } else {
            RiskLevel::VeryPoor
        }
    }
}

/// Normalized [0, 1] sub-scores, one per creditworthiness dimension.
/// Always clamped before weighting.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    pub payment_history: f64,
    pub credit_utilization: f64,
    pub credit_age: f64,
    pub income_stability: f64,
    pub behavioral: f64,
}

impl ComponentScores {
    /// Weighted sum: payment history 0.35, utilization 0.30, credit age 0.15,
    /// income stability 0.10, behavioral 0.10.
    pub fn weighted_total(&self) -> f64 {
        0.35 * self.payment_history
            + 0.30 * self.credit_utilization
            + 0.15 * self.credit_age
            + 0.10 * self.income_stability
            + 0.10 * self.behavioral
    }

    /// Percentage view (×100, two decimals) for the result breakdown.
    pub fn as_percentages(&self) -> ComponentScores {
        ComponentScores {
            payment_history: round2(self.payment_history * 100.0),
            credit_utilization: round2(self.credit_utilization * 100.0),
            credit_age: round2(self.credit_age * 100.0),
            income_stability: round2(self.income_stability * 100.0),
            behavioral: round2(self.behavioral * 100.0),
        }
    }
}

/// Full scoring result. Both variants produce this shape; only the score
/// composition differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditScoreResult {
    pub credit_score: f64,
    pub risk_level: RiskLevel,
    pub component_scores: ComponentScores,
    pub score_breakdown: ComponentScores,
    pub improvement_tips: Vec<String>,
    pub model_version: String,
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless scoring pipeline over an immutable bundle: extract → scale →
/// predict → compose. Safe to call from concurrent threads.
pub struct ScoringEngine {
    extractor: FeatureExtractor,
    bundle: Arc<ModelBundle>,
}

impl ScoringEngine {
    pub fn new(bundle: Arc<ModelBundle>) -> Self {
        Self {
            extractor: FeatureExtractor::new(),
            bundle,
        }
    }

    pub fn variant(&self) -> ScoringVariant {
        self.bundle.variant()
    }

    pub fn score(&self, record: &ApplicantRecord) -> Result<CreditScoreResult, ScoreError> {
        record.validate()?;
        let defaulted = record.defaulted_fields();
        if !defaulted.is_empty() {
            warn!(fields = ?defaulted, "scoring fields defaulted to zero");
        }

        let variant = self.bundle.variant();
        let features = match variant {
            ScoringVariant::Basic => self.extractor.extract_basic(record),
            ScoringVariant::Enhanced => self.extractor.extract_enhanced(record),
        };
        let raw = f64::from(self.bundle.predict_credit(&features)?);

        let result = match variant {
            ScoringVariant::Basic => {
                composer::compose_basic(record, raw, self.bundle.model_version())
            }
            ScoringVariant::Enhanced => {
                composer::compose_enhanced(record, raw, self.bundle.model_version())
            }
        };
        debug!(
            score = result.credit_score,
            level = ?result.risk_level,
            variant = ?variant,
            "credit score composed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_buckets_are_exhaustive() {
        assert_eq!(RiskLevel::from_score(850.0), RiskLevel::Excellent);
        assert_eq!(RiskLevel::from_score(750.0), RiskLevel::Excellent);
        assert_eq!(RiskLevel::from_score(749.99), RiskLevel::Good);
        assert_eq!(RiskLevel::from_score(700.0), RiskLevel::Good);
        assert_eq!(RiskLevel::from_score(650.0), RiskLevel::Fair);
        assert_eq!(RiskLevel::from_score(600.0), RiskLevel::Poor);
        assert_eq!(RiskLevel::from_score(599.99), RiskLevel::VeryPoor);
        assert_eq!(RiskLevel::from_score(300.0), RiskLevel::VeryPoor);
    }

    #[test]
    fn weighted_total_uses_fixed_weights() {
        let components = ComponentScores {
            payment_history: 1.0,
            credit_utilization: 1.0,
            credit_age: 1.0,
            income_stability: 1.0,
            behavioral: 1.0,
        };
        assert!((components.weighted_total() - 1.0).abs() < 1e-9);

        let only_payment = ComponentScores {
            payment_history: 1.0,
            ..ComponentScores::default()
        };
        assert!((only_payment.weighted_total() - 0.35).abs() < 1e-9);
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        let components = ComponentScores {
            payment_history: 0.123456,
            ..ComponentScores::default()
        };
        assert_eq!(components.as_percentages().payment_history, 12.35);
    }
}
