//! Derived applicant indicators: stability, regularity, and behavior scores
//! computed from the record's nested histories. Formulas and clamps are fixed;
//! trained model weights depend on them staying numerically identical.

use crate::record::ApplicantRecord;
use serde::{Deserialize, Serialize};

/// Divide-by-zero guard used by the ratio formulas.
pub const EPSILON: f64 = 1e-6;

/// The five derived indicators appended to the enhanced feature vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct BehavioralIndicators {
    pub income_stability: f64,
    pub transaction_regularity: f64,
    pub savings_ratio: f64,
    pub employment_stability: f64,
    pub behavioral_score: f64,
}

impl BehavioralIndicators {
    pub fn from_record(record: &ApplicantRecord) -> Self {
        Self {
            income_stability: Self::income_stability(record),
            transaction_regularity: Self::transaction_regularity(record),
            savings_ratio: Self::savings_ratio(record),
            employment_stability: Self::employment_stability(record),
            behavioral_score: Self::behavioral_score(record),
        }
    }

    /// `1 / (1 + coefficient_of_variation)`, capped at 1.0. Empty history or
    /// a non-positive mean scores 0.0.
    pub fn income_stability(record: &ApplicantRecord) -> f64 {
        let history = &record.income_history;
        if history.is_empty() {
            return 0.0;
        }
        let mean = mean(history);
        if mean <= 0.0 {
            return 0.0;
        }
        let variation = population_std(history, mean) / mean;
        (1.0 / (1.0 + variation)).min(1.0)
    }

    /// `1 - stddev(amounts) / (mean(amounts) + ε)`, clamped to [0, 1].
    /// No transactions scores 0.0.
    pub fn transaction_regularity(record: &ApplicantRecord) -> f64 {
        if record.transaction_history.is_empty() {
            return 0.0;
        }
        let amounts: Vec<f64> = record
            .transaction_history
            .iter()
            .map(|t| t.amount)
            .collect();
        let mean = mean(&amounts);
        let regularity = 1.0 - population_std(&amounts, mean) / (mean + EPSILON);
        regularity.clamp(0.0, 1.0)
    }

    /// `min(1, savings / (annual_income + ε))`; zero income scores 0.0.
    pub fn savings_ratio(record: &ApplicantRecord) -> f64 {
        if record.annual_income == 0.0 {
            return 0.0;
        }
        (record.savings_amount / (record.annual_income + EPSILON)).min(1.0)
    }

    /// Average job tenure normalized to a five-year horizon; no employment
    /// records scores 0.0.
    pub fn employment_stability(record: &ApplicantRecord) -> f64 {
        let jobs = &record.employment_history;
        if jobs.is_empty() {
            return 0.0;
        }
        let total_years: f64 = jobs.iter().map(|j| j.duration_years).sum();
        let avg_tenure = total_years / jobs.len() as f64;
        (avg_tenure / 5.0).min(1.0)
    }

    /// Weighted sum of the four behavior sub-scores, capped at 1.0:
    /// on-time payments 0.4, savings frequency 0.3, inverse overdraft
    /// frequency 0.2, mobile app usage 0.1.
    pub fn behavioral_score(record: &ApplicantRecord) -> f64 {
        let score = 0.4 * record.on_time_payment_ratio
            + 0.3 * record.savings_frequency
            + 0.2 * (1.0 - record.overdraft_frequency)
            + 0.1 * record.mobile_app_usage_score;
        score.min(1.0)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

// Population standard deviation: the training pipeline uses the biased
// estimator, so the serving side must too.
fn population_std(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
