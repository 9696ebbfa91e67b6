//! Composition rules for the two scoring variants. The constants here are
//! fitted to the shipped models; changing one without retraining shifts every
//! score the engine produces.

use super::{round2, ComponentScores, CreditScoreResult, RiskLevel};
use crate::features::BehavioralIndicators;
use crate::record::ApplicantRecord;

pub const SCORE_FLOOR: f64 = 300.0;
pub const SCORE_CEILING: f64 = 850.0;

/// Additive rule-based adjustments for the basic variant. Rules are
/// independent; an applicant can earn all three.
pub fn adjustments(record: &ApplicantRecord) -> f64 {
    let mut adjustments = 0.0;

    if record.payment_history_score > 90.0 {
        adjustments += 50.0;
    }
    if record.years_of_credit_history > 5.0 {
        adjustments += 30.0;
    }
    if record.credit_utilization < 30.0 {
        adjustments += 40.0;
    }

    adjustments
}

/// Basic composition: raw prediction plus adjustments, clamped to the score
/// range and rounded to two decimals.
pub fn compose_basic(record: &ApplicantRecord, raw: f64, model_version: &str) -> CreditScoreResult {
    let score = round2((raw + adjustments(record)).clamp(SCORE_FLOOR, SCORE_CEILING));
    let components = component_scores(record);
    CreditScoreResult {
        credit_score: score,
        risk_level: RiskLevel::from_score(score),
        component_scores: components,
        score_breakdown: components.as_percentages(),
        improvement_tips: improvement_tips(&components),
        model_version: model_version.to_string(),
    }
}

/// Enhanced composition: the raw prediction is multiplied by the weighted
/// component sum before clamping. The multiplicative combination scales the
/// prediction down for weak components; it is part of the scoring contract.
pub fn compose_enhanced(
    record: &ApplicantRecord,
    raw: f64,
    model_version: &str,
) -> CreditScoreResult {
    let components = component_scores(record);
    let score = round2((raw * components.weighted_total()).clamp(SCORE_FLOOR, SCORE_CEILING));
    CreditScoreResult {
        credit_score: score,
        risk_level: RiskLevel::from_score(score),
        component_scores: components,
        score_breakdown: components.as_percentages(),
        improvement_tips: improvement_tips(&components),
        model_version: model_version.to_string(),
    }
}

/// The five component scores, each clamped to [0, 1] before weighting, even
/// for out-of-range inputs (used credit above the limit, negative years).
pub fn component_scores(record: &ApplicantRecord) -> ComponentScores {
    ComponentScores {
        payment_history: payment_history_score(record),
        credit_utilization: credit_utilization_score(record),
        credit_age: credit_age_score(record),
        income_stability: BehavioralIndicators::income_stability(record).clamp(0.0, 1.0),
        behavioral: BehavioralIndicators::behavioral_score(record).clamp(0.0, 1.0),
    }
}

/// `(on_time / total) * (1 - 0.1 * late)`; no recorded payments scores 0.0.
fn payment_history_score(record: &ApplicantRecord) -> f64 {
    let counts = record.payment_history;
    if counts.total == 0 {
        return 0.0;
    }
    let on_time_ratio = f64::from(counts.on_time) / f64::from(counts.total);
    let score = on_time_ratio * (1.0 - 0.1 * f64::from(counts.late));
    score.clamp(0.0, 1.0)
}

/// Inverse utilization; no reported credit line scores 0.0.
fn credit_utilization_score(record: &ApplicantRecord) -> f64 {
    if record.total_credit == 0.0 {
        return 0.0;
    }
    let utilization = record.used_credit / record.total_credit;
    (1.0 - utilization.min(1.0)).clamp(0.0, 1.0)
}

/// History length normalized to a ten-year horizon.
fn credit_age_score(record: &ApplicantRecord) -> f64 {
    (record.years_of_credit_history / 10.0).clamp(0.0, 1.0)
}

// Tip strings are part of the serving contract; the dashboard matches on them.
fn improvement_tips(components: &ComponentScores) -> Vec<String> {
    let mut tips = Vec::new();
    if components.payment_history < 0.8 {
        tips.push("Make all payments on time to improve your payment history".to_string());
    }
    if components.credit_utilization < 0.7 {
        tips.push("Try to keep your credit utilization below 30%".to_string());
    }
    if components.income_stability < 0.6 {
        tips.push("Maintain stable income sources and keep employment records".to_string());
    }
    if components.behavioral < 0.7 {
        tips.push("Use mobile banking regularly and maintain consistent savings".to_string());
    }
    tips
}
