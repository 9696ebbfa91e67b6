//! Business-loan risk evaluation. Purely rule-based: revenue and tenure
//! tiers plus an industry lookup, summed into an unbounded score and
//! bucketed. Higher scores mean lower risk.

use crate::record::BusinessRecord;
use serde::{Deserialize, Serialize};

const LOW_RISK_INDUSTRIES: [&str; 3] = ["technology", "healthcare", "education"];
const MEDIUM_RISK_INDUSTRIES: [&str; 3] = ["retail", "manufacturing", "services"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessRiskLevel {
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl BusinessRiskLevel {
    pub fn from_score(risk_score: i32) -> Self {
        if risk_score >= 70 {
            BusinessRiskLevel::LowRisk
        } else if risk_score >= 40 {
            BusinessRiskLevel::MediumRisk
        } else {
            BusinessRiskLevel::HighRisk
        }
    }
}

/// Evaluation output: composite score, bucket, and the contributing factors
/// in rule order, for transparent decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRiskAssessment {
    pub risk_score: i32,
    pub risk_level: BusinessRiskLevel,
    pub factors: Vec<String>,
}

pub struct BusinessRiskEngine;

impl BusinessRiskEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn assess(&self, business: &BusinessRecord) -> BusinessRiskAssessment {
        let mut risk_score = 0;
        let mut factors = Vec::new();

        if business.annual_revenue > 1_000_000.0 {
            risk_score += 30;
            factors.push("Strong annual revenue".to_string());
        } else if business.annual_revenue > 500_000.0 {
            risk_score += 20;
            factors.push("Moderate annual revenue".to_string());
        }

        if business.years_in_operation > 5.0 {
            risk_score += 25;
            factors.push("Established business".to_string());
        } else if business.years_in_operation > 2.0 {
            risk_score += 15;
            factors.push("Growing business".to_string());
        }

        let (industry_score, industry_factor) = industry_risk(&business.industry);
        risk_score += industry_score;
        factors.push(industry_factor.to_string());

        BusinessRiskAssessment {
            risk_score,
            risk_level: BusinessRiskLevel::from_score(risk_score),
            factors,
        }
    }
}

impl Default for BusinessRiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

// Unknown industries score like high-risk ones: a flat low contribution.
fn industry_risk(industry: &str) -> (i32, &'static str) {
    let industry = industry.to_lowercase();
    if LOW_RISK_INDUSTRIES.contains(&industry.as_str()) {
        (25, "Low-risk industry")
    } else if MEDIUM_RISK_INDUSTRIES.contains(&industry.as_str()) {
        (15, "Medium-risk industry")
    } else {
        (5, "High-risk industry")
    }
}
