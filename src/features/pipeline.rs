//! Extraction pipeline: named record fields → fixed-order vector.
//! The field order here must exactly match the training pipeline; reordering
//! silently invalidates every shipped model.

use super::{BehavioralIndicators, FeatureVector};
use crate::record::ApplicantRecord;

pub const BASIC_FEATURE_DIM: usize = 7;
pub const ENHANCED_FEATURE_DIM: usize = 12;

pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The seven named applicant fields, absent values already defaulted
    /// to zero by the record schema.
    pub fn extract_basic(&self, record: &ApplicantRecord) -> FeatureVector {
        let values = vec![
            record.annual_income as f32,
            record.years_of_credit_history as f32,
            record.num_accounts as f32,
            record.payment_history_score as f32,
            record.debt_to_income_ratio as f32,
            record.num_recent_inquiries as f32,
            record.age as f32,
        ];
        FeatureVector {
            dim: BASIC_FEATURE_DIM,
            values,
        }
    }

    /// Basic features followed by the five derived indicators.
    pub fn extract_enhanced(&self, record: &ApplicantRecord) -> FeatureVector {
        let mut values = self.extract_basic(record).values;
        let indicators = BehavioralIndicators::from_record(record);
        values.push(indicators.income_stability as f32);
        values.push(indicators.transaction_regularity as f32);
        values.push(indicators.savings_ratio as f32);
        values.push(indicators.employment_stability as f32);
        values.push(indicators.behavioral_score as f32);
        FeatureVector {
            dim: ENHANCED_FEATURE_DIM,
            values,
        }
    }

    /// Feature names in vector order, for manifests and importance maps.
    pub fn feature_names(dim: usize) -> &'static [&'static str] {
        const NAMES: [&str; ENHANCED_FEATURE_DIM] = [
            "annual_income",
            "years_of_credit_history",
            "num_accounts",
            "payment_history_score",
            "debt_to_income_ratio",
            "num_recent_inquiries",
            "age",
            "income_stability",
            "transaction_regularity",
            "savings_ratio",
            "employment_stability",
            "behavioral_score",
        ];
        &NAMES[..dim.min(ENHANCED_FEATURE_DIM)]
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
