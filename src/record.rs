//! Input record schemas: applicant, transaction, and business records.
//! Fields absent from the incoming JSON default to zero/empty; zero-valued
//! scoring fields are indistinguishable from absent ones after that, so
//! `defaulted_fields` reports both as data-quality warnings.

use crate::error::ScoreError;
use serde::{Deserialize, Serialize};

/// One applicant, as submitted for credit scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicantRecord {
    pub annual_income: f64,
    pub years_of_credit_history: f64,
    pub num_accounts: f64,
    pub payment_history_score: f64,
    pub debt_to_income_ratio: f64,
    pub num_recent_inquiries: f64,
    pub age: f64,
    /// Utilization in percent (30 = 30%).
    pub credit_utilization: f64,
    pub total_credit: f64,
    pub used_credit: f64,
    pub savings_amount: f64,
    pub on_time_payment_ratio: f64,
    pub savings_frequency: f64,
    pub overdraft_frequency: f64,
    pub mobile_app_usage_score: f64,
    pub income_history: Vec<f64>,
    pub transaction_history: Vec<TransactionEntry>,
    pub employment_history: Vec<EmploymentEntry>,
    pub payment_history: PaymentCounts,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionEntry {
    pub amount: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
    pub duration_years: f64,
}

/// On-time / late / total payment counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentCounts {
    pub on_time: u32,
    pub late: u32,
    pub total: u32,
}

impl ApplicantRecord {
    /// Reject non-finite numerics before they reach the feature pipeline.
    pub fn validate(&self) -> Result<(), ScoreError> {
        let named: [(&'static str, f64); 15] = [
            ("annual_income", self.annual_income),
            ("years_of_credit_history", self.years_of_credit_history),
            ("num_accounts", self.num_accounts),
            ("payment_history_score", self.payment_history_score),
            ("debt_to_income_ratio", self.debt_to_income_ratio),
            ("num_recent_inquiries", self.num_recent_inquiries),
            ("age", self.age),
            ("credit_utilization", self.credit_utilization),
            ("total_credit", self.total_credit),
            ("used_credit", self.used_credit),
            ("savings_amount", self.savings_amount),
            ("on_time_payment_ratio", self.on_time_payment_ratio),
            ("savings_frequency", self.savings_frequency),
            ("overdraft_frequency", self.overdraft_frequency),
            ("mobile_app_usage_score", self.mobile_app_usage_score),
        ];
        for (field, value) in named {
            if !value.is_finite() {
                return Err(ScoreError::InvalidField { field, value });
            }
        }
        for &value in &self.income_history {
            if !value.is_finite() {
                return Err(ScoreError::InvalidField { field: "income_history", value });
            }
        }
        for entry in &self.transaction_history {
            if !entry.amount.is_finite() {
                return Err(ScoreError::InvalidField {
                    field: "transaction_history.amount",
                    value: entry.amount,
                });
            }
        }
        for job in &self.employment_history {
            if !job.duration_years.is_finite() {
                return Err(ScoreError::InvalidField {
                    field: "employment_history.duration_years",
                    value: job.duration_years,
                });
            }
        }
        Ok(())
    }

    /// Scoring-relevant fields that carry their zero default.
    pub fn defaulted_fields(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.annual_income == 0.0 {
            out.push("annual_income");
        }
        if self.years_of_credit_history == 0.0 {
            out.push("years_of_credit_history");
        }
        if self.payment_history_score == 0.0 {
            out.push("payment_history_score");
        }
        if self.total_credit == 0.0 {
            out.push("total_credit");
        }
        if self.income_history.is_empty() {
            out.push("income_history");
        }
        if self.employment_history.is_empty() {
            out.push("employment_history");
        }
        if self.payment_history.total == 0 {
            out.push("payment_history");
        }
        out
    }
}

/// One card/account transaction, as submitted for fraud assessment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRecord {
    pub amount: f64,
    /// Hour of day, 0-23.
    pub time_of_day: f64,
    pub distance_from_last_transaction: f64,
    pub frequency_last_24h: f64,
    pub average_transaction_amount: f64,
}

impl TransactionRecord {
    pub fn validate(&self) -> Result<(), ScoreError> {
        let named: [(&'static str, f64); 5] = [
            ("amount", self.amount),
            ("time_of_day", self.time_of_day),
            ("distance_from_last_transaction", self.distance_from_last_transaction),
            ("frequency_last_24h", self.frequency_last_24h),
            ("average_transaction_amount", self.average_transaction_amount),
        ];
        for (field, value) in named {
            if !value.is_finite() {
                return Err(ScoreError::InvalidField { field, value });
            }
        }
        Ok(())
    }
}

/// One business, as submitted for loan risk evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRecord {
    pub annual_revenue: f64,
    pub years_in_operation: f64,
    pub industry: String,
}
