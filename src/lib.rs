//! MshiyanePay credit engine — credit scoring and risk assessment.
//!
//! Modular structure:
//! - [`record`] — Applicant, transaction, and business input schemas
//! - [`features`] — Feature extraction pipeline and derived indicators
//! - [`model`] — ONNX inference and the trained-artifact bundle
//! - [`scoring`] — Score composition, risk levels, improvement tips
//! - [`fraud`] — Transaction fraud assessment
//! - [`business`] — Business-loan risk rules
//! - [`storage`] — Encrypted decision audit store
//! - [`logging`] — Structured JSON logging

pub mod business;
pub mod config;
pub mod error;
pub mod features;
pub mod fraud;
pub mod logging;
pub mod model;
pub mod record;
pub mod scoring;
pub mod storage;

pub use business::{BusinessRiskAssessment, BusinessRiskEngine, BusinessRiskLevel};
pub use config::{EngineConfig, ScoringVariant};
pub use error::ScoreError;
pub use features::{FeatureExtractor, FeatureVector};
pub use fraud::{FraudAssessment, FraudDetector, FraudRiskLevel};
pub use logging::StructuredLogger;
pub use model::ModelBundle;
pub use record::{ApplicantRecord, BusinessRecord, TransactionRecord};
pub use scoring::{CreditScoreResult, RiskLevel, ScoringEngine};
pub use storage::DecisionStore;
