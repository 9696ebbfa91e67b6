//! Integration tests: config load, bundle verification failures, composition
//! worked examples, and the decision store. No ONNX runtime is required:
//! bundle tests exercise the verification paths that fail before a session
//! would open.

use mshiyane_credit::{
    business::BusinessRiskEngine,
    config::{EngineConfig, FraudConfig, ScoringVariant},
    error::ScoreError,
    fraud::FraudAssessment,
    model::{Manifest, ModelBundle, ScalerParams, CREDIT_MODEL_FILE},
    record::{ApplicantRecord, BusinessRecord},
    scoring::{compose_basic, compose_enhanced},
    storage::DecisionStore,
};
use std::collections::BTreeMap;
use std::path::Path;

fn manifest(variant: ScoringVariant) -> Manifest {
    Manifest {
        model_version: "1.0.0".to_string(),
        variant,
        trained_at: None,
        feature_importance: BTreeMap::new(),
        scaler: ScalerParams::identity(variant.feature_dim()),
        checksums: BTreeMap::new(),
    }
}

#[test]
fn config_load_default() {
    let c = EngineConfig::load(Path::new("nonexistent.json"));
    assert_eq!(c.scoring.variant, ScoringVariant::Enhanced);
    assert_eq!(c.fraud.high_threshold, 0.7);
    assert_eq!(c.fraud.medium_threshold, 0.3);
}

#[test]
fn bundle_load_without_manifest_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = ModelBundle::load(dir.path(), ScoringVariant::Enhanced).unwrap_err();
    assert!(matches!(err, ScoreError::MissingArtifact(_)));
}

#[test]
fn bundle_load_without_credit_model_fails() {
    let dir = tempfile::tempdir().unwrap();
    manifest(ScoringVariant::Enhanced).save(dir.path()).unwrap();
    let err = ModelBundle::load(dir.path(), ScoringVariant::Enhanced).unwrap_err();
    assert!(matches!(err, ScoreError::MissingArtifact(p) if p.ends_with(CREDIT_MODEL_FILE)));
}

#[test]
fn bundle_load_rejects_checksum_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CREDIT_MODEL_FILE), b"not a real model").unwrap();
    let mut m = manifest(ScoringVariant::Enhanced);
    m.checksums
        .insert(CREDIT_MODEL_FILE.to_string(), "deadbeef".to_string());
    m.save(dir.path()).unwrap();
    let err = ModelBundle::load(dir.path(), ScoringVariant::Enhanced).unwrap_err();
    assert!(matches!(err, ScoreError::CorruptArtifact { .. }));
}

#[test]
fn basic_bundle_requires_fraud_model() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CREDIT_MODEL_FILE), b"model bytes").unwrap();
    let mut m = manifest(ScoringVariant::Basic);
    m.checksums
        .insert(CREDIT_MODEL_FILE.to_string(), String::new());
    m.refresh_checksums(dir.path()).unwrap();
    m.save(dir.path()).unwrap();
    let err = ModelBundle::load(dir.path(), ScoringVariant::Basic).unwrap_err();
    assert!(matches!(err, ScoreError::MissingArtifact(p) if p.ends_with("fraud_model.onnx")));
}

#[test]
fn bundle_load_rejects_variant_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    manifest(ScoringVariant::Basic).save(dir.path()).unwrap();
    let err = ModelBundle::load(dir.path(), ScoringVariant::Enhanced).unwrap_err();
    assert!(matches!(err, ScoreError::CorruptArtifact { .. }));
}

#[test]
fn bundle_load_rejects_bad_scaler_dims() {
    let dir = tempfile::tempdir().unwrap();
    let mut m = manifest(ScoringVariant::Enhanced);
    m.scaler = ScalerParams::identity(7); // enhanced expects 12
    m.save(dir.path()).unwrap();
    let err = ModelBundle::load(dir.path(), ScoringVariant::Enhanced).unwrap_err();
    assert!(matches!(
        err,
        ScoreError::ScalerDimMismatch { expected: 12, got: 7 }
    ));
}

#[test]
fn refresh_checksums_accepts_matching_artifact() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CREDIT_MODEL_FILE), b"model bytes").unwrap();
    let mut m = manifest(ScoringVariant::Enhanced);
    m.checksums
        .insert(CREDIT_MODEL_FILE.to_string(), String::new());
    m.refresh_checksums(dir.path()).unwrap();
    let sum = &m.checksums[CREDIT_MODEL_FILE];
    assert_eq!(sum.len(), 64);
    assert!(sum.chars().all(|c| c.is_ascii_hexdigit()));
}

// Worked example from the scoring contract: raw 600, strong payment history,
// long history, low utilization → 600 + 50 + 30 + 40 = 720.
#[test]
fn basic_composition_example() {
    let record = ApplicantRecord {
        payment_history_score: 95.0,
        years_of_credit_history: 6.0,
        credit_utilization: 20.0,
        ..ApplicantRecord::default()
    };
    let result = compose_basic(&record, 600.0, "1.0.0");
    assert_eq!(result.credit_score, 720.0);
}

#[test]
fn scores_stay_in_range_for_adversarial_records() {
    let hostile = ApplicantRecord {
        annual_income: -50_000.0,
        years_of_credit_history: -3.0,
        total_credit: 1.0,
        used_credit: 1_000_000.0,
        overdraft_frequency: 50.0,
        income_history: vec![-1.0, -2.0, -3.0],
        ..ApplicantRecord::default()
    };
    for raw in [-10_000.0, 0.0, 600.0, 10_000.0] {
        let basic = compose_basic(&hostile, raw, "1.0.0");
        assert!((300.0..=850.0).contains(&basic.credit_score));
        let enhanced = compose_enhanced(&hostile, raw, "1.0.0");
        assert!((300.0..=850.0).contains(&enhanced.credit_score));
        for c in [
            enhanced.component_scores.payment_history,
            enhanced.component_scores.credit_utilization,
            enhanced.component_scores.credit_age,
            enhanced.component_scores.income_stability,
            enhanced.component_scores.behavioral,
        ] {
            assert!((0.0..=1.0).contains(&c));
        }
    }
}

#[test]
fn composition_is_deterministic() {
    let record = ApplicantRecord {
        payment_history_score: 80.0,
        years_of_credit_history: 4.0,
        income_history: vec![3000.0, 3200.0, 2900.0],
        ..ApplicantRecord::default()
    };
    let a = compose_enhanced(&record, 640.0, "1.0.0");
    let b = compose_enhanced(&record, 640.0, "1.0.0");
    assert_eq!(a.credit_score, b.credit_score);
    assert_eq!(a.improvement_tips, b.improvement_tips);
}

#[test]
fn fraud_example_high_and_suspicious() {
    let assessment = FraudAssessment::from_probability(0.75, &FraudConfig::default());
    assert!(assessment.is_suspicious);
    assert_eq!(
        serde_json::to_value(assessment.risk_level).unwrap(),
        serde_json::json!("HIGH")
    );
}

#[test]
fn business_example_low_risk() {
    let engine = BusinessRiskEngine::new();
    let assessment = engine.assess(&BusinessRecord {
        annual_revenue: 1_200_000.0,
        years_in_operation: 6.0,
        industry: "technology".to_string(),
    });
    assert_eq!(assessment.risk_score, 80);
    assert_eq!(
        serde_json::to_value(assessment.risk_level).unwrap(),
        serde_json::json!("LOW_RISK")
    );
}

#[test]
fn storage_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decisions.db");
    let store = DecisionStore::open(&path, b"test-secret").unwrap();
    store
        .record("d1", 123, "credit", r#"{"credit_score":720.0}"#, Some(720.0))
        .unwrap();
    let out = store.get("d1").unwrap().expect("decision present");
    assert_eq!(out.ts, 123);
    assert_eq!(out.kind, "credit");
    assert_eq!(out.payload, r#"{"credit_score":720.0}"#);
    assert_eq!(out.score, Some(720.0));
}

#[test]
fn storage_prunes_old_decisions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("decisions.db");
    let store = DecisionStore::open(&path, b"test-secret").unwrap();
    store.record("old", 100, "credit", "{}", None).unwrap();
    store.record("new", 200, "credit", "{}", None).unwrap();
    let pruned = store.prune_before(150).unwrap();
    assert_eq!(pruned, 1);
    assert!(store.get("old").unwrap().is_none());
    assert!(store.get("new").unwrap().is_some());
}
