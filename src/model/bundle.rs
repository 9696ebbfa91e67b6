//! Trained-artifact bundle: a manifest (version, training metadata, scaler
//! statistics, artifact checksums) plus the ONNX model files it names.
//! Loading verifies every named artifact before any session is opened; a
//! bundle that fails verification never serves.

use super::onnx::{OnnxClassifier, OnnxRegressor};
use crate::config::ScoringVariant;
use crate::error::ScoreError;
use crate::features::FeatureVector;
use crate::fraud::FRAUD_FEATURE_DIM;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const CREDIT_MODEL_FILE: &str = "credit_model.onnx";
pub const FRAUD_MODEL_FILE: &str = "fraud_model.onnx";

/// StandardScaler statistics, fitted offline at training time. Inference only
/// ever transforms; re-fitting per request changes model semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl ScalerParams {
    /// No-op scaler, mostly for tests and untrained fixtures.
    pub fn identity(dim: usize) -> Self {
        Self {
            mean: vec![0.0; dim],
            scale: vec![1.0; dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    /// `(x - mean) / scale` per position. Zero-variance positions ship a zero
    /// scale from some exporters and divide by 1.0 instead.
    pub fn transform(&self, features: &FeatureVector) -> Result<FeatureVector, ScoreError> {
        if features.dim != self.mean.len() || self.mean.len() != self.scale.len() {
            return Err(ScoreError::ScalerDimMismatch {
                expected: self.mean.len(),
                got: features.dim,
            });
        }
        let values = features
            .values
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(v, (m, s))| {
                let s = if s.abs() < f32::EPSILON { 1.0 } else { *s };
                (v - m) / s
            })
            .collect();
        Ok(FeatureVector {
            dim: features.dim,
            values,
        })
    }
}

/// Bundle manifest, one JSON file per trained bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub model_version: String,
    pub variant: ScoringVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub feature_importance: BTreeMap<String, f64>,
    pub scaler: ScalerParams,
    /// Artifact file name → sha-256 hex digest
    pub checksums: BTreeMap<String, String>,
}

impl Manifest {
    pub fn load(dir: &Path) -> Result<Self, ScoreError> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Err(ScoreError::MissingArtifact(path));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, dir: &Path) -> Result<(), ScoreError> {
        fs::write(dir.join(MANIFEST_FILE), serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Recompute checksums from the artifact files currently in `dir`.
    /// Training tooling calls this right before `save`.
    pub fn refresh_checksums(&mut self, dir: &Path) -> Result<(), ScoreError> {
        for (file, sum) in self.checksums.iter_mut() {
            *sum = sha256_hex(&dir.join(file.as_str()))?;
        }
        Ok(())
    }
}

fn sha256_hex(path: &Path) -> Result<String, ScoreError> {
    if !path.exists() {
        return Err(ScoreError::MissingArtifact(path.to_path_buf()));
    }
    let data = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(format!("{:x}", hasher.finalize()))
}

/// The loaded, immutable model state shared by all scoring calls.
#[derive(Debug)]
pub struct ModelBundle {
    manifest: Manifest,
    credit: OnnxRegressor,
    fraud: Option<OnnxClassifier>,
}

impl ModelBundle {
    /// Load and verify the bundle at `dir` for the configured variant.
    /// Fails on a missing manifest, a variant mismatch, scaler dimensions
    /// that don't fit the variant, or any artifact that is absent or fails
    /// its checksum.
    pub fn load(dir: &Path, variant: ScoringVariant) -> Result<Self, ScoreError> {
        let manifest = Manifest::load(dir)?;

        if manifest.variant != variant {
            return Err(ScoreError::CorruptArtifact {
                path: dir.join(MANIFEST_FILE),
                reason: format!(
                    "bundle trained for {:?}, engine configured for {:?}",
                    manifest.variant, variant
                ),
            });
        }

        let expected_dim = variant.feature_dim();
        if manifest.scaler.dim() != expected_dim
            || manifest.scaler.scale.len() != manifest.scaler.mean.len()
        {
            return Err(ScoreError::ScalerDimMismatch {
                expected: expected_dim,
                got: manifest.scaler.dim(),
            });
        }

        if !manifest.checksums.contains_key(CREDIT_MODEL_FILE) {
            return Err(ScoreError::MissingArtifact(dir.join(CREDIT_MODEL_FILE)));
        }
        // Basic bundles ship fraud detection alongside credit scoring; only
        // enhanced bundles may omit the classifier.
        if variant == ScoringVariant::Basic && !manifest.checksums.contains_key(FRAUD_MODEL_FILE) {
            return Err(ScoreError::MissingArtifact(dir.join(FRAUD_MODEL_FILE)));
        }
        for (file, expected) in &manifest.checksums {
            let path = dir.join(file.as_str());
            let actual = sha256_hex(&path)?;
            if actual != *expected {
                return Err(ScoreError::CorruptArtifact {
                    path,
                    reason: "sha-256 mismatch".to_string(),
                });
            }
        }

        let credit = OnnxRegressor::load(&dir.join(CREDIT_MODEL_FILE), expected_dim)?;
        let fraud = if manifest.checksums.contains_key(FRAUD_MODEL_FILE) {
            Some(OnnxClassifier::load(
                &dir.join(FRAUD_MODEL_FILE),
                FRAUD_FEATURE_DIM,
            )?)
        } else {
            None
        };

        Ok(Self {
            manifest,
            credit,
            fraud,
        })
    }

    /// Scale then predict. The raw prediction is in score units and is
    /// composed (and clamped) downstream.
    pub fn predict_credit(&self, features: &FeatureVector) -> Result<f32, ScoreError> {
        let scaled = self.manifest.scaler.transform(features)?;
        self.credit.predict(&scaled)
    }

    /// Fraud probability. Fraud features are fed unscaled, matching training.
    pub fn predict_fraud(&self, features: &FeatureVector) -> Result<f32, ScoreError> {
        let classifier = self
            .fraud
            .as_ref()
            .ok_or(ScoreError::ModelUnavailable("fraud"))?;
        classifier.predict_proba(features)
    }

    pub fn has_fraud_model(&self) -> bool {
        self.fraud.is_some()
    }

    pub fn variant(&self) -> ScoringVariant {
        self.manifest.variant
    }

    pub fn model_version(&self) -> &str {
        &self.manifest.model_version
    }

    pub fn trained_at(&self) -> Option<DateTime<Utc>> {
        self.manifest.trained_at
    }

    pub fn feature_importance(&self) -> &BTreeMap<String, f64> {
        &self.manifest.feature_importance
    }
}
