//! ONNX Runtime sessions. Input: `[1, feature_dim]` f32. A missing model file
//! is an explicit load error; the engine never serves from an unfitted model.

use crate::error::ScoreError;
use crate::features::FeatureVector;
use ndarray::{Array2, CowArray, IxDyn};
use ort::{Environment, Session, SessionBuilder, Value};
use std::path::Path;
use std::sync::{Arc, OnceLock};

static ORT_ENV: OnceLock<Arc<Environment>> = OnceLock::new();

fn init_env() -> &'static Arc<Environment> {
    ORT_ENV.get_or_init(|| {
        Environment::builder()
            .with_name("mshiyane-credit")
            .build()
            .expect("ORT environment")
            .into_arc()
    })
}

fn open_session(path: &Path) -> Result<Session, ScoreError> {
    if !path.exists() {
        return Err(ScoreError::MissingArtifact(path.to_path_buf()));
    }
    let env = init_env();
    let session = SessionBuilder::new(env)?.with_model_from_file(path)?;
    Ok(session)
}

fn input_array<'a>(features: &FeatureVector, dim: usize) -> CowArray<'a, f32, IxDyn> {
    let dim = dim.min(features.values.len());
    Array2::from_shape_vec((1, dim), features.values[..dim].to_vec())
        .expect("row vector shape")
        .into_dyn()
        .into()
}

/// Regression session mapping a feature vector to a raw score prediction.
#[derive(Debug)]
pub struct OnnxRegressor {
    session: Session,
    feature_dim: usize,
}

impl OnnxRegressor {
    pub fn load(path: &Path, feature_dim: usize) -> Result<Self, ScoreError> {
        Ok(Self {
            session: open_session(path)?,
            feature_dim,
        })
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// Raw model prediction, in score units (not yet composed or clamped).
    pub fn predict(&self, features: &FeatureVector) -> Result<f32, ScoreError> {
        let arr = input_array(features, self.feature_dim);
        let input = Value::from_array(self.session.allocator(), &arr)?;
        let outputs = self.session.run(vec![input])?;
        let tensor = outputs
            .first()
            .ok_or(ScoreError::ModelOutput {
                model: "credit",
                reason: "no outputs",
            })?
            .try_extract::<f32>()?;
        let view = tensor.view();
        Ok(view.iter().next().copied().unwrap_or(0.0))
    }
}

/// Binary-classifier session returning the positive-class probability.
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Session,
    feature_dim: usize,
}

impl OnnxClassifier {
    pub fn load(path: &Path, feature_dim: usize) -> Result<Self, ScoreError> {
        Ok(Self {
            session: open_session(path)?,
            feature_dim,
        })
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    /// `P(class 1)` in [0, 1]. Classifier exports emit either a probability
    /// tensor `[1, 2]` or a single-column score; label outputs (i64) are
    /// skipped.
    pub fn predict_proba(&self, features: &FeatureVector) -> Result<f32, ScoreError> {
        let arr = input_array(features, self.feature_dim);
        let input = Value::from_array(self.session.allocator(), &arr)?;
        let outputs = self.session.run(vec![input])?;
        for value in &outputs {
            let Ok(tensor) = value.try_extract::<f32>() else {
                continue;
            };
            let view = tensor.view();
            let values: Vec<f32> = view.iter().copied().collect();
            let proba = if values.len() >= 2 {
                values[1]
            } else {
                values.first().copied().unwrap_or(0.0)
            };
            return Ok(proba.clamp(0.0, 1.0));
        }
        Err(ScoreError::ModelOutput {
            model: "fraud",
            reason: "no float tensor among outputs",
        })
    }
}
