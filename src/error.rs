//! Error taxonomy: client-input errors (invalid fields) vs startup errors
//! (missing/corrupt artifacts). Artifact errors abort serving; a request never
//! yields a partial result.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    #[error("field `{field}` is not a finite number: {value}")]
    InvalidField { field: &'static str, value: f64 },
    #[error("no {0} model loaded in this bundle")]
    ModelUnavailable(&'static str),
    #[error("missing model artifact: {}", .0.display())]
    MissingArtifact(PathBuf),
    #[error("corrupt model artifact {}: {}", path.display(), reason)]
    CorruptArtifact { path: PathBuf, reason: String },
    #[error("scaler expects {expected} features, got {got}")]
    ScalerDimMismatch { expected: usize, got: usize },
    #[error("inference failed: {0}")]
    Inference(#[from] ort::OrtError),
    #[error("unexpected output from {model} model: {reason}")]
    ModelOutput {
        model: &'static str,
        reason: &'static str,
    },
    #[error("artifact io: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("decision store: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("decision store crypto: {0}")]
    Crypto(String),
}

impl ScoreError {
    /// True for errors caused by the input record rather than engine state.
    /// The serving layer maps these to client errors, everything else to
    /// server errors.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScoreError::InvalidField { .. })
    }
}
