//! Engine configuration. Model selection (basic vs enhanced) is config-driven;
//! the two scorers are independent strategies, not a hierarchy.

use crate::features::{BASIC_FEATURE_DIM, ENHANCED_FEATURE_DIM};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Data directory (decision audit store)
    pub data_dir: PathBuf,
    /// Directory holding the trained model bundle (manifest + ONNX artifacts)
    pub bundle_dir: PathBuf,
    /// Credit scoring parameters
    pub scoring: ScoringConfig,
    /// Fraud probability thresholds
    pub fraud: FraudConfig,
    /// Logging
    pub log: LogConfig,
}

/// Which scoring pipeline the bundle was trained for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringVariant {
    Basic,
    Enhanced,
}

impl ScoringVariant {
    pub fn feature_dim(self) -> usize {
        match self {
            ScoringVariant::Basic => BASIC_FEATURE_DIM,
            ScoringVariant::Enhanced => ENHANCED_FEATURE_DIM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub variant: ScoringVariant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudConfig {
    /// Probability above this is high risk and flags the transaction (0.0–1.0)
    pub high_threshold: f64,
    /// Probability at or above this is medium risk
    pub medium_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".mshiyane"),
            bundle_dir: PathBuf::from("models"),
            scoring: ScoringConfig::default(),
            fraud: FraudConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            variant: ScoringVariant::Enhanced,
        }
    }
}

impl Default for FraudConfig {
    fn default() -> Self {
        Self {
            high_threshold: 0.7,
            medium_threshold: 0.3,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl EngineConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<EngineConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
