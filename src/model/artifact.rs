//! Serialized model artifact
//!
//! The file written by `train` and read by `predict` and `serve`. Besides the
//! parameters it records the feature order and target it was fit against, so
//! a consumer can refuse an artifact built for a different layout.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::linear::LinearRegression;
use crate::training::metrics::RegressionMetrics;
use crate::{HouseError, Result, FEATURE_NAMES, TARGET_NAME};

/// Current on-disk layout version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub features: Vec<String>,
    pub target: String,
    pub model: LinearRegression,
    pub trained_at: DateTime<Utc>,
    pub training_rows: usize,
    pub test_rows: usize,
    pub seed: u64,
    pub test_fraction: f64,
    /// Held-out metrics, absent when no rows were held out
    pub evaluation: Option<RegressionMetrics>,
}

impl ModelArtifact {
    /// Wrap a freshly fitted model
    pub fn new(
        model: LinearRegression,
        training_rows: usize,
        test_rows: usize,
        seed: u64,
        test_fraction: f64,
        evaluation: Option<RegressionMetrics>,
    ) -> Self {
        ModelArtifact {
            format_version: FORMAT_VERSION,
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            target: TARGET_NAME.to_string(),
            model,
            trained_at: Utc::now(),
            training_rows,
            test_rows,
            seed,
            test_fraction,
            evaluation,
        }
    }

    /// Write as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Saved model artifact to {}", path.display());
        Ok(())
    }

    /// Read and verify an artifact
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(HouseError::NoModel(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let artifact: ModelArtifact = serde_json::from_str(&content)
            .map_err(|e| HouseError::Artifact(format!("{}: {}", path.display(), e)))?;
        artifact.verify()?;
        log::debug!(
            "Loaded model artifact from {} (trained {})",
            path.display(),
            artifact.trained_at
        );
        Ok(artifact)
    }

    /// Check the artifact matches the feature layout this build predicts with
    pub fn verify(&self) -> Result<()> {
        if self.format_version != FORMAT_VERSION {
            return Err(HouseError::Artifact(format!(
                "format version {} is not supported (expected {})",
                self.format_version, FORMAT_VERSION
            )));
        }
        if self.features != FEATURE_NAMES {
            return Err(HouseError::Artifact(format!(
                "feature columns {:?} do not match expected {:?}",
                self.features, FEATURE_NAMES
            )));
        }
        if self.target != TARGET_NAME {
            return Err(HouseError::Artifact(format!(
                "target column {:?} does not match expected {:?}",
                self.target, TARGET_NAME
            )));
        }
        if !self.model.is_finite() {
            return Err(HouseError::Artifact(
                "model parameters contain non-finite values".to_string(),
            ));
        }
        Ok(())
    }
}
