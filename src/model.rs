//! Trained model loading and inference.
//!
//! The model is opaque to the rest of the crate: one schema-ordered feature
//! vector in, one log10-scale scalar out. The [`Regressor`] trait is the seam;
//! [`ModelArtifact`] is the on-disk representation, validated against the
//! schema at load time so shape divergence fails at startup instead of
//! per-request.

use crate::error::{Result, ViewcastError};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A trained regression model producing a log10-scale estimate.
pub trait Regressor: std::fmt::Debug + Send + Sync {
    /// Number of input features the model expects.
    fn n_features(&self) -> usize;

    /// Predict from a schema-ordered feature vector.
    fn predict(&self, features: &[f64]) -> Result<f64>;
}

/// Serialized model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "lowercase")]
pub enum ModelArtifact {
    /// Linear regression: dot(coefficients, features) + intercept.
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    /// Fixed output regardless of input. Used as a smoke-test model.
    Constant { value: f64 },
}

impl ModelArtifact {
    /// Reads an artifact from a JSON file. Absence or malformed content is a
    /// configuration error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ViewcastError::Config(format!(
                "Failed to read model artifact {}: {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ViewcastError::Config(format!(
                "Failed to parse model artifact {}: {}",
                path.display(),
                e
            ))
        })
    }
}

/// Linear model runtime.
#[derive(Debug, Clone)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearModel {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(ViewcastError::Inference(format!(
                "feature count mismatch: got {}, expected {}",
                features.len(),
                self.coefficients.len()
            )));
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features)
            .map(|(c, x)| c * x)
            .sum();
        Ok(dot + self.intercept)
    }
}

/// Constant model runtime.
#[derive(Debug, Clone)]
pub struct ConstantModel {
    value: f64,
    n_features: usize,
}

impl ConstantModel {
    pub fn new(value: f64, n_features: usize) -> Self {
        Self { value, n_features }
    }
}

impl Regressor for ConstantModel {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.n_features {
            return Err(ViewcastError::Inference(format!(
                "feature count mismatch: got {}, expected {}",
                features.len(),
                self.n_features
            )));
        }
        Ok(self.value)
    }
}

/// Loads the model artifact and validates its shape against the schema.
pub fn load_model(path: &Path, schema: &Schema) -> Result<Box<dyn Regressor>> {
    let artifact = ModelArtifact::from_file(path)?;

    let model: Box<dyn Regressor> = match artifact {
        ModelArtifact::Linear {
            coefficients,
            intercept,
        } => {
            if coefficients.len() != schema.len() {
                return Err(ViewcastError::Config(format!(
                    "model expects {} features but the schema has {} columns",
                    coefficients.len(),
                    schema.len()
                )));
            }
            Box::new(LinearModel::new(coefficients, intercept))
        }
        ModelArtifact::Constant { value } => Box::new(ConstantModel::new(value, schema.len())),
    };

    Ok(model)
}
