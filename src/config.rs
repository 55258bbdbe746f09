//! Configuration module for viewcast.

use crate::error::{Result, ViewcastError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for a viewcast process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewcastConfig {
    /// Startup artifact locations.
    pub artifacts: ArtifactConfig,
    /// Observability configuration.
    pub observability: ObservabilityConfig,
}

impl ViewcastConfig {
    /// Load configuration from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ViewcastError::Config(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ViewcastError::Config(format!("Failed to parse config: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.artifacts.model_path.as_os_str().is_empty() {
            return Err(ViewcastError::InvalidConfig {
                field: "artifacts.model_path".to_string(),
                reason: "Model artifact path must be set".to_string(),
            });
        }

        if self.artifacts.columns_path.as_os_str().is_empty() {
            return Err(ViewcastError::InvalidConfig {
                field: "artifacts.columns_path".to_string(),
                reason: "Column list path must be set".to_string(),
            });
        }

        Ok(())
    }

    /// Create a minimal development configuration reading artifacts from the
    /// working directory.
    pub fn development() -> Self {
        Self {
            artifacts: ArtifactConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Startup artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Path to the serialized regression model artifact.
    pub model_path: PathBuf,
    /// Path to the ordered model column list.
    pub columns_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("best_model.json"),
            columns_path: PathBuf::from("model_columns.json"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default log level when RUST_LOG is unset.
    pub log_level: String,
    /// Emit logs as JSON instead of plain text.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_development_config_validates() {
        let config = ViewcastConfig::development();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_model_path_rejected() {
        let mut config = ViewcastConfig::development();
        config.artifacts.model_path = PathBuf::new();

        let err = config.validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_empty_columns_path_rejected() {
        let mut config = ViewcastConfig::development();
        config.artifacts.columns_path = PathBuf::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewcast.json");

        let config = ViewcastConfig::development();
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(serde_json::to_string(&config).unwrap().as_bytes())
            .unwrap();

        let loaded = ViewcastConfig::from_file(&path).unwrap();
        assert_eq!(loaded.artifacts.model_path, config.artifacts.model_path);
        assert_eq!(loaded.observability.log_level, "info");
    }

    #[test]
    fn test_from_file_missing() {
        let err = ViewcastConfig::from_file(Path::new("/nonexistent/viewcast.json")).unwrap_err();
        assert!(err.is_configuration());
    }
}
