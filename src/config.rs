use serde::{Deserialize, Serialize};

use crate::registry::CcRegistry;

/// Optional runner configuration for the `simspec` binary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Source directory handed to the engine (key and certificate lookup)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    /// Default log filter, e.g. "info" or "simspec=debug"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Extra congestion control algorithm names, registered on top of the defaults
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc_algorithms: Vec<String>,
}

impl RunnerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(dir) = &self.source_dir {
            if dir.is_empty() {
                return Err(ValidationError::InvalidGeneral(
                    "source_dir cannot be empty".to_string(),
                ));
            }
        }

        if let Some(level) = &self.log_level {
            if level.trim().is_empty() {
                return Err(ValidationError::InvalidGeneral(
                    "log_level cannot be empty".to_string(),
                ));
            }
        }

        for name in &self.cc_algorithms {
            Self::validate_algorithm_name(name)?;
        }

        Ok(())
    }

    /// Algorithm names must be usable as a spec-file value as-is
    fn validate_algorithm_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::InvalidAlgorithm(
                "algorithm name cannot be empty".to_string(),
            ));
        }
        if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::InvalidAlgorithm(format!(
                "algorithm name '{}' contains whitespace or control characters",
                name
            )));
        }
        Ok(())
    }

    /// Build the algorithm registry: defaults plus configured extras
    pub fn build_registry(&self) -> CcRegistry {
        let mut registry = CcRegistry::with_defaults();
        for name in &self.cc_algorithms {
            registry.register(name);
        }
        registry
    }
}

/// Validation error types
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid congestion control algorithm: {0}")]
    InvalidAlgorithm(String),
}
