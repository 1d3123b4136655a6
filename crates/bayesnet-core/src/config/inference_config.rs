//! Inference configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;

/// Configuration for junction tree construction and propagation.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `ConfigOverrides`)
/// 2. Environment variables (`BAYESNET_*`)
/// 3. Project config (`bayesnet.toml` in the given root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct InferenceConfig {
    /// Verify clique completeness and running intersection while building. Default: false.
    pub check_invariants: Option<bool>,
    /// Largest clique table the builder will allocate. Default: 2^24.
    pub max_clique_entries: Option<usize>,
    /// Tolerance for CPT rows summing to 1. Default: 1e-6.
    pub cpt_tolerance: Option<f64>,
    /// Table entries enumerated between cancellation polls. Default: 4096.
    pub cancel_poll_interval: Option<usize>,
}

/// Explicit override values, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub check_invariants: Option<bool>,
    pub max_clique_entries: Option<usize>,
}

impl InferenceConfig {
    pub fn effective_check_invariants(&self) -> bool {
        self.check_invariants
            .unwrap_or(constants::DEFAULT_CHECK_INVARIANTS)
    }

    pub fn effective_max_clique_entries(&self) -> usize {
        self.max_clique_entries
            .unwrap_or(constants::DEFAULT_MAX_CLIQUE_ENTRIES)
    }

    pub fn effective_cpt_tolerance(&self) -> f64 {
        self.cpt_tolerance.unwrap_or(constants::DEFAULT_CPT_TOLERANCE)
    }

    pub fn effective_cancel_poll_interval(&self) -> usize {
        self.cancel_poll_interval
            .unwrap_or(constants::DEFAULT_CANCEL_POLL_INTERVAL)
            .max(1)
    }

    /// Config with invariant checks switched on, handy in tests.
    pub fn checked() -> Self {
        Self {
            check_invariants: Some(true),
            ..Self::default()
        }
    }

    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(constants::CONFIG_FILE_NAME);
        if project_config_path.exists() {
            let content = std::fs::read_to_string(&project_config_path).map_err(|_| {
                ConfigError::FileNotFound {
                    path: project_config_path.display().to_string(),
                }
            })?;
            let file_config: InferenceConfig =
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: project_config_path.display().to_string(),
                    message: e.to_string(),
                })?;
            config.merge(&file_config);
        }

        config.apply_env_overrides();

        if let Some(overrides) = overrides {
            if overrides.check_invariants.is_some() {
                config.check_invariants = overrides.check_invariants;
            }
            if overrides.max_clique_entries.is_some() {
                config.max_clique_entries = overrides.max_clique_entries;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(tolerance) = self.cpt_tolerance {
            if !tolerance.is_finite() || tolerance <= 0.0 || tolerance >= 1.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "cpt_tolerance".to_string(),
                    message: "must be finite and in (0, 1)".to_string(),
                });
            }
        }
        if self.max_clique_entries == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "max_clique_entries".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.cancel_poll_interval == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "cancel_poll_interval".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Values set in `other` win over values in `self`.
    fn merge(&mut self, other: &InferenceConfig) {
        if other.check_invariants.is_some() {
            self.check_invariants = other.check_invariants;
        }
        if other.max_clique_entries.is_some() {
            self.max_clique_entries = other.max_clique_entries;
        }
        if other.cpt_tolerance.is_some() {
            self.cpt_tolerance = other.cpt_tolerance;
        }
        if other.cancel_poll_interval.is_some() {
            self.cancel_poll_interval = other.cancel_poll_interval;
        }
    }

    /// Pattern: `BAYESNET_CHECK_INVARIANTS`, `BAYESNET_MAX_CLIQUE_ENTRIES`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BAYESNET_CHECK_INVARIANTS") {
            if let Ok(v) = val.parse::<bool>() {
                self.check_invariants = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BAYESNET_MAX_CLIQUE_ENTRIES") {
            if let Ok(v) = val.parse::<usize>() {
                self.max_clique_entries = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BAYESNET_CPT_TOLERANCE") {
            if let Ok(v) = val.parse::<f64>() {
                self.cpt_tolerance = Some(v);
            }
        }
        if let Ok(val) = std::env::var("BAYESNET_CANCEL_POLL_INTERVAL") {
            if let Ok(v) = val.parse::<usize>() {
                self.cancel_poll_interval = Some(v);
            }
        }
    }
}
