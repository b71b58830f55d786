//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the `foreman.toml`
//! config file. They are deserialized directly and converted into the
//! application-layer [`PlannerConfig`].

use foreman_application::PlannerConfig;
use foreman_domain::EffortLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("unknown effort level '{0}' in config file")]
    UnknownEffort(String),

    #[error("max_iterations cannot be 0")]
    InvalidMaxIterations,
}

/// Raw planner configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePlannerConfig {
    /// Effort level name (low, medium, high, maximum)
    pub effort: String,
    /// Override for the effort-derived iteration bound
    pub max_iterations: Option<u32>,
    /// Override for the effort-derived reflection flag
    pub enable_reflection: Option<bool>,
    pub enable_planning: Option<bool>,
}

impl Default for FilePlannerConfig {
    fn default() -> Self {
        Self {
            effort: EffortLevel::default().as_str().to_string(),
            max_iterations: None,
            enable_reflection: None,
            enable_planning: None,
        }
    }
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path for the JSONL lifecycle log; disabled when absent
    pub lifecycle_log: Option<String>,
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub planner: FilePlannerConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Converts the raw file data into a validated [`PlannerConfig`].
    ///
    /// Unlike runtime patches, a bad effort name in the file is a hard
    /// error: a misspelled config file should fail loudly at startup, not
    /// silently run at the default effort.
    pub fn to_planner_config(&self) -> Result<PlannerConfig, ConfigValidationError> {
        let effort: EffortLevel = self
            .planner
            .effort
            .parse()
            .map_err(|_| ConfigValidationError::UnknownEffort(self.planner.effort.clone()))?;

        let mut config = PlannerConfig::for_effort(effort);
        if let Some(max_iterations) = self.planner.max_iterations {
            if max_iterations == 0 {
                return Err(ConfigValidationError::InvalidMaxIterations);
            }
            config.max_iterations = max_iterations;
        }
        if let Some(enable_reflection) = self.planner.enable_reflection {
            config.enable_reflection = enable_reflection;
        }
        if let Some(enable_planning) = self.planner.enable_planning {
            config.enable_planning = enable_planning;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_converts_to_medium_config() {
        let config = FileConfig::default().to_planner_config().unwrap();
        assert_eq!(config.effort, EffortLevel::Medium);
        assert_eq!(config.max_iterations, 7);
    }

    #[test]
    fn overrides_apply_on_top_of_effort() {
        let file = FileConfig {
            planner: FilePlannerConfig {
                effort: "high".to_string(),
                max_iterations: Some(4),
                enable_reflection: Some(false),
                enable_planning: None,
            },
            ..Default::default()
        };
        let config = file.to_planner_config().unwrap();
        assert_eq!(config.effort, EffortLevel::High);
        assert_eq!(config.max_iterations, 4);
        assert!(!config.enable_reflection);
        assert!(config.enable_planning);
    }

    #[test]
    fn unknown_effort_in_file_is_an_error() {
        let file = FileConfig {
            planner: FilePlannerConfig {
                effort: "turbo".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = file.to_planner_config().unwrap_err();
        assert!(err.to_string().contains("turbo"));
    }

    #[test]
    fn zero_max_iterations_is_rejected() {
        let file = FileConfig {
            planner: FilePlannerConfig {
                effort: "low".to_string(),
                max_iterations: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(file.to_planner_config().is_err());
    }
}
