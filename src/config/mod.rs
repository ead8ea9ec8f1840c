//! Layered configuration
//!
//! Settings come from, in increasing precedence: built-in defaults, the
//! global `config.toml` in the platform config directory, a project file
//! (`machine-health.toml` in the working directory or `--config`), and
//! `MACHINE_HEALTH_*` environment variables.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub mod loader;

pub use loader::ConfigLoader;

use crate::report::ReportFormat;
use crate::telemetry::ClassificationPolicy;

/// File name looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "machine-health.toml";

pub const ENV_LOG_LEVEL: &str = "MACHINE_HEALTH_LOG_LEVEL";
pub const ENV_OUTPUT: &str = "MACHINE_HEALTH_OUTPUT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Path of the global configuration file, if a home directory exists
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "machine-health", "machine-health")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directive, e.g. `info` or `machine_health=debug`
    pub log_level: Option<String>,
    pub analysis: ClassificationPolicy,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ReportFormat,
}

impl Config {
    /// Apply environment overrides from an arbitrary lookup
    pub fn merge_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = Some(log_level);
        }

        if let Some(output) = lookup(ENV_OUTPUT) {
            match output.parse::<ReportFormat>() {
                Ok(format) => self.output.format = format,
                Err(_) => warn!(value = %output, "Ignoring unknown {}", ENV_OUTPUT),
            }
        }
    }

    /// Check that the analysis policy is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let policy = &self.analysis;
        let values = [
            ("min_composite_score", policy.min_composite_score),
            ("efficiency_min", policy.efficiency_min),
            ("efficiency_max", policy.efficiency_max),
            ("margin_weight", policy.margin_weight),
            ("urgency_weight", policy.urgency_weight),
        ];

        let mut problems: Vec<String> = values
            .iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(name, _)| format!("analysis.{} must be a finite number", name))
            .collect();

        if policy.efficiency_min > policy.efficiency_max {
            problems.push(format!(
                "analysis.efficiency_min ({}) exceeds analysis.efficiency_max ({})",
                policy.efficiency_min, policy.efficiency_max
            ));
        }
        for (name, weight) in [
            ("margin_weight", policy.margin_weight),
            ("urgency_weight", policy.urgency_weight),
        ] {
            if weight < 0.0 {
                problems.push(format!("analysis.{} must not be negative", name));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }
}
