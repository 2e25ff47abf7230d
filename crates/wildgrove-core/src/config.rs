//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `wildgrove-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, with named-function defaults so a missing file or
//! a partial one still yields a runnable setup.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration for the dispatch loop and the engine binary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WildgroveConfig {
    /// World-level settings (name, seed).
    #[serde(default)]
    pub world: WorldSettings,

    /// Dispatch loop settings.
    #[serde(default)]
    pub dispatch: DispatchSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl WildgroveConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `WILDGROVE_LOG` environment variable overrides the configured
    /// log level when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.logging.apply_env_overrides();
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldSettings {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
        }
    }
}

/// Dispatch loop configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DispatchSettings {
    /// Maximum operations drained per idle cycle.
    #[serde(default = "default_max_ops_per_idle")]
    pub max_ops_per_idle: u32,

    /// Reported wait when the queue is empty, in seconds.
    #[serde(default = "default_idle_horizon_seconds")]
    pub idle_horizon_seconds: f64,

    /// Scale applied to every requested operation delay.
    #[serde(default = "default_time_multiplier")]
    pub time_multiplier: f64,

    /// Real-time milliseconds between engine cycles.
    #[serde(default = "default_cycle_interval_ms")]
    pub cycle_interval_ms: u64,

    /// Simulation seconds the clock advances per engine cycle.
    #[serde(default = "default_seconds_per_cycle")]
    pub seconds_per_cycle: f64,

    /// Simulation seconds after which the engine stops (0 = unlimited).
    #[serde(default = "default_max_sim_seconds")]
    pub max_sim_seconds: f64,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            max_ops_per_idle: default_max_ops_per_idle(),
            idle_horizon_seconds: default_idle_horizon_seconds(),
            time_multiplier: default_time_multiplier(),
            cycle_interval_ms: default_cycle_interval_ms(),
            seconds_per_cycle: default_seconds_per_cycle(),
            max_sim_seconds: default_max_sim_seconds(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingSettings {
    /// Override the log level with `WILDGROVE_LOG` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("WILDGROVE_LOG") {
            self.level = level;
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Wildgrove".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_ops_per_idle() -> u32 {
    10
}

const fn default_idle_horizon_seconds() -> f64 {
    600.0
}

const fn default_time_multiplier() -> f64 {
    1.0
}

const fn default_cycle_interval_ms() -> u64 {
    500
}

const fn default_seconds_per_cycle() -> f64 {
    1.0
}

const fn default_max_sim_seconds() -> f64 {
    7200.0
}

fn default_log_level() -> String {
    "info".to_owned()
}
