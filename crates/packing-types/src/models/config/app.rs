//! Application-level configuration.

use serde::{Deserialize, Serialize};

use super::enums::LogFormat;
use super::server::{LimitsConfig, ServerConfig};
use super::storage::StorageConfig;

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// HTTP listener configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Pack configuration store
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
    /// Calculation limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `packing_core=debug,info`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level(), format: LogFormat::default() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
