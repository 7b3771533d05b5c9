//! Pack configuration store settings.

use serde::{Deserialize, Serialize};

use super::enums::StorageBackend;

/// Where the pack configuration document lives and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Store implementation
    #[serde(default)]
    pub backend: StorageBackend,
    /// PostgreSQL connection string (required for the postgres backend)
    #[serde(default)]
    pub database_url: Option<String>,
    /// Upper bound of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open while idle
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection (also bounds startup)
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Apply pending migrations at startup
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            run_migrations: default_run_migrations(),
        }
    }
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

const fn default_acquire_timeout() -> u64 {
    5
}

const fn default_run_migrations() -> bool {
    true
}
