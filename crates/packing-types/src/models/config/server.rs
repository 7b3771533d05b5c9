//! HTTP server and calculation limit configuration.

use serde::{Deserialize, Serialize};

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Browser origins allowed by CORS (the web UI)
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Maximum accepted request body size
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for logging and socket binding.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:5173".to_string(), "http://127.0.0.1:5173".to_string()]
}

const fn default_body_limit() -> usize {
    64 * 1024
}

/// Limits protecting the optimizer from unbounded work.
///
/// The optimizer's working set grows linearly with the requested amount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    /// Largest accepted amount; `None` disables the check
    #[serde(default = "default_max_amount")]
    pub max_amount: Option<i64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self { max_amount: default_max_amount() }
    }
}

#[allow(clippy::unnecessary_wraps, reason = "serde default must match the field type")]
const fn default_max_amount() -> Option<i64> {
    Some(10_000_000)
}
