//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading process configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Config file not found at expected path
    #[error("Config not found: {path}")]
    NotFound {
        /// Filesystem path where config was expected
        path: String,
    },

    /// Config file could not be read
    #[error("Config read error for {path}: {message}")]
    ReadError {
        /// Filesystem path of the config file
        path: String,
        /// Description of the I/O failure
        message: String,
    },

    /// Config file parse error
    #[error("Config parse error: {message}")]
    ParseError {
        /// Description of the parse failure
        message: String,
    },

    /// Config validation error (invalid values)
    #[error("Config validation error for {field}: {message}")]
    ValidationError {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }

    /// Create a validation error for a single field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError { field: field.into(), message: message.into() }
    }
}
