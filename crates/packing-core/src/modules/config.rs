//! Process configuration loading.
//!
//! Sources, lowest precedence first: built-in defaults, a JSON file, then
//! environment variables. The binary layers CLI flags on top and calls
//! [`validate_config`] once everything is merged.

use std::fs;
use std::path::{Path, PathBuf};

use packing_types::{AppConfig, ConfigError, StorageBackend};

/// Selects `config/{APP_ENV}.json` when no explicit file is given.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Directory searched for per-environment files.
pub const CONFIG_DIR: &str = "config";

const SUPPORTED_ENVS: &[&str] = &["dev", "prod"];
const DEFAULT_ENV: &str = "dev";

/// Load configuration from `path`, or from the per-environment file.
///
/// An explicit path must exist. The per-environment file is optional; when it
/// is absent the defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let app_env = std::env::var(APP_ENV_VAR).ok();
    let mut config = match resolve_config_path(path, app_env.as_deref(), Path::new(CONFIG_DIR))? {
        Some(file) => load_config_file(&file)?,
        None => AppConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Work out which file to read, if any.
pub fn resolve_config_path(
    explicit: Option<&Path>,
    app_env: Option<&str>,
    base_dir: &Path,
) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.display().to_string() });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let env = app_env.map(str::trim).filter(|env| !env.is_empty()).unwrap_or(DEFAULT_ENV);
    if !SUPPORTED_ENVS.contains(&env) {
        return Err(ConfigError::invalid(
            APP_ENV_VAR,
            format!("unsupported environment '{env}' (expected one of: {})", SUPPORTED_ENVS.join(", ")),
        ));
    }

    let candidate = base_dir.join(format!("{env}.json"));
    Ok(candidate.exists().then_some(candidate))
}

/// Parse one JSON configuration file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    tracing::debug!(path = %path.display(), "Loaded configuration file");
    Ok(config)
}

/// Apply `PORT`, `DATABASE_URL`, `LOG_LEVEL` and `PACKING_STORAGE`.
///
/// `lookup` abstracts the environment so callers (and tests) control it.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(port) = non_empty("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid("PORT", format!("'{port}' is not a valid port")))?;
    }
    if let Some(url) = non_empty("DATABASE_URL") {
        config.storage.database_url = Some(url);
    }
    if let Some(level) = non_empty("LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(backend) = non_empty("PACKING_STORAGE") {
        config.storage.backend =
            backend.parse().map_err(|message: String| ConfigError::invalid("PACKING_STORAGE", message))?;
    }
    Ok(())
}

/// Reject configurations the server cannot start with.
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::invalid("server.port", "must be between 1 and 65535"));
    }
    if config.server.body_limit_bytes == 0 {
        return Err(ConfigError::invalid("server.body_limit_bytes", "must be positive"));
    }

    if config.storage.backend == StorageBackend::Postgres {
        let has_url = config.storage.database_url.as_deref().is_some_and(|url| !url.trim().is_empty());
        if !has_url {
            return Err(ConfigError::invalid(
                "storage.database_url",
                "required for the postgres backend (set DATABASE_URL or use --storage memory)",
            ));
        }
        if config.storage.max_connections == 0 {
            return Err(ConfigError::invalid("storage.max_connections", "must be positive"));
        }
        if config.storage.min_connections > config.storage.max_connections {
            return Err(ConfigError::invalid(
                "storage.min_connections",
                "must not exceed storage.max_connections",
            ));
        }
    }

    if let Some(limit) = config.limits.max_amount {
        if limit <= 0 {
            return Err(ConfigError::invalid("limits.max_amount", "must be positive when set"));
        }
    }

    if config.log.level.trim().is_empty() {
        return Err(ConfigError::invalid("log.level", "must not be empty"));
    }

    Ok(())
}
