// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{ConfigFile, Credentials};
use crate::config::validate::validate_config;
use crate::errors::{Result, SyncgateError};

/// Load a configuration file from a given path and return the raw `ConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (non-empty credentials, etc.). Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: ConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run basic validation.
///
/// This is the recommended entry point when a config file is known to exist:
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that no credential field is empty.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let config = load_from_path(&path)?;
    validate_config(&config)?;
    Ok(config)
}

/// Resolve the effective configuration for a CLI run.
///
/// Priority:
/// 1. An explicit `--config` path (must exist and validate).
/// 2. `Syncgate.toml` in the current working directory, if present.
/// 3. Credentials from the process environment (`AWS_ACCESS_KEY_ID`,
///    `AWS_SECRET_ACCESS_KEY`, `AWS_DEFAULT_REGION`), with the default
///    `aws` binary.
pub fn resolve_config(explicit_path: Option<&str>) -> Result<ConfigFile> {
    if let Some(path) = explicit_path {
        return load_and_validate(path);
    }

    let default_path = default_config_path();
    if default_path.is_file() {
        return load_and_validate(&default_path);
    }

    let credentials = credentials_from_env()?;
    let config = ConfigFile {
        credentials,
        aws: Default::default(),
    };
    validate_config(&config)?;
    Ok(config)
}

/// Helper to resolve the default config path.
///
/// Currently this just returns `Syncgate.toml` in the current working
/// directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Syncgate.toml")
}

fn credentials_from_env() -> Result<Credentials> {
    Ok(Credentials {
        access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
        secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
        region: require_env("AWS_DEFAULT_REGION")?,
    })
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| {
        SyncgateError::ConfigError(format!(
            "no config file found and {name} is not set in the environment"
        ))
    })
}
