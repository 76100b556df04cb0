// src/config/validate.rs

use anyhow::{Result, anyhow};

use crate::config::model::ConfigFile;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - no credential field is empty
/// - the `aws.bin` override is not empty
///
/// It does **not** verify that the credentials are accepted by AWS or that
/// the binary exists; both are only known at invocation time.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_credentials(cfg)?;
    ensure_aws_bin(cfg)?;
    Ok(())
}

fn ensure_credentials(cfg: &ConfigFile) -> Result<()> {
    if cfg.credentials.access_key_id.is_empty() {
        return Err(anyhow!("[credentials].access_key_id must not be empty"));
    }
    if cfg.credentials.secret_access_key.is_empty() {
        return Err(anyhow!(
            "[credentials].secret_access_key must not be empty"
        ));
    }
    if cfg.credentials.region.is_empty() {
        return Err(anyhow!("[credentials].region must not be empty"));
    }
    Ok(())
}

fn ensure_aws_bin(cfg: &ConfigFile) -> Result<()> {
    if cfg.aws.bin.is_empty() {
        return Err(anyhow!("[aws].bin must not be empty"));
    }
    Ok(())
}
