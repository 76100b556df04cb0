// tests/config_loading.rs

//! Config file loading, defaults and validation.

use std::error::Error;
use std::fs;

use syncgate::config::{load_and_validate, load_from_path, resolve_config};

type TestResult = Result<(), Box<dyn Error>>;

const FULL_CONFIG: &str = r#"
[credentials]
access_key_id = "AKIAEXAMPLE"
secret_access_key = "secret"
region = "eu-west-1"

[aws]
bin = "/opt/aws-cli/bin/aws"
"#;

const MINIMAL_CONFIG: &str = r#"
[credentials]
access_key_id = "AKIAEXAMPLE"
secret_access_key = "secret"
region = "eu-west-1"
"#;

#[test]
fn loads_full_config() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Syncgate.toml");
    fs::write(&path, FULL_CONFIG)?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.credentials.access_key_id, "AKIAEXAMPLE");
    assert_eq!(cfg.credentials.secret_access_key, "secret");
    assert_eq!(cfg.credentials.region, "eu-west-1");
    assert_eq!(cfg.aws.bin, "/opt/aws-cli/bin/aws");

    Ok(())
}

#[test]
fn aws_section_defaults_to_aws_on_path() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Syncgate.toml");
    fs::write(&path, MINIMAL_CONFIG)?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.aws.bin, "aws");

    Ok(())
}

#[test]
fn empty_credential_field_fails_validation() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Syncgate.toml");
    fs::write(
        &path,
        r#"
[credentials]
access_key_id = ""
secret_access_key = "secret"
region = "eu-west-1"
"#,
    )?;

    // Deserializes fine, but validation must reject it.
    load_from_path(&path)?;
    let err = load_and_validate(&path).expect_err("empty access_key_id must be rejected");
    assert!(err.to_string().contains("access_key_id"));

    Ok(())
}

#[test]
fn missing_credentials_section_is_a_toml_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Syncgate.toml");
    fs::write(&path, "[aws]\nbin = \"aws\"\n")?;

    assert!(load_from_path(&path).is_err());

    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(load_from_path("/nonexistent/Syncgate.toml").is_err());
}

#[test]
fn resolve_config_prefers_explicit_path() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("custom-name.toml");
    fs::write(&path, FULL_CONFIG)?;

    let cfg = resolve_config(Some(path.to_str().ok_or("non-utf8 tempdir path")?))?;

    assert_eq!(cfg.credentials.region, "eu-west-1");

    Ok(())
}

#[test]
fn resolve_config_falls_back_to_environment() -> TestResult {
    // Process-global state; this is the only test that touches these
    // variables.
    unsafe {
        std::env::set_var("AWS_ACCESS_KEY_ID", "envId");
        std::env::set_var("AWS_SECRET_ACCESS_KEY", "envKey");
        std::env::set_var("AWS_DEFAULT_REGION", "envRegion");
    }

    // No explicit path and no Syncgate.toml in the crate root, so the
    // environment must win.
    let cfg = resolve_config(None)?;

    assert_eq!(cfg.credentials.access_key_id, "envId");
    assert_eq!(cfg.credentials.secret_access_key, "envKey");
    assert_eq!(cfg.credentials.region, "envRegion");
    assert_eq!(cfg.aws.bin, "aws");

    Ok(())
}
