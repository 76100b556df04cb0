// src/config/mod.rs

//! Configuration loading and validation for syncgate.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to the process
//!   environment for credentials (`loader.rs`).
//! - Validate basic invariants like non-empty credentials (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, resolve_config};
pub use model::{AwsSection, ConfigFile, Credentials};
pub use validate::validate_config;
