// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! NOTE: this expects `clap` to be built with the `derive` feature, e.g.:
//! `clap = { version = "4.5.53", features = ["derive"] }` in `Cargo.toml`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `syncgate`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "syncgate",
    version,
    about = "Concurrency-guarded wrapper around `aws s3 sync`.",
    long_about = None
)]
pub struct CliArgs {
    /// Source path or URI (e.g. `s3://my-bucket/foo/bar`).
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Destination directory synchronized content is written into.
    #[arg(value_name = "DESTINATION")]
    pub destination: String,

    /// Delete files that exist in the destination but not in the source.
    #[arg(long)]
    pub delete: bool,

    /// Path to the config file (TOML).
    ///
    /// Default: `Syncgate.toml` in the current working directory. If neither
    /// the flag nor the default file is present, credentials are read from
    /// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and `AWS_DEFAULT_REGION`.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Don't pass the child's stdout/stderr through to the terminal.
    #[arg(long)]
    pub quiet: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SYNCGATE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
