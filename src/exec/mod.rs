// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the external sync
//! command, using `tokio::process::Command`, and reporting its captured
//! output back to the coordinator.
//!
//! - [`runner`] owns process spawning, output buffering and live
//!   stdout/stderr forwarding.
//! - [`backend`] provides the `SyncBackend` trait and a concrete
//!   `AwsCliBackend` that the coordinator uses in production, and which
//!   tests can replace with a fake implementation.

pub mod backend;
pub mod runner;

pub use backend::{AwsCliBackend, OutputSinks, SyncBackend};
pub use runner::{Invocation, ProcessOutput, RunOptions, run_process};
