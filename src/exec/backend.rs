// src/exec/backend.rs

//! Pluggable sync-process backend abstraction.
//!
//! The coordinator talks to a `SyncBackend` instead of spawning processes
//! directly. This makes it easy to swap in a fake backend in tests while
//! keeping the production runner implementation in [`runner`].
//!
//! - `AwsCliBackend` is the default implementation used by `syncgate`. It
//!   delegates to [`runner::run_process`].
//! - Tests can provide their own `SyncBackend` that, for example, records
//!   which invocations were issued and returns canned output.
//!
//! [`runner`]: crate::exec::runner

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::errors::Result;

use super::runner::{Invocation, ProcessOutput, RunOptions, run_process};

/// Per-call output sinks handed through to the runner.
///
/// Both are optional; when present, child output chunks are forwarded live
/// in addition to being buffered for the final result.
#[derive(Debug, Default)]
pub struct OutputSinks {
    pub stdout: Option<mpsc::Sender<Vec<u8>>>,
    pub stderr: Option<mpsc::Sender<Vec<u8>>>,
}

/// Trait abstracting how sync invocations are executed.
///
/// Production code uses [`AwsCliBackend`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait SyncBackend: Send + Sync {
    /// Execute the given invocation to completion.
    ///
    /// The implementation is free to:
    /// - spawn an OS process (production)
    /// - record the invocation and return scripted output (tests)
    fn run(
        &self,
        invocation: Invocation,
        sinks: OutputSinks,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + '_>>;
}

/// Real backend used in production: runs the AWS CLI as a child process.
#[derive(Debug, Default)]
pub struct AwsCliBackend;

impl AwsCliBackend {
    pub fn new() -> Self {
        Self
    }
}

impl SyncBackend for AwsCliBackend {
    fn run(
        &self,
        invocation: Invocation,
        sinks: OutputSinks,
    ) -> Pin<Box<dyn Future<Output = Result<ProcessOutput>> + Send + '_>> {
        let opts = RunOptions {
            stdout_sink: sinks.stdout,
            stderr_sink: sinks.stderr,
            kill_on_parent_exit: true,
        };

        Box::pin(run_process(invocation, opts))
    }
}
