// src/exec/runner.rs

//! External process runner.
//!
//! Spawns a single command with an exact environment, buffers its stdout and
//! stderr in full, and optionally forwards each chunk to caller-supplied
//! sinks as it arrives. The streamed copy is a side-channel; completion is
//! signalled only by process exit.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::{Result, SyncgateError};

/// A fully-resolved command invocation.
///
/// The environment is exact: the child receives `env` and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub working_dir: Option<PathBuf>,
}

impl Invocation {
    /// Render the invocation as a single human-readable command line,
    /// for logging only.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Runner behaviour knobs.
///
/// - `stdout_sink` / `stderr_sink`: if set, every chunk read from the
///   corresponding child stream is forwarded there in addition to being
///   buffered. A dropped receiver never fails the run.
/// - `kill_on_parent_exit`: kill the child if the run future is dropped
///   before the child exits (runtime teardown, a `select!` arm losing).
#[derive(Debug, Default)]
pub struct RunOptions {
    pub stdout_sink: Option<mpsc::Sender<Vec<u8>>>,
    pub stderr_sink: Option<mpsc::Sender<Vec<u8>>>,
    pub kill_on_parent_exit: bool,
}

/// Captured output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run a command to completion, capturing stdout and stderr.
///
/// Fails with [`SyncgateError::CommandFailed`] on a non-zero exit status
/// (carrying the captured stderr), or an IO error if the process could not
/// be spawned.
pub async fn run_process(invocation: Invocation, opts: RunOptions) -> Result<ProcessOutput> {
    info!(
        program = %invocation.program,
        cmd = %invocation.display_line(),
        "starting external process"
    );

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args)
        .env_clear()
        .envs(invocation.env.iter().map(|(k, v)| (k, v)))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(ref dir) = invocation.working_dir {
        cmd.current_dir(dir);
    }
    if opts.kill_on_parent_exit {
        cmd.kill_on_drop(true);
    }

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning `{}`", invocation.display_line()))?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Drain both streams concurrently with waiting on the child; if either
    // pipe fills while we only wait, the child blocks forever.
    let stdout_task = tokio::spawn(drain_stream(stdout, opts.stdout_sink));
    let stderr_task = tokio::spawn(drain_stream(stderr, opts.stderr_sink));

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for `{}`", invocation.program))?;

    let stdout_buf = stdout_task
        .await
        .context("joining stdout drain task")?;
    let stderr_buf = stderr_task
        .await
        .context("joining stderr drain task")?;

    let output = ProcessOutput {
        stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
    };

    let code = status.code().unwrap_or(-1);
    debug!(
        program = %invocation.program,
        exit_code = code,
        success = status.success(),
        "external process exited"
    );

    if !status.success() {
        return Err(SyncgateError::CommandFailed {
            program: invocation.program,
            code,
            stderr: output.stderr,
        });
    }

    Ok(output)
}

/// Read a child stream to EOF, buffering everything and forwarding each
/// chunk to the sink when one is present.
async fn drain_stream<R>(reader: Option<R>, sink: Option<mpsc::Sender<Vec<u8>>>) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut buffer = Vec::new();

    let Some(mut reader) = reader else {
        return buffer;
    };

    let mut chunk = [0u8; 8192];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buffer.extend_from_slice(&chunk[..n]);
                if let Some(ref sink) = sink {
                    // The receiver side may have gone away; streaming is
                    // best-effort and must not fail the run.
                    let _ = sink.send(chunk[..n].to_vec()).await;
                }
            }
            Err(e) => {
                debug!(error = %e, "error reading child stream; stopping drain");
                break;
            }
        }
    }

    buffer
}
