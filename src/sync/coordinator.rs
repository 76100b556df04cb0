// src/sync/coordinator.rs

//! The sync coordinator: locking and orchestration around `aws s3 sync`.
//!
//! The coordinator owns the set of destination directories currently being
//! synced. A destination is locked by exact string equality — `/foo` and
//! `/foo/` are different keys — and at most one sync per destination may be
//! in flight at a time. Distinct destinations proceed fully in parallel.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::errors::{Result, SyncgateError};
use crate::exec::{Invocation, OutputSinks, SyncBackend};

use super::parser::parse_synced_files;

/// Per-call options for [`SyncCoordinator::sync`].
#[derive(Debug, Default)]
pub struct SyncOptions {
    /// Delete files that exist in the destination but not in the source.
    pub delete: bool,

    /// If set, child stdout chunks are forwarded here as they arrive.
    pub stdout_sink: Option<mpsc::Sender<Vec<u8>>>,

    /// If set, child stderr chunks are forwarded here as they arrive.
    pub stderr_sink: Option<mpsc::Sender<Vec<u8>>>,
}

/// Result of a completed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Raw captured stdout of the sync command.
    pub stdout: String,

    /// Raw captured stderr of the sync command.
    pub stderr: String,

    /// Local paths of the files the command reported as transferred, in
    /// order of appearance. Best-effort: derived from the command's
    /// human-readable output, so treat as a hint rather than a manifest.
    pub files: Vec<PathBuf>,
}

/// Coordinates sync invocations against one credential set.
///
/// Multiple coordinators can coexist (e.g. one per credential set); each
/// owns its own in-flight destination set, so they never interfere.
pub struct SyncCoordinator<B: SyncBackend> {
    credentials: Credentials,
    aws_bin: String,
    backend: B,
    active: Mutex<HashSet<String>>,
}

impl<B: SyncBackend> SyncCoordinator<B> {
    pub fn new(credentials: Credentials, aws_bin: impl Into<String>, backend: B) -> Self {
        Self {
            credentials,
            aws_bin: aws_bin.into(),
            backend,
            active: Mutex::new(HashSet::new()),
        }
    }

    /// Sync `source` into `destination` via the external command.
    ///
    /// `source` and `destination` must be non-empty path/URI strings.
    ///
    /// Fails with [`SyncgateError::SyncInProgress`] — without invoking the
    /// backend — when a sync to the same destination string is already in
    /// flight on this coordinator. Backend failures are propagated
    /// unchanged. The destination lock is released on every path.
    pub async fn sync(
        &self,
        source: &str,
        destination: &str,
        opts: SyncOptions,
    ) -> Result<SyncOutcome> {
        // Check-and-insert happens synchronously, before the first await
        // point; concurrent calls cannot race between check and insert.
        let _lock = self.lock_destination(destination)?;

        info!(
            source = %source,
            destination = %destination,
            delete = opts.delete,
            "starting sync"
        );

        let invocation = self.invocation(source, destination, opts.delete);
        let sinks = OutputSinks {
            stdout: opts.stdout_sink,
            stderr: opts.stderr_sink,
        };

        let output = self.backend.run(invocation, sinks).await?;

        // Relative paths in the output are resolved against the current
        // working directory at call time.
        let base_dir = std::env::current_dir()?;
        let files = parse_synced_files(&output.stdout, &base_dir);

        info!(
            destination = %destination,
            files = files.len(),
            "sync complete"
        );

        Ok(SyncOutcome {
            stdout: output.stdout,
            stderr: output.stderr,
            files,
        })
    }

    /// Build the `aws s3 sync` invocation for one call.
    ///
    /// The environment is exactly the credential triple captured at
    /// construction, for every invocation.
    fn invocation(&self, source: &str, destination: &str, delete: bool) -> Invocation {
        let mut args = vec![
            "s3".to_string(),
            "sync".to_string(),
            source.to_string(),
            destination.to_string(),
        ];
        if delete {
            args.push("--delete".to_string());
        }

        Invocation {
            program: self.aws_bin.clone(),
            args,
            env: self.credentials.to_env(),
            working_dir: None,
        }
    }

    /// Try to mark `destination` as in flight.
    ///
    /// Returns a guard that removes the entry again when dropped, so the
    /// lock is released on success, error and unwinding alike.
    fn lock_destination(&self, destination: &str) -> Result<DestinationLock<'_>> {
        let mut active = lock_set(&self.active);

        if active.contains(destination) {
            debug!(destination = %destination, "destination already locked");
            return Err(SyncgateError::SyncInProgress(destination.to_string()));
        }

        active.insert(destination.to_string());

        Ok(DestinationLock {
            active: &self.active,
            destination: destination.to_string(),
        })
    }
}

/// Scoped hold on one destination key in the coordinator's in-flight set.
struct DestinationLock<'a> {
    active: &'a Mutex<HashSet<String>>,
    destination: String,
}

impl Drop for DestinationLock<'_> {
    fn drop(&mut self) {
        lock_set(self.active).remove(&self.destination);
    }
}

/// Lock the in-flight set, recovering from poisoning.
///
/// The set stays consistent even if a holder panicked: entries are only
/// removed by `DestinationLock::drop`, which runs during unwinding.
fn lock_set(mutex: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
