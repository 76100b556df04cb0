// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod sync;

use anyhow::Result;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::resolve_config;
use crate::exec::AwsCliBackend;
use crate::sync::{SyncCoordinator, SyncOptions};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config / credential resolution
/// - the coordinator with the real AWS CLI backend
/// - live passthrough of the child's output to the terminal
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(args.config.as_deref())?;

    let backend = AwsCliBackend::new();
    let coordinator = SyncCoordinator::new(cfg.credentials, cfg.aws.bin, backend);

    let mut opts = SyncOptions {
        delete: args.delete,
        ..Default::default()
    };

    // Live passthrough of the child's output, unless --quiet. The sinks are
    // a side-channel: the full output is still buffered for the outcome.
    let mut forwarders = Vec::new();
    if !args.quiet {
        let (stdout_tx, stdout_rx) = mpsc::channel::<Vec<u8>>(32);
        let (stderr_tx, stderr_rx) = mpsc::channel::<Vec<u8>>(32);
        opts.stdout_sink = Some(stdout_tx);
        opts.stderr_sink = Some(stderr_tx);
        forwarders.push(tokio::spawn(forward_chunks(stdout_rx, tokio::io::stdout())));
        forwarders.push(tokio::spawn(forward_chunks(stderr_rx, tokio::io::stderr())));
    }

    // Ctrl-C wins the select and drops the sync future; the runner's
    // kill-on-drop guard then takes the child process down with it.
    let outcome = tokio::select! {
        res = coordinator.sync(&args.source, &args.destination, opts) => res?,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted; killing sync process");
            return Err(anyhow::anyhow!("sync interrupted"));
        }
    };

    // Let pending output flush before reporting.
    for handle in forwarders {
        let _ = handle.await;
    }

    info!(
        destination = %args.destination,
        files = outcome.files.len(),
        "sync finished"
    );
    for file in &outcome.files {
        debug!(file = %file.display(), "transferred");
    }

    Ok(())
}

/// Copy chunks from a sink channel to a terminal stream until the sender
/// side (the runner) goes away.
async fn forward_chunks<W>(mut rx: mpsc::Receiver<Vec<u8>>, mut writer: W)
where
    W: AsyncWrite + Unpin,
{
    while let Some(chunk) = rx.recv().await {
        if writer.write_all(&chunk).await.is_err() {
            break;
        }
        let _ = writer.flush().await;
    }
}
