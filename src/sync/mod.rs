// src/sync/mod.rs

//! Sync orchestration for syncgate.
//!
//! This module ties together:
//! - the per-destination locking protocol (at most one sync in flight per
//!   destination string)
//! - construction of the external `aws s3 sync` invocation
//! - best-effort parsing of the command's output into transferred paths
//!
//! The locking/orchestration logic lives in [`coordinator`]; the pure
//! output parser is isolated in [`parser`] so format drift in the external
//! tool only ever touches that one function and its tests.

pub mod coordinator;
pub mod parser;

pub use coordinator::{SyncCoordinator, SyncOptions, SyncOutcome};
pub use parser::parse_synced_files;
