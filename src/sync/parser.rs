// src/sync/parser.rs

//! Best-effort parsing of `aws s3 sync` output.
//!
//! The AWS CLI prints one human-readable line per transferred file:
//!
//! ```text
//! download: s3://my-bucket/foo/bar/a.file to bar/a.file
//! ```
//!
//! interleaved with progress lines. The format is a log, not a stable
//! contract, so this parser skips anything it does not recognise and
//! callers must treat the result as best-effort.

use std::path::{Path, PathBuf};

use regex::Regex;

/// Pattern for a per-file transfer line: the relative local path is
/// everything after the last ` to ` separator.
const DOWNLOAD_LINE: &str = r"^download: .+ to (.+)$";

/// Extract the local paths of transferred files from captured stdout.
///
/// - Lines are split on any line-ending style (`\n` or `\r`); the AWS CLI
///   uses bare `\r` for in-place progress updates.
/// - Non-matching lines (progress percentages, completion counts, blanks)
///   are skipped silently.
/// - Each captured relative path is resolved against `base_dir` (the
///   caller's current working directory at call time).
/// - Order follows the order of appearance; duplicates are preserved.
pub fn parse_synced_files(stdout: &str, base_dir: &Path) -> Vec<PathBuf> {
    let pattern = Regex::new(DOWNLOAD_LINE).expect("download line pattern is valid");

    stdout
        .split(['\n', '\r'])
        .filter_map(|line| pattern.captures(line))
        .filter_map(|captures| captures.get(1))
        .map(|rel| base_dir.join(rel.as_str()))
        .collect()
}
