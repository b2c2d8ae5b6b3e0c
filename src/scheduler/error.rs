//! Error types for the completion-driven scheduler.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a scheduler run.
///
/// Per-track download failures are NOT represented here; they are absorbed
/// by the pass loop and retried implicitly.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// An entry offers no variant of the configured target format.
    ///
    /// Surfaced before the first pass; a playlist that cannot be fully
    /// downloaded in the target format is a configuration error, not a
    /// transient condition.
    #[error("entry {entry_id} has no format {format_id} variant")]
    FormatUnavailable {
        /// The entry lacking the format.
        entry_id: String,
        /// The configured target format id.
        format_id: String,
    },

    /// The pass limit was exhausted before the completion invariant held.
    #[error(
        "gave up after {passes} passes: {completed_files} of {expected} tracks completed"
    )]
    PassLimitExceeded {
        /// Number of passes performed.
        passes: u32,
        /// Completed files on disk at the time of giving up.
        completed_files: usize,
        /// Expected number of tracks.
        expected: usize,
    },

    /// The playlist directory could not be scanned between passes.
    #[error("failed to scan download directory {path}: {source}")]
    Scan {
        /// The directory being scanned.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

impl SchedulerError {
    /// Creates a format-unavailable error.
    pub fn format_unavailable(entry_id: impl Into<String>, format_id: impl Into<String>) -> Self {
        Self::FormatUnavailable {
            entry_id: entry_id.into(),
            format_id: format_id.into(),
        }
    }

    /// Creates a scan error with directory context.
    pub fn scan(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Scan {
            path: path.into(),
            source,
        }
    }
}
