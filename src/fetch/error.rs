//! Error types for per-track downloads.

use thiserror::Error;

/// Errors that can occur while downloading one track.
///
/// Every variant is treated as transient by the scheduler: the failed
/// entry's file stays missing (or `.part`) and the next pass retries it.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The download engine binary could not be launched.
    #[error("failed to launch download engine `{binary}` for entry {entry_id}: {source}")]
    Spawn {
        /// The binary that failed to start.
        binary: String,
        /// The entry being downloaded.
        entry_id: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The download engine exited unsuccessfully.
    #[error("download engine failed for entry {entry_id} ({status}): {stderr}")]
    Engine {
        /// The entry being downloaded.
        entry_id: String,
        /// Exit status description of the engine process.
        status: String,
        /// Trailing stderr output from the engine.
        stderr: String,
    },

    /// I/O failure reading the engine's output streams.
    #[error("IO error reading engine output for entry {entry_id}: {source}")]
    Io {
        /// The entry being downloaded.
        entry_id: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Creates a spawn error.
    pub fn spawn(
        binary: impl Into<String>,
        entry_id: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Spawn {
            binary: binary.into(),
            entry_id: entry_id.into(),
            source,
        }
    }

    /// Creates an engine-exit error with status and stderr context.
    pub fn engine(
        entry_id: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Engine {
            entry_id: entry_id.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates an IO error.
    pub fn io(entry_id: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            entry_id: entry_id.into(),
            source,
        }
    }
}
