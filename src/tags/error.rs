//! Error types for the metadata reconciliation pass.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while tagging downloaded files.
///
/// All variants are fatal: tagging runs after the scheduler has declared
/// completion, so inconsistencies here mean a broken naming contract
/// rather than a transient condition.
#[derive(Debug, Error)]
pub enum TagError {
    /// A downloaded file's embedded id matched zero or multiple descriptor
    /// entries; exactly one match is required.
    #[error(
        "{matches} descriptor entries match file {file} (embedded id `{entry_id}`); expected exactly one"
    )]
    MetadataMismatch {
        /// The downloaded filename.
        file: String,
        /// The id extracted from the filename.
        entry_id: String,
        /// How many entries matched.
        matches: usize,
    },

    /// A downloaded filename carries no extractable entry id.
    #[error("file {file} has no embedded entry id")]
    MissingId {
        /// The downloaded filename.
        file: String,
    },

    /// I/O error enumerating the playlist directory.
    #[error("IO error scanning {path}: {source}")]
    Io {
        /// The directory or file involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The tag container could not be read or written.
    #[error("failed to write tags to {path}: {source}")]
    Container {
        /// The audio file involved.
        path: PathBuf,
        /// The underlying tag library error.
        #[source]
        source: lofty::error::LoftyError,
    },

    /// The audio file format offers no writable tag container.
    #[error("no writable tag container in {path}")]
    MissingContainer {
        /// The audio file involved.
        path: PathBuf,
    },
}

impl TagError {
    /// Creates a mismatch error.
    pub fn mismatch(file: impl Into<String>, entry_id: impl Into<String>, matches: usize) -> Self {
        Self::MetadataMismatch {
            file: file.into(),
            entry_id: entry_id.into(),
            matches,
        }
    }

    /// Creates an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a container error with path context.
    pub fn container(path: impl Into<PathBuf>, source: lofty::error::LoftyError) -> Self {
        Self::Container {
            path: path.into(),
            source,
        }
    }
}
