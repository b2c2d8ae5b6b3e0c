//! Error types for descriptor persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur loading or saving the playlist descriptor.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// I/O error reading or writing the descriptor file.
    #[error("IO error accessing descriptor {path}: {source}")]
    Io {
        /// The descriptor path involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The descriptor file is not valid descriptor JSON.
    #[error("malformed descriptor {path}: {source}")]
    Malformed {
        /// The descriptor path involved.
        path: PathBuf,
        /// The underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl PlaylistError {
    /// Creates an IO error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a malformed-descriptor error with path context.
    pub fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Malformed {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display_includes_path() {
        let err = PlaylistError::io(
            "/tmp/pl.info.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/pl.info.json"), "expected path in: {msg}");
    }

    #[test]
    fn test_malformed_error_display_includes_path() {
        let parse_err = serde_json::from_str::<super::super::PlaylistInfo>("not json").unwrap_err();
        let err = PlaylistError::malformed("/tmp/pl.info.json", parse_err);
        let msg = err.to_string();
        assert!(msg.contains("malformed"), "expected 'malformed' in: {msg}");
        assert!(msg.contains("/tmp/pl.info.json"), "expected path in: {msg}");
    }
}
