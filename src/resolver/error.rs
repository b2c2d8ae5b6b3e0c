//! Error types for playlist resolution.

use thiserror::Error;

/// Errors that can occur while resolving a playlist URL.
///
/// All variants are fatal to the run; resolution is never retried.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The provided playlist URL is not a valid http(s) URL.
    #[error("invalid playlist URL: {url}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
    },

    /// The extraction engine binary could not be launched.
    #[error("failed to launch extraction engine `{binary}`: {source}")]
    Spawn {
        /// The binary that failed to start.
        binary: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The extraction engine exited unsuccessfully.
    #[error("extraction engine failed for {url} ({status}): {stderr}")]
    Extraction {
        /// The playlist URL being resolved.
        url: String,
        /// Exit status description of the engine process.
        status: String,
        /// Trailing stderr output from the engine.
        stderr: String,
    },

    /// The engine produced output that does not parse as a descriptor.
    #[error("malformed extractor output for {url}: {source}")]
    Parse {
        /// The playlist URL being resolved.
        url: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

impl ResolveError {
    /// Creates an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a spawn error with the binary name.
    pub fn spawn(binary: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            binary: binary.into(),
            source,
        }
    }

    /// Creates an extraction failure with status and stderr context.
    pub fn extraction(
        url: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Extraction {
            url: url.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a parse error with the source URL.
    pub fn parse(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            url: url.into(),
            source,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let err = ResolveError::invalid_url("not a url");
        let msg = err.to_string();
        assert!(msg.contains("invalid playlist URL"), "got: {msg}");
        assert!(msg.contains("not a url"), "got: {msg}");
    }

    #[test]
    fn test_extraction_display_includes_status_and_stderr() {
        let err = ResolveError::extraction(
            "https://example.com/playlist",
            "exit status: 1",
            "ERROR: unsupported URL",
        );
        let msg = err.to_string();
        assert!(msg.contains("exit status: 1"), "got: {msg}");
        assert!(msg.contains("unsupported URL"), "got: {msg}");
    }

    #[test]
    fn test_parse_display_includes_url() {
        let source = serde_json::from_str::<crate::playlist::PlaylistInfo>("[]").unwrap_err();
        let err = ResolveError::parse("https://example.com/playlist", source);
        let msg = err.to_string();
        assert!(msg.contains("malformed extractor output"), "got: {msg}");
        assert!(msg.contains("https://example.com/playlist"), "got: {msg}");
    }
}
