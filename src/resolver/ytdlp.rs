//! Playlist resolver backed by the external yt-dlp extraction engine.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};
use url::Url;

use super::{PlaylistResolver, ResolveError};
use crate::playlist::PlaylistInfo;

/// Default extraction engine binary, resolved through `PATH`.
pub const DEFAULT_EXTRACTOR_BINARY: &str = "yt-dlp";

/// Maximum stderr bytes carried into error messages.
const STDERR_TAIL_BYTES: usize = 2048;

/// Resolves playlists by running `yt-dlp --dump-single-json` and parsing
/// the resulting JSON document into a [`PlaylistInfo`].
#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    binary: String,
}

impl YtDlpResolver {
    /// Creates a resolver using the default engine binary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_EXTRACTOR_BINARY)
    }

    /// Creates a resolver using a specific engine binary (path or name).
    #[must_use]
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for YtDlpResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlaylistResolver for YtDlpResolver {
    #[instrument(skip(self), fields(binary = %self.binary))]
    async fn resolve(&self, url: &str) -> Result<PlaylistInfo, ResolveError> {
        validate_playlist_url(url)?;

        debug!("invoking extraction engine");
        let output = Command::new(&self.binary)
            .arg("--dump-single-json")
            .arg("--no-warnings")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ResolveError::spawn(&self.binary, e))?;

        if !output.status.success() {
            return Err(ResolveError::extraction(
                url,
                output.status.to_string(),
                stderr_tail(&output.stderr),
            ));
        }

        let info: PlaylistInfo = serde_json::from_slice(&output.stdout)
            .map_err(|e| ResolveError::parse(url, e))?;
        debug!(playlist_id = %info.id, entries = info.len(), "playlist resolved");
        Ok(info)
    }
}

/// Rejects inputs the engine would reject anyway, without spawning it.
fn validate_playlist_url(url: &str) -> Result<(), ResolveError> {
    let parsed = Url::parse(url).map_err(|_| ResolveError::invalid_url(url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ResolveError::invalid_url(url));
    }
    Ok(())
}

/// Trailing slice of stderr output, lossily decoded for error context.
fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL_BYTES);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}
