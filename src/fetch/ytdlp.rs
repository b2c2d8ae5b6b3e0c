//! Track fetcher backed by the external yt-dlp download engine.

use std::path::Path;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, instrument};

use super::filename::OUTPUT_TEMPLATE;
use super::{FetchError, TrackFetcher};
use crate::playlist::{Entry, FormatVariant};
use crate::progress::ProgressSink;
use crate::resolver::DEFAULT_EXTRACTOR_BINARY;

/// Progress line template: `dl|<filename>|<downloaded>|<total>`, one line
/// per engine progress tick (`--newline`). Unknown values print as `NA`.
const PROGRESS_TEMPLATE: &str =
    "download:dl|%(progress.filename)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s";

/// Maximum stderr bytes carried into error messages.
const STDERR_TAIL_BYTES: usize = 2048;

/// Downloads single tracks by running the engine binary with the
/// deterministic output template, parsing its progress stream.
///
/// The engine skips files it has already fully downloaded and resumes
/// `.part` artifacts, which is what makes whole-pass re-submission safe;
/// `--no-overwrites` pins the skip behavior down.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    binary: String,
}

impl YtDlpFetcher {
    /// Creates a fetcher using the default engine binary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_EXTRACTOR_BINARY)
    }

    /// Creates a fetcher using a specific engine binary (path or name).
    #[must_use]
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackFetcher for YtDlpFetcher {
    #[instrument(
        skip(self, entry, format, progress),
        fields(entry_id = %entry.id, format_id = %format.format_id)
    )]
    async fn fetch(
        &self,
        entry: &Entry,
        format: &FormatVariant,
        dir: &Path,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<(), FetchError> {
        let mut child = Command::new(&self.binary)
            .arg("--format")
            .arg(&format.format_id)
            .arg("--output")
            .arg(OUTPUT_TEMPLATE)
            .arg("--no-overwrites")
            .arg("--no-playlist")
            .arg("--newline")
            .arg("--no-warnings")
            .arg("--progress-template")
            .arg(PROGRESS_TEMPLATE)
            .arg(&entry.webpage_url)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FetchError::spawn(&self.binary, &entry.id, e))?;

        // Drain both pipes concurrently so a full stderr buffer can never
        // stall the progress stream (or the child).
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let progress_stream = async {
            if let Some(stdout) = stdout {
                let mut lines = BufReader::new(stdout).lines();
                while let Some(line) = lines.next_line().await? {
                    if let Some((filename, downloaded, total)) = parse_progress_line(&line) {
                        progress.on_progress(filename, downloaded, total);
                    }
                }
            }
            Ok::<(), std::io::Error>(())
        };
        let stderr_stream = async {
            let mut buf = Vec::new();
            if let Some(mut stderr) = stderr {
                stderr.read_to_end(&mut buf).await?;
            }
            Ok::<Vec<u8>, std::io::Error>(buf)
        };

        let (progress_result, stderr_result) = tokio::join!(progress_stream, stderr_stream);
        progress_result.map_err(|e| FetchError::io(&entry.id, e))?;
        let stderr_buf = stderr_result.map_err(|e| FetchError::io(&entry.id, e))?;

        let status = child
            .wait()
            .await
            .map_err(|e| FetchError::io(&entry.id, e))?;
        if !status.success() {
            return Err(FetchError::engine(
                &entry.id,
                status.to_string(),
                stderr_tail(&stderr_buf),
            ));
        }

        debug!("track download finished");
        Ok(())
    }
}

/// Parses one progress-template line into `(filename, downloaded, total)`.
///
/// Returns `None` for non-progress output and for lines without a parsable
/// downloaded-bytes count.
fn parse_progress_line(line: &str) -> Option<(&str, u64, Option<u64>)> {
    let rest = line.strip_prefix("dl|")?;
    let mut fields = rest.rsplitn(3, '|');
    let total = fields.next()?;
    let downloaded = fields.next()?;
    let filename = fields.next()?;

    let downloaded = downloaded.parse::<u64>().ok()?;
    let total = total.parse::<u64>().ok();
    Some((filename, downloaded, total))
}

/// Trailing slice of stderr output, lossily decoded for error context.
fn stderr_tail(stderr: &[u8]) -> String {
    let start = stderr.len().saturating_sub(STDERR_TAIL_BYTES);
    String::from_utf8_lossy(&stderr[start..]).trim().to_string()
}
