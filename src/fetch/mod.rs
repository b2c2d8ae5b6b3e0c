//! Per-track download seam over the external media download engine.
//!
//! One [`TrackFetcher::fetch`] call downloads one playlist entry into the
//! playlist directory under the deterministic `{id}.{title}.{ext}` name,
//! leaving a `.part` artifact while incomplete. Failures are transient by
//! contract: the scheduler absorbs them and re-drives the pass.
//!
//! # Architecture
//!
//! - [`TrackFetcher`] - Async trait the scheduler consumes
//! - [`YtDlpFetcher`] - Production implementation wrapping the engine binary
//! - [`filename`] - The deterministic naming contract shared with tagging
//! - [`FetchError`] - Transient per-track failures

mod error;
pub mod filename;
mod ytdlp;

pub use error::FetchError;
pub use ytdlp::YtDlpFetcher;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::playlist::{Entry, FormatVariant};
use crate::progress::ProgressSink;

/// Trait for downloading a single track into a target directory.
///
/// # Idempotence contract
///
/// Re-invoking `fetch` for an entry whose final file already exists in
/// `dir` must be a no-op: implementations must not corrupt, truncate, or
/// duplicate completed output. The scheduler relies on this when it
/// re-submits the full working set each pass.
#[async_trait]
pub trait TrackFetcher: Send + Sync {
    /// Downloads `entry` in `format` into `dir`, reporting byte progress
    /// through `progress`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on engine spawn failure, unsuccessful engine
    /// exit, or I/O failure. Callers treat every variant as transient.
    async fn fetch(
        &self,
        entry: &Entry,
        format: &FormatVariant,
        dir: &Path,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<(), FetchError>;
}
