//! Completion-driven download scheduler.
//!
//! The scheduler launches one concurrent fetch task per playlist entry,
//! waits for the whole pass to reach a terminal state, then checks the
//! on-disk completion invariant: no `.part` artifacts and at least as many
//! completed audio files as entries. Until the invariant holds it re-submits
//! the *same full working set* — individual failures carry no bookkeeping,
//! because the directory contents are the ground truth of what remains and
//! re-fetching a finished entry is a no-op at the engine layer.
//!
//! This trades efficiency for robustness: partial failures, process
//! restarts, and `--resume` runs all funnel into the same recheck path.
//!
//! # Concurrency Model
//!
//! - Each fetch runs in its own Tokio task
//! - A semaphore permit is acquired before starting each fetch
//! - Permits are released automatically when fetches complete (RAII)
//! - The pass joins every task (wait-for-all, never fail-fast)

mod error;
pub mod scan;

pub use error::SchedulerError;
pub use scan::{ScanReport, scan_dir};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use crate::fetch::TrackFetcher;
use crate::playlist::{AUDIO_EXT, Entry, FormatVariant, M4A_FORMAT_ID, PlaylistInfo};
use crate::progress::ProgressAggregator;

/// Upper bound on concurrent fetch tasks, whatever the playlist size.
pub const MAX_WORKERS: usize = 16;

/// Default cap on download passes before giving up.
pub const DEFAULT_MAX_PASSES: u32 = 20;

/// Default delay between passes.
const DEFAULT_PASS_DELAY: Duration = Duration::from_secs(1);

/// Maximum jitter added to the inter-pass delay.
const MAX_JITTER_MS: u64 = 500;

/// Tunables for the pass loop.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Target format id selected for every entry.
    pub format_id: String,
    /// Extension of completed audio files.
    pub audio_ext: String,
    /// Concurrent fetch cap (clamped to the working-set size).
    pub max_workers: usize,
    /// Pass cap; `0` means unbounded.
    pub max_passes: u32,
    /// Base delay between passes (jitter is added on top).
    pub pass_delay: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            format_id: M4A_FORMAT_ID.to_string(),
            audio_ext: AUDIO_EXT.to_string(),
            max_workers: MAX_WORKERS,
            max_passes: DEFAULT_MAX_PASSES,
            pass_delay: DEFAULT_PASS_DELAY,
        }
    }
}

/// Outcome of a completed scheduler run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerReport {
    /// Number of passes performed (0 for an empty playlist).
    pub passes: u32,
    /// Completed audio files on disk when the invariant held.
    pub completed_files: usize,
}

/// Drives concurrent track downloads until the completion invariant holds.
pub struct Scheduler {
    config: SchedulerConfig,
    fetcher: Arc<dyn TrackFetcher>,
    aggregator: Arc<ProgressAggregator>,
}

impl Scheduler {
    /// Creates a scheduler over the given fetcher and progress aggregator.
    #[must_use]
    pub fn new(
        config: SchedulerConfig,
        fetcher: Arc<dyn TrackFetcher>,
        aggregator: Arc<ProgressAggregator>,
    ) -> Self {
        Self {
            config,
            fetcher,
            aggregator,
        }
    }

    /// Returns the scheduler configuration.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Downloads every playlist entry into `dir`, re-driving passes until
    /// the directory satisfies the completion invariant.
    ///
    /// An empty playlist satisfies the invariant trivially: no pass is
    /// launched.
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::FormatUnavailable`] if any entry lacks the
    ///   target format (checked before the first pass)
    /// - [`SchedulerError::PassLimitExceeded`] when `max_passes` runs out
    /// - [`SchedulerError::Scan`] if the directory cannot be read
    ///
    /// Individual fetch failures never surface here; they are logged and
    /// retried on the next pass.
    #[instrument(skip(self, playlist), fields(playlist_id = %playlist.id, dir = %dir.display()))]
    pub async fn run(
        &self,
        playlist: &PlaylistInfo,
        dir: &Path,
    ) -> Result<SchedulerReport, SchedulerError> {
        let jobs = self.build_working_set(playlist)?;

        if jobs.is_empty() {
            info!("playlist has no entries; nothing to download");
            return Ok(SchedulerReport {
                passes: 0,
                completed_files: 0,
            });
        }

        let workers = self.config.max_workers.clamp(1, MAX_WORKERS).min(jobs.len());
        let semaphore = Arc::new(Semaphore::new(workers));
        let mut passes = 0u32;

        loop {
            passes += 1;
            info!(pass = passes, tracks = jobs.len(), workers, "starting download pass");

            self.launch_pass(&jobs, dir, &semaphore).await?;

            let report = scan_dir(dir, &self.config.audio_ext)?;
            if report.is_complete(jobs.len()) {
                info!(
                    passes,
                    completed = report.completed_files,
                    "all tracks completed"
                );
                return Ok(SchedulerReport {
                    passes,
                    completed_files: report.completed_files,
                });
            }

            if self.config.max_passes > 0 && passes >= self.config.max_passes {
                return Err(SchedulerError::PassLimitExceeded {
                    passes,
                    completed_files: report.completed_files,
                    expected: jobs.len(),
                });
            }

            info!(
                pass = passes,
                part_files = report.part_files,
                completed = report.completed_files,
                expected = jobs.len(),
                "pass incomplete; re-driving the working set"
            );
            tokio::time::sleep(pass_delay_with_jitter(self.config.pass_delay)).await;
        }
    }

    /// Selects the target format variant for every entry.
    ///
    /// An entry lacking the target format is a configuration error and is
    /// surfaced immediately rather than silently skipped.
    fn build_working_set(
        &self,
        playlist: &PlaylistInfo,
    ) -> Result<Vec<(Entry, FormatVariant)>, SchedulerError> {
        playlist
            .entries
            .iter()
            .map(|entry| {
                entry
                    .format_variant(&self.config.format_id)
                    .map(|format| (entry.clone(), format.clone()))
                    .ok_or_else(|| {
                        SchedulerError::format_unavailable(&entry.id, &self.config.format_id)
                    })
            })
            .collect()
    }

    /// Submits one fetch task per job and joins them all.
    async fn launch_pass(
        &self,
        jobs: &[(Entry, FormatVariant)],
        dir: &Path,
        semaphore: &Arc<Semaphore>,
    ) -> Result<(), SchedulerError> {
        let slots = self.aggregator.begin_pass(jobs.len());
        let mut handles = Vec::with_capacity(jobs.len());

        for ((entry, format), slot) in jobs.iter().zip(slots) {
            // Acquire semaphore permit (blocks if at the worker limit)
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| SchedulerError::SemaphoreClosed)?;

            let fetcher = Arc::clone(&self.fetcher);
            let aggregator = Arc::clone(&self.aggregator);
            let entry = entry.clone();
            let format = format.clone();
            let dir = dir.to_path_buf();

            handles.push(tokio::spawn(async move {
                // Permit is dropped when this block exits (RAII)
                let _permit = permit;

                if let Err(e) = fetcher.fetch(&entry, &format, &dir, slot).await {
                    warn!(
                        entry_id = %entry.id,
                        error = %e,
                        "track download failed; retried on next pass"
                    );
                }
                aggregator.task_finished();
            }));
        }

        // Wait for all tasks to complete; a panicking task is logged and
        // treated like a failed download.
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "download task panicked");
            }
        }
        Ok(())
    }
}

/// Base inter-pass delay plus random jitter.
fn pass_delay_with_jitter(base: Duration) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..=MAX_JITTER_MS);
    base + Duration::from_millis(jitter)
}
