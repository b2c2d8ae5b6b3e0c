//! Progress aggregation for concurrent download passes.
//!
//! Each download task owns exactly one [`TrackProgress`] slot for the
//! lifetime of one attempt and reports through the [`ProgressSink`] trait;
//! the only shared state is the aggregator's completed-of-total counter
//! pair, updated with atomic increments. Rendering lives in [`console`],
//! which polls the aggregator; the aggregator itself holds no rendering
//! logic.

pub mod console;

use std::sync::atomic::{AtomicU32, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Callback contract for byte-level download progress.
///
/// Implementations must be cheap and non-blocking; the download engine
/// wrapper calls this once per progress line.
pub trait ProgressSink: Send + Sync {
    /// Reports the current state of one in-flight download.
    ///
    /// `total_bytes` is `None` when the engine does not know the final size.
    fn on_progress(&self, filename: &str, downloaded_bytes: u64, total_bytes: Option<u64>) {
        let _ = (filename, downloaded_bytes, total_bytes);
    }
}

/// A sink that discards all progress events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ProgressSink for NoopSink {}

/// Point-in-time view of one in-flight download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// Filename reported by the download engine (empty until first event).
    pub filename: String,
    /// Bytes downloaded so far.
    pub downloaded_bytes: u64,
    /// Total bytes, when known.
    pub total_bytes: Option<u64>,
}

/// Per-task progress slot. The owning task is the only writer; readers
/// (the console renderer) take snapshots.
#[derive(Debug, Default)]
pub struct TrackProgress {
    filename: Mutex<String>,
    downloaded: AtomicU64,
    // 0 encodes "unknown"; the engine never reports a zero total.
    total: AtomicU64,
}

impl TrackProgress {
    /// Takes a consistent-enough snapshot for display purposes.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        let filename = self
            .filename
            .lock()
            .map(|name| name.clone())
            .unwrap_or_default();
        let total = self.total.load(Ordering::Relaxed);
        ProgressSnapshot {
            filename,
            downloaded_bytes: self.downloaded.load(Ordering::Relaxed),
            total_bytes: (total > 0).then_some(total),
        }
    }
}

impl ProgressSink for TrackProgress {
    fn on_progress(&self, filename: &str, downloaded_bytes: u64, total_bytes: Option<u64>) {
        if let Ok(mut name) = self.filename.lock()
            && name.as_str() != filename
        {
            filename.clone_into(&mut name);
        }
        self.downloaded.store(downloaded_bytes, Ordering::Relaxed);
        if let Some(total) = total_bytes {
            self.total.store(total, Ordering::Relaxed);
        }
    }
}

/// Aggregates per-track progress plus an overall completed-of-total count
/// for the current pass.
#[derive(Debug, Default)]
pub struct ProgressAggregator {
    slots: Mutex<Vec<Arc<TrackProgress>>>,
    completed: AtomicUsize,
    submitted: AtomicUsize,
    pass: AtomicU32,
}

impl ProgressAggregator {
    /// Creates an aggregator with no active pass.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new pass of `total` tasks, returning one fresh slot per task.
    ///
    /// Slot `i` belongs exclusively to task `i`; the aggregator keeps a
    /// reference for renderers.
    pub fn begin_pass(&self, total: usize) -> Vec<Arc<TrackProgress>> {
        let fresh: Vec<Arc<TrackProgress>> = (0..total)
            .map(|_| Arc::new(TrackProgress::default()))
            .collect();
        if let Ok(mut slots) = self.slots.lock() {
            slots.clone_from(&fresh);
        }
        self.completed.store(0, Ordering::SeqCst);
        self.submitted.store(total, Ordering::SeqCst);
        self.pass.fetch_add(1, Ordering::SeqCst);
        fresh
    }

    /// Records one task reaching a terminal state (success or failure).
    pub fn task_finished(&self) {
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns `(finished, submitted)` for the current pass.
    #[must_use]
    pub fn overall(&self) -> (usize, usize) {
        (
            self.completed.load(Ordering::SeqCst),
            self.submitted.load(Ordering::SeqCst),
        )
    }

    /// Returns the 1-based number of the current pass (0 before any pass).
    #[must_use]
    pub fn pass(&self) -> u32 {
        self.pass.load(Ordering::SeqCst)
    }

    /// Snapshots every slot of the current pass.
    #[must_use]
    pub fn snapshots(&self) -> Vec<ProgressSnapshot> {
        self.slots
            .lock()
            .map(|slots| slots.iter().map(|slot| slot.snapshot()).collect())
            .unwrap_or_default()
    }
}
