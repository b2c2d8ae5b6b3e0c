//! Progress UI (spinner) for download passes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use super::ProgressAggregator;

/// Spawns the progress UI (spinner) when requested.
/// Returns (handle, stop) so the caller can signal stop and await the handle.
/// When `use_spinner` is false, returns (None, stop) with stop already true.
pub fn spawn_progress_ui(
    use_spinner: bool,
    aggregator: Arc<ProgressAggregator>,
) -> (Option<tokio::task::JoinHandle<()>>, Arc<AtomicBool>) {
    if !use_spinner {
        return (None, Arc::new(AtomicBool::new(true)));
    }
    let stop = Arc::new(AtomicBool::new(false));
    let handle = spawn_spinner_inner(aggregator, Arc::clone(&stop));
    (Some(handle), stop)
}

fn spawn_spinner_inner(
    aggregator: Arc<ProgressAggregator>,
    stop: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));

        while !stop.load(Ordering::SeqCst) {
            let (done, total) = aggregator.overall();
            let current = current_filename(&aggregator).unwrap_or_else(|| "tracks".to_string());
            spinner.set_message(format!(
                "[{}/{}] pass {}: downloading {}...",
                done.min(total),
                total,
                aggregator.pass().max(1),
                current
            ));
            tokio::time::sleep(Duration::from_millis(120)).await;
        }

        spinner.finish_and_clear();
    })
}

/// Picks a filename to display: the first slot that has reported bytes but
/// not yet reached a known total.
fn current_filename(aggregator: &ProgressAggregator) -> Option<String> {
    aggregator
        .snapshots()
        .into_iter()
        .find(|snap| {
            !snap.filename.is_empty()
                && snap
                    .total_bytes
                    .is_none_or(|total| snap.downloaded_bytes < total)
        })
        .map(|snap| snap.filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressSink;

    #[tokio::test]
    async fn spawn_progress_ui_when_disabled_returns_none_handle_and_stop_already_true() {
        let aggregator = Arc::new(ProgressAggregator::new());

        let (handle, stop) = spawn_progress_ui(false, aggregator);

        assert!(handle.is_none());
        assert!(
            stop.load(Ordering::SeqCst),
            "stop signal should be true when spinner disabled"
        );
    }

    #[tokio::test]
    async fn spawn_progress_ui_when_enabled_returns_handle_and_stop_and_stop_ends_task() {
        let aggregator = Arc::new(ProgressAggregator::new());
        aggregator.begin_pass(1);

        let (handle, stop) = spawn_progress_ui(true, aggregator);

        assert!(
            handle.is_some(),
            "handle should be Some when spinner enabled"
        );
        assert!(
            !stop.load(Ordering::SeqCst),
            "stop should be false initially"
        );

        stop.store(true, Ordering::SeqCst);
        if let Some(join_handle) = handle {
            let _ = join_handle.await;
        }
        // If we get here without hanging, the spinner task exited on stop signal
    }

    #[tokio::test]
    async fn current_filename_skips_finished_slots() {
        let aggregator = ProgressAggregator::new();
        let slots = aggregator.begin_pass(2);
        slots[0].on_progress("done.m4a.part", 100, Some(100));
        slots[1].on_progress("going.m4a.part", 10, Some(100));

        assert_eq!(
            current_filename(&aggregator),
            Some("going.m4a.part".to_string())
        );
    }
}
