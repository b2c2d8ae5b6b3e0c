//! CLI entry point for the trackdown tool.

use std::fs;
use std::io::{self, ErrorKind, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::{Context, Result, bail};
use clap::Parser;
use trackdown_core::{
    LoftyTagWriter, PlaylistResolver, ProgressAggregator, Scheduler, SchedulerConfig,
    YtDlpFetcher, YtDlpResolver, playlist::store, progress::console, reconcile,
};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Trackdown starting");

    // Exactly one source per run: resolve the URL, or load the cached
    // descriptor with no network access.
    let playlist = match (&args.url, &args.resume) {
        (None, Some(path)) => {
            info!(path = %path.display(), "loading cached descriptor; skipping resolution");
            store::load(path).context("failed to load cached descriptor")?
        }
        (Some(url), None) => {
            info!(url = %url, "resolving playlist");
            YtDlpResolver::new()
                .resolve(url)
                .await
                .context("playlist resolution failed")?
        }
        // clap's arg group enforces this; kept as a guard for direct callers.
        _ => bail!("either a playlist URL or --resume <PATH> is required"),
    };

    info!(
        playlist_id = %playlist.id,
        entries = playlist.len(),
        "playlist descriptor ready"
    );

    // Persist the descriptor before any download starts; it is the resume
    // point for interrupted runs.
    store::save(&playlist, Path::new(".")).context("failed to persist descriptor")?;

    let dir = PathBuf::from(&playlist.id);
    match fs::create_dir(&dir) {
        Ok(()) => debug!(dir = %dir.display(), "download directory created"),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!(dir = %dir.display(), "download directory already exists");
        }
        Err(e) => {
            return Err(e).context(format!(
                "failed to create download directory {}",
                dir.display()
            ));
        }
    }

    let aggregator = Arc::new(ProgressAggregator::new());
    let use_spinner = io::stdout().is_terminal() && !args.quiet;
    let (ui_handle, ui_stop) = console::spawn_progress_ui(use_spinner, Arc::clone(&aggregator));

    let scheduler = Scheduler::new(
        SchedulerConfig::default(),
        Arc::new(YtDlpFetcher::new()),
        Arc::clone(&aggregator),
    );
    let run_result = scheduler.run(&playlist, &dir).await;

    ui_stop.store(true, Ordering::SeqCst);
    if let Some(handle) = ui_handle {
        let _ = handle.await;
    }

    let report = run_result.context("download scheduling failed")?;

    let tagged = reconcile(&playlist, &dir, &LoftyTagWriter::new())
        .context("metadata reconciliation failed")?;

    info!(
        passes = report.passes,
        files = tagged,
        "Playlist complete"
    );

    Ok(())
}
