//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Download an online playlist as a tagged audio album.
///
/// Trackdown resolves the playlist once, downloads every track
/// concurrently until the set is complete on disk, then writes
/// album/track tags derived from the playlist metadata.
#[derive(Parser, Debug)]
#[command(name = "trackdown")]
#[command(author, version, about)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "resume"])))]
pub struct Args {
    /// Playlist URL to resolve and download
    pub url: Option<String>,

    /// Resume from a previously written descriptor file (skips resolution)
    #[arg(short = 'r', long, value_name = "PATH")]
    pub resume: Option<PathBuf>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
