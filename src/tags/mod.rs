//! Metadata reconciliation: matching downloaded files back to descriptor
//! entries and writing album/track tags.
//!
//! Runs after the scheduler declares completion. Each completed audio file
//! embeds its entry id before the first `.` in its filename; that id must
//! match exactly one descriptor entry or the naming contract is broken and
//! the run aborts.
//!
//! # Architecture
//!
//! - [`reconcile`] - The reconciliation pass
//! - [`TagWriter`] / [`TrackTags`] - The tag container writer seam
//! - [`LoftyTagWriter`] - Production writer over the lofty tag library

mod error;
mod writer;

pub use error::TagError;
pub use writer::LoftyTagWriter;

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::fetch::filename::entry_id_from_filename;
use crate::playlist::{AUDIO_EXT, PlaylistInfo};

/// Tag values written into one audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    /// Track title.
    pub title: String,
    /// Album name.
    pub album: String,
    /// Artist name.
    pub artist: String,
    /// 1-based track number, from the descriptor's `playlist_index`.
    pub track_number: u32,
    /// Total tracks; the count of completed files on disk, which may
    /// differ from the descriptor entry count after partial prior runs.
    pub track_total: u32,
}

/// Trait for persisting [`TrackTags`] into an audio file's tag container.
pub trait TagWriter: Send + Sync {
    /// Writes `tags` into the container of the file at `path`, in place.
    ///
    /// # Errors
    ///
    /// Returns [`TagError`] if the container cannot be read or written.
    fn write(&self, path: &Path, tags: &TrackTags) -> Result<(), TagError>;
}

/// Tags every completed audio file in `dir` from the playlist descriptor.
///
/// Returns the number of files tagged.
///
/// # Errors
///
/// - [`TagError::MetadataMismatch`] / [`TagError::MissingId`] when a file
///   cannot be joined to exactly one entry
/// - [`TagError::Io`] if the directory cannot be enumerated
/// - writer errors are passed through
#[instrument(skip(playlist, writer), fields(playlist_id = %playlist.id, dir = %dir.display()))]
pub fn reconcile(
    playlist: &PlaylistInfo,
    dir: &Path,
    writer: &dyn TagWriter,
) -> Result<usize, TagError> {
    let files = completed_files(dir)?;
    let track_total = u32::try_from(files.len()).unwrap_or(u32::MAX);

    for path in &files {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let entry_id = entry_id_from_filename(&file_name)
            .ok_or_else(|| TagError::MissingId {
                file: file_name.clone(),
            })?
            .to_string();

        let mut matches = playlist.entries.iter().filter(|e| e.id == entry_id);
        let (Some(entry), None) = (matches.next(), matches.next()) else {
            let count = playlist.entries.iter().filter(|e| e.id == entry_id).count();
            return Err(TagError::mismatch(file_name, entry_id, count));
        };

        let tags = TrackTags {
            title: entry.title.clone(),
            album: entry.album.clone(),
            artist: entry.artist.clone(),
            track_number: entry.playlist_index,
            track_total,
        };
        writer.write(path, &tags)?;
        debug!(
            file = %file_name,
            track = entry.playlist_index,
            of = track_total,
            "tags written"
        );
    }

    info!(files = files.len(), "metadata reconciled");
    Ok(files.len())
}

/// Completed audio files in `dir`, sorted by name for deterministic order.
fn completed_files(dir: &Path) -> Result<Vec<PathBuf>, TagError> {
    let mut files = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| TagError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| TagError::io(dir, e))?;
        let path = entry.path();
        if path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(AUDIO_EXT))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
