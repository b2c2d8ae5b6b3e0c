//! Write-once persistence of the playlist descriptor.
//!
//! The descriptor is written before any download starts and read back by
//! `--resume` runs, so everything a restarted process needs survives on disk.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use super::{PlaylistError, PlaylistInfo};

/// Returns the descriptor filename for a playlist id: `{id}.info.json`.
#[must_use]
pub fn descriptor_filename(playlist_id: &str) -> String {
    format!("{playlist_id}.info.json")
}

/// Writes the descriptor into `dir` and returns the written path.
///
/// The file is replaced wholesale; there are no concurrent writers by
/// construction (one write at run start).
///
/// # Errors
///
/// Returns [`PlaylistError`] on I/O or serialization failure.
#[instrument(skip(info), fields(playlist_id = %info.id))]
pub fn save(info: &PlaylistInfo, dir: &Path) -> Result<PathBuf, PlaylistError> {
    let path = dir.join(descriptor_filename(&info.id));
    let file = File::create(&path).map_err(|e| PlaylistError::io(&path, e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, info).map_err(|e| PlaylistError::malformed(&path, e))?;
    debug!(path = %path.display(), entries = info.len(), "descriptor written");
    Ok(path)
}

/// Loads a previously persisted descriptor. Performs no network access.
///
/// # Errors
///
/// Returns [`PlaylistError`] if the file cannot be read or does not parse
/// as a descriptor.
#[instrument]
pub fn load(path: &Path) -> Result<PlaylistInfo, PlaylistError> {
    let bytes = fs::read(path).map_err(|e| PlaylistError::io(path, e))?;
    let info: PlaylistInfo =
        serde_json::from_slice(&bytes).map_err(|e| PlaylistError::malformed(path, e))?;
    debug!(playlist_id = %info.id, entries = info.len(), "descriptor loaded");
    Ok(info)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::playlist::{Entry, FormatVariant};
    use tempfile::TempDir;

    fn sample_info() -> PlaylistInfo {
        PlaylistInfo {
            id: "pl1".to_string(),
            entries: vec![Entry {
                id: "a".to_string(),
                playlist_index: 1,
                title: "One".to_string(),
                album: "Album".to_string(),
                artist: "Artist".to_string(),
                webpage_url: "https://example.com/watch?v=a".to_string(),
                formats: vec![FormatVariant {
                    format_id: "140".to_string(),
                    filesize: Some(100),
                }],
            }],
        }
    }

    #[test]
    fn test_descriptor_filename_pattern() {
        assert_eq!(descriptor_filename("PLxyz"), "PLxyz.info.json");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let info = sample_info();

        let path = save(&info, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("pl1.info.json"));

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, info);
    }

    #[test]
    fn test_save_overwrites_existing_descriptor() {
        let tmp = TempDir::new().unwrap();
        let mut info = sample_info();
        save(&info, tmp.path()).unwrap();

        info.entries.clear();
        let path = save(&info, tmp.path()).unwrap();

        let loaded = load(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_missing_file_returns_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load(&tmp.path().join("absent.info.json"));
        assert!(matches!(result, Err(PlaylistError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json_returns_malformed_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.info.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let result = load(&path);
        assert!(matches!(result, Err(PlaylistError::Malformed { .. })));
    }
}
