//! Descriptor types deserialized from the extraction engine's JSON output.

use serde::{Deserialize, Serialize};

/// A playlist descriptor: stable id plus ordered entries.
///
/// Deserialized directly from the extraction engine's JSON document (unknown
/// fields are ignored) and persisted verbatim as `{id}.info.json` so a run
/// can be resumed without re-resolving the playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistInfo {
    /// Stable playlist id; names the descriptor file and the download directory.
    pub id: String,
    /// Entries in playlist order.
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl PlaylistInfo {
    /// Returns the number of entries in the playlist.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the playlist has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One playlist item with stable id, ordering index, and display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable entry id; the join key between descriptor and downloaded files.
    pub id: String,
    /// 1-based position in the playlist; defines final track numbering.
    pub playlist_index: u32,
    /// Display title; also embedded in the downloaded filename.
    #[serde(default)]
    pub title: String,
    /// Album tag value. Empty when the extractor did not report one.
    #[serde(default)]
    pub album: String,
    /// Artist tag value. Empty when the extractor did not report one.
    #[serde(default)]
    pub artist: String,
    /// Source page URL handed to the download engine.
    pub webpage_url: String,
    /// Format variants reported by the extractor.
    #[serde(default)]
    pub formats: Vec<FormatVariant>,
}

impl Entry {
    /// Returns the variant matching `format_id`, if the entry offers one.
    #[must_use]
    pub fn format_variant(&self, format_id: &str) -> Option<&FormatVariant> {
        self.formats.iter().find(|f| f.format_id == format_id)
    }
}

/// One downloadable format of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatVariant {
    /// Extractor-assigned format id (e.g. `"140"` for m4a audio).
    pub format_id: String,
    /// Advisory size in bytes; absent in some extractor outputs.
    #[serde(default)]
    pub filesize: Option<u64>,
}
