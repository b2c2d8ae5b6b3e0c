//! Playlist descriptor model and persistence.
//!
//! The descriptor is the resumable snapshot of playlist metadata: once
//! written to `{id}.info.json` it is the single source of truth for the
//! expected entry count and per-track metadata. Downloads and tagging both
//! reconcile against it rather than against live network state.
//!
//! # Architecture
//!
//! - [`PlaylistInfo`] / [`Entry`] / [`FormatVariant`] - the descriptor types
//! - [`store`] - write-once/read-many persistence of the descriptor file

mod error;
mod info;
pub mod store;

pub use error::PlaylistError;
pub use info::{Entry, FormatVariant, PlaylistInfo};

/// Format id of the m4a audio stream selected for every entry.
pub const M4A_FORMAT_ID: &str = "140";

/// Extension of completed audio files.
pub const AUDIO_EXT: &str = "m4a";
