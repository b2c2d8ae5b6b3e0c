//! Playlist resolution: turning a playlist URL into a descriptor.
//!
//! Resolution runs at most once per run, before any download starts; a
//! `--resume` run skips it entirely and loads the persisted descriptor
//! instead ([`crate::playlist::store::load`]).
//!
//! # Architecture
//!
//! - [`PlaylistResolver`] - Async trait the binary consumes
//! - [`YtDlpResolver`] - Production implementation wrapping the external
//!   extraction engine
//! - [`ResolveError`] - Fatal resolution failures (never retried)
//!
//! # Object Safety
//!
//! The trait uses `async_trait` to support dynamic dispatch via
//! `Box<dyn PlaylistResolver>`. Rust 2024 native async traits are not
//! object-safe, so `async_trait` is required for the seam.

mod error;
mod ytdlp;

pub use error::ResolveError;
pub use ytdlp::{DEFAULT_EXTRACTOR_BINARY, YtDlpResolver};

use async_trait::async_trait;

use crate::playlist::PlaylistInfo;

/// Trait for resolving a playlist URL into a [`PlaylistInfo`] descriptor.
#[async_trait]
pub trait PlaylistResolver: Send + Sync {
    /// Resolves `url` into a full descriptor (ids, metadata, formats).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on invalid input, engine failure, or
    /// malformed engine output. Resolution failures are fatal to the run
    /// and are not retried internally.
    async fn resolve(&self, url: &str) -> Result<PlaylistInfo, ResolveError>;
}
