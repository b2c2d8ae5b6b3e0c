//! Tag container writer over the lofty library.

use std::path::Path;

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{Accessor, Tag, TagExt};
use tracing::instrument;

use super::{TagError, TagWriter, TrackTags};

/// Writes tags through lofty, which maps them to the container's native
/// fields (MP4 ilst atoms for m4a files).
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyTagWriter;

impl LoftyTagWriter {
    /// Creates a writer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TagWriter for LoftyTagWriter {
    #[instrument(skip(self, tags), fields(path = %path.display()))]
    fn write(&self, path: &Path, tags: &TrackTags) -> Result<(), TagError> {
        let mut tagged_file = Probe::open(path)
            .map_err(|e| TagError::container(path, e))?
            .read()
            .map_err(|e| TagError::container(path, e))?;

        if tagged_file.primary_tag().is_none() {
            let tag_type = tagged_file.primary_tag_type();
            tagged_file.insert_tag(Tag::new(tag_type));
        }
        let Some(tag) = tagged_file.primary_tag_mut() else {
            return Err(TagError::MissingContainer {
                path: path.to_path_buf(),
            });
        };

        tag.set_title(tags.title.clone());
        tag.set_album(tags.album.clone());
        tag.set_artist(tags.artist.clone());
        tag.set_track(tags.track_number);
        tag.set_track_total(tags.track_total);

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| TagError::container(path, e))
    }
}
