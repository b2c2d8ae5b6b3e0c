//! The deterministic download filename contract: `{id}.{title}.{ext}`.
//!
//! The entry id before the first `.` is the join key the tagging pass uses
//! to match a file back to its descriptor entry; titles may themselves
//! contain dots, so only the first separator is significant.

use crate::playlist::Entry;

/// Output template handed to the download engine; must stay in sync with
/// [`expected_filename`].
pub const OUTPUT_TEMPLATE: &str = "%(id)s.%(title)s.%(ext)s";

/// Suffix the download engine appends to in-progress artifacts.
pub const PART_SUFFIX: &str = ".part";

/// Returns the final filename the engine will produce for `entry`.
#[must_use]
pub fn expected_filename(entry: &Entry, ext: &str) -> String {
    format!("{}.{}.{ext}", entry.id, sanitize_title(&entry.title))
}

/// Extracts the embedded entry id from a downloaded filename.
///
/// Returns `None` for names with no separator or an empty id segment.
#[must_use]
pub fn entry_id_from_filename(name: &str) -> Option<&str> {
    let (id, _) = name.split_once('.')?;
    (!id.is_empty()).then_some(id)
}

/// Maps path-hostile characters in a title the way the download engine
/// does when expanding its output template.
fn sanitize_title(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        "_".to_string()
    } else {
        sanitized
    }
}
