//! Directory scanning: the on-disk ground truth of download completion.

use std::path::Path;

use tracing::debug;

use super::SchedulerError;
use crate::fetch::filename::PART_SUFFIX;

/// Counts of incomplete and completed artifacts in a playlist directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Files still carrying the in-progress suffix.
    pub part_files: usize,
    /// Files with the target audio extension.
    pub completed_files: usize,
}

impl ScanReport {
    /// Whether the completion invariant holds for `expected` entries:
    /// no partial artifacts and at least `expected` completed files.
    #[must_use]
    pub fn is_complete(&self, expected: usize) -> bool {
        self.part_files == 0 && self.completed_files >= expected
    }
}

/// Scans `dir` for `.part` artifacts and completed `.{audio_ext}` files.
///
/// Subdirectories and unrelated files are ignored. A `x.{audio_ext}.part`
/// file counts only as partial: the suffix check runs first.
///
/// # Errors
///
/// Returns [`SchedulerError::Scan`] if the directory cannot be read.
pub fn scan_dir(dir: &Path, audio_ext: &str) -> Result<ScanReport, SchedulerError> {
    let mut part_files = 0;
    let mut completed_files = 0;

    let entries = std::fs::read_dir(dir).map_err(|e| SchedulerError::scan(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| SchedulerError::scan(dir, e))?;
        if !entry.file_type().map_err(|e| SchedulerError::scan(dir, e))?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.ends_with(PART_SUFFIX) {
            part_files += 1;
        } else if Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(audio_ext))
        {
            completed_files += 1;
        }
    }

    debug!(
        dir = %dir.display(),
        part_files,
        completed_files,
        "directory scanned"
    );
    Ok(ScanReport {
        part_files,
        completed_files,
    })
}
