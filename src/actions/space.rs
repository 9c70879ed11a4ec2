//! Space accounting over a findings log.
//!
//! Sums the current on-disk size of every duplicate named in the log. Paths
//! that no longer exist are reported and skipped; files may legitimately have
//! been deleted since they were logged.

use std::fs;
use std::path::{Path, PathBuf};

use bytesize::ByteSize;

use crate::findings::{read_duplicate_paths, LogError};

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Total size of the duplicates still present on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceReport {
    /// Sum of the sizes of every counted path, in bytes
    pub total_bytes: u64,
    /// Number of log entries whose file still exists
    pub counted: usize,
    /// Logged duplicates that no longer exist
    pub missing: Vec<PathBuf>,
}

impl SpaceReport {
    /// Total size in megabytes (1 MB = 1024 * 1024 bytes).
    #[must_use]
    pub fn megabytes(&self) -> f64 {
        self.total_bytes as f64 / BYTES_PER_MEGABYTE
    }

    /// Total size as a human-readable string.
    #[must_use]
    pub fn display(&self) -> String {
        ByteSize::b(self.total_bytes).to_string()
    }
}

/// Total the sizes of the duplicates recorded in the log at `log_path`.
///
/// Every duplicate line counts, so a path logged by two separate runs is
/// counted twice.
///
/// # Errors
///
/// Returns [`LogError`] if the log cannot be read.
pub fn reclaimable_space(log_path: &Path) -> Result<SpaceReport, LogError> {
    let mut report = SpaceReport::default();

    for path in read_duplicate_paths(log_path)? {
        match fs::metadata(&path) {
            Ok(metadata) => {
                report.total_bytes += metadata.len();
                report.counted += 1;
            }
            Err(e) => {
                log::warn!("File not found: {} ({})", path.display(), e);
                report.missing.push(path);
            }
        }
    }

    log::debug!(
        "Accounted {} duplicates ({}), {} missing",
        report.counted,
        report.display(),
        report.missing.len()
    );

    Ok(report)
}
