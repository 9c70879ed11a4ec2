//! The duplicate finding record and its two-line text form.

use std::fmt;
use std::path::{Path, PathBuf};

use super::LogError;

/// Marker that starts the first line of every finding.
pub const DUPLICATE_MARKER: &str = "Duplicate found";

/// Marker that starts the second line of every finding.
pub const ORIGINAL_MARKER: &str = "Original";

/// Marker used by logs whose paths were recorded relative to `.`.
const RELATIVE_MARKER: &str = "./";

/// A file whose content matched an earlier-seen original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateFinding {
    /// Path of the duplicate file
    pub duplicate: PathBuf,
    /// Path of the first file seen with the same content
    pub original: PathBuf,
}

impl DuplicateFinding {
    /// Create a new finding.
    #[must_use]
    pub fn new(duplicate: impl Into<PathBuf>, original: impl Into<PathBuf>) -> Self {
        Self {
            duplicate: duplicate.into(),
            original: original.into(),
        }
    }

    /// Both log lines of this finding, newline-terminated.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnloggablePath`] if either path is not valid
    /// UTF-8 or contains a line break. Such a path could not be read back
    /// as the same file, or would split the record.
    pub fn to_log_lines(&self) -> Result<String, LogError> {
        Ok(format!(
            "{DUPLICATE_MARKER}: {}\n{ORIGINAL_MARKER}: {}\n",
            log_field(&self.duplicate)?,
            log_field(&self.original)?
        ))
    }
}

fn log_field(path: &Path) -> Result<&str, LogError> {
    path.to_str()
        .filter(|s| !s.contains(['\n', '\r']))
        .ok_or_else(|| LogError::UnloggablePath(path.to_path_buf()))
}

impl fmt::Display for DuplicateFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (duplicate of {})",
            self.duplicate.display(),
            self.original.display()
        )
    }
}

/// Extract the duplicate path from one log line.
///
/// Lines that do not contain [`DUPLICATE_MARKER`] yield `None`, and so do
/// `Original:` lines, whose path may itself contain the marker. The path is
/// the text following `"Duplicate found: "`. When the marker appears without
/// that exact prefix, the path is taken from the first `"./"` instead.
#[must_use]
pub fn extract_duplicate_path(line: &str) -> Option<PathBuf> {
    if extract_original_path(line).is_some() {
        return None;
    }
    let at = line.find(DUPLICATE_MARKER)?;
    let rest = &line[at + DUPLICATE_MARKER.len()..];

    let path = match rest.strip_prefix(": ") {
        Some(path) => path,
        None => {
            let start = line.find(RELATIVE_MARKER)?;
            &line[start..]
        }
    };

    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Extract the original path from an `Original: <path>` line.
pub(crate) fn extract_original_path(line: &str) -> Option<&Path> {
    let path = line.strip_prefix(ORIGINAL_MARKER)?.strip_prefix(": ")?;
    if path.is_empty() {
        None
    } else {
        Some(Path::new(path))
    }
}
