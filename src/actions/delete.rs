//! Deletion replay: remove every duplicate named in a findings log.
//!
//! # Overview
//!
//! [`replay_deletions`] re-reads the log and deletes each recorded duplicate
//! that still exists. Originals are never named on a duplicate line, so they
//! are left untouched. Missing paths are reported and skipped, and a failed
//! deletion never stops the rest of the batch. Replaying the same log twice
//! is safe: the second pass finds every path already gone.
//!
//! Deletion is permanent by default, matching a plain `rm`; the system trash
//! can be used instead for recoverable removal.
//!
//! # Example
//!
//! ```no_run
//! use dupscan::actions::delete::{replay_deletions, DeleteConfig};
//! use std::path::Path;
//!
//! let result = replay_deletions(Path::new("duplicates.txt"), &DeleteConfig::default()).unwrap();
//! println!("{}", result.summary());
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::findings::{read_duplicate_paths, LogError};

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// Permanent delete operation failed.
    #[error("permanent delete failed for {path}: {message}")]
    PermanentDeleteFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::PermanentDeleteFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }

    fn from_metadata(path: &Path, e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: e,
            },
        }
    }
}

/// Result of a successful deletion operation.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Whether deletion was permanent (true) or to trash (false).
    pub permanent: bool,
}

impl DeleteResult {
    /// Create a new delete result.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, permanent: bool) -> Self {
        Self {
            path,
            size,
            permanent,
        }
    }
}

/// Outcome of replaying a findings log.
#[derive(Debug, Default)]
pub struct ReplayResult {
    /// Successfully deleted files.
    pub deleted: Vec<DeleteResult>,
    /// Logged duplicates that no longer exist.
    pub missing: Vec<PathBuf>,
    /// Failed deletions with their errors.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl ReplayResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn deleted_count(&self) -> usize {
        self.deleted.len()
    }

    /// Check if no deletion failed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Deleted {} file(s), {} already missing, {} failed, freed {}",
            self.deleted.len(),
            self.missing.len(),
            self.failures.len(),
            bytesize::ByteSize::b(self.bytes_freed)
        )
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone)]
pub struct DeleteConfig {
    /// Remove files outright instead of moving them to the system trash.
    pub permanent: bool,
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self { permanent: true }
    }
}

impl DeleteConfig {
    /// Create config for trash deletion.
    #[must_use]
    pub fn trash() -> Self {
        Self { permanent: false }
    }

    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self { permanent: true }
    }
}

/// Delete a single file to the system trash.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if its metadata cannot be read
/// - `TrashFailed` if the trash operation fails
pub fn delete_to_trash(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = fs::metadata(path)
        .map_err(|e| DeleteError::from_metadata(path, e))?
        .len();

    trash::delete(path).map_err(|e| {
        log::debug!("Trash operation failed for {}: {}", path.display(), e);
        DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    log::debug!("Moved to trash: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, false))
}

/// Permanently delete a single file.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if its metadata cannot be read
/// - `PermanentDeleteFailed` if the delete operation fails
pub fn permanent_delete(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = fs::metadata(path)
        .map_err(|e| DeleteError::from_metadata(path, e))?
        .len();

    fs::remove_file(path).map_err(|e| {
        log::debug!("Permanent delete failed for {}: {}", path.display(), e);
        if e.kind() == io::ErrorKind::NotFound {
            DeleteError::NotFound(path.to_path_buf())
        } else {
            DeleteError::PermanentDeleteFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    })?;

    log::debug!("Deleted file: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size, true))
}

/// Delete every duplicate recorded in the findings log at `log_path`.
///
/// # Errors
///
/// Returns [`LogError`] only if the log itself cannot be read. Per-file
/// problems are collected in the returned [`ReplayResult`].
pub fn replay_deletions(log_path: &Path, config: &DeleteConfig) -> Result<ReplayResult, LogError> {
    let paths = read_duplicate_paths(log_path)?;
    log::debug!(
        "Replaying {} recorded duplicates from {}",
        paths.len(),
        log_path.display()
    );

    let mut result = ReplayResult::default();
    for path in paths {
        if !path.exists() {
            log::debug!("File not found: {}", path.display());
            result.missing.push(path);
            continue;
        }

        let outcome = if config.permanent {
            permanent_delete(&path)
        } else {
            delete_to_trash(&path)
        };

        match outcome {
            Ok(del) => {
                result.bytes_freed += del.size;
                result.deleted.push(del);
            }
            Err(DeleteError::NotFound(path)) => {
                log::debug!("File not found: {}", path.display());
                result.missing.push(path);
            }
            Err(e) => {
                log::debug!("Error deleting file: {}. {}", path.display(), e);
                result.failures.push((path, e.to_string()));
            }
        }
    }

    log::debug!("{}", result.summary());

    Ok(result)
}
