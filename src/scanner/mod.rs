//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Parallel directory walking using jwalk
//! - Streaming content hashing with BLAKE3 and retry/backoff
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: Block-streamed BLAKE3 hashing with bounded retries
//!
//! # Example
//!
//! ```no_run
//! use dupscan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for file in walker.walk() {
//!     println!("{}", file.path().display());
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

pub use hasher::{digest_to_hex, hex_to_digest, Digest, Hasher, HasherConfig};
pub use walker::Walker;

/// A file produced by directory enumeration.
///
/// Kept as the (directory, filename) pair the walker discovered; the full
/// path is only built when a worker picks the file up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Directory containing the file
    pub dir: PathBuf,
    /// File name within `dir`
    pub name: OsString,
}

impl DiscoveredFile {
    /// Create a new discovered file from its directory and name.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<OsString>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Split a full path into a discovered file.
    ///
    /// Paths without a file name (such as `/` or `..`) yield `None`.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_os_string();
        let dir = path.parent().map(PathBuf::from).unwrap_or_default();
        Some(Self { dir, name })
    }

    /// Full path to the file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    /// Warning: May cause infinite loops with symlink cycles.
    pub follow_symlinks: bool,

    /// Files never yielded, such as the findings log itself.
    /// Compared after canonicalization.
    pub exclude_files: Vec<PathBuf>,
}

impl WalkerConfig {
    /// Set whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Exclude a file from the walk.
    ///
    /// Paths that cannot be canonicalized (because they do not exist yet)
    /// are kept as given.
    #[must_use]
    pub fn with_excluded_file(mut self, path: &std::path::Path) -> Self {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.exclude_files.push(path);
        self
    }
}

/// Errors that can occur during file hashing.
///
/// I/O sources are wrapped in `Arc` so errors can be cloned into summaries.
#[derive(thiserror::Error, Debug, Clone)]
pub enum HashError {
    /// The file disappeared before it could be read.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Every attempt in the retry budget failed.
    #[error("Failed to read {path} after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Path that could not be hashed
        path: PathBuf,
        /// Number of attempts made
        attempts: u32,
        /// The error from the final attempt
        #[source]
        source: Arc<std::io::Error>,
    },
}

impl HashError {
    /// Path of the file that failed to hash.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound(path) | Self::RetriesExhausted { path, .. } => path,
        }
    }
}
