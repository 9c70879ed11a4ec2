//! Duplicate findings and their append-only log file.
//!
//! A scan records every duplicate it finds as two consecutive lines:
//!
//! ```text
//! Duplicate found: <duplicate-path>
//! Original: <original-path>
//! ```
//!
//! The log is opened in append mode and never truncated, so findings from
//! earlier runs stay in place. Space accounting and deletion replay re-read
//! the same file after the scan has finished.
//!
//! # Architecture
//!
//! * [`data`]: The [`DuplicateFinding`] record and the line format.
//! * [`io`]: The concurrent [`ResultLog`] writer and the log readers.

pub mod data;
pub mod io;

use std::path::PathBuf;

pub use data::{extract_duplicate_path, DuplicateFinding, DUPLICATE_MARKER, ORIGINAL_MARKER};
pub use io::{read_duplicate_paths, read_findings, ResultLog};

/// Errors that can occur while reading or writing the findings log.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    /// The log file could not be opened.
    #[error("Cannot open log file {path}: {source}")]
    Open {
        /// Path of the log file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The path cannot be written as one line and read back unchanged.
    #[error("Path cannot be recorded in the log: {}", .0.display())]
    UnloggablePath(PathBuf),

    /// Reading or writing the log failed.
    #[error("I/O error on log file {path}: {source}")]
    Io {
        /// Path of the log file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
