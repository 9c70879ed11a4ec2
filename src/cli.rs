//! Command-line interface definitions for dupscan.
//!
//! # Example
//!
//! ```bash
//! # Scan the current directory and append findings to duplicates.txt
//! dupscan .
//!
//! # Scan, then delete every duplicate recorded in the log
//! dupscan ./photos --delete-duplicated
//!
//! # Fewer workers, custom log, verbose output
//! dupscan -v ./photos --workers 8 --log-file photos-dupes.txt
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Find byte-identical files in a directory tree.
///
/// Every duplicate is appended to a log file as a "Duplicate found" /
/// "Original" line pair. The log can then be used to total the reclaimable
/// space and, optionally, delete the duplicates.
#[derive(Debug, Parser)]
#[command(name = "dupscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to examine for duplicate files
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Delete duplicates recorded in the log after the scan
    #[arg(long)]
    pub delete_duplicated: bool,

    /// Move duplicates to the system trash instead of deleting them permanently
    #[arg(long, requires = "delete_duplicated")]
    pub trash: bool,

    /// Log file that findings are appended to [default: duplicates.txt]
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Number of concurrent hashing workers [default: 60]
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// Configuration file (TOML)
    #[arg(long, value_name = "FILE", env = "DUPSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hide the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
