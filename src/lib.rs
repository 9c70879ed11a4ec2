//! dupscan - Concurrent Duplicate File Scanner
//!
//! Scans a directory tree, hashes every regular file with BLAKE3 on a bounded
//! worker pool, and appends each file whose content matches an earlier-seen
//! file to a findings log. The log is then used to total the reclaimable
//! space and, optionally, to delete the recorded duplicates.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod findings;
pub mod logging;
pub mod progress;
pub mod scanner;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::actions::{reclaimable_space, replay_deletions, DeleteConfig};
use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, ScanSummary};
use crate::error::ExitCode;
use crate::findings::ResultLog;
use crate::progress::Progress;

/// Run a full scan as described by the parsed command line.
///
/// Prints the summary to stdout: files scanned, duplicates found, the space
/// they occupy, and the outcome of the optional deletion pass.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the log cannot be
/// opened or read back, or the worker pool cannot start. Per-file failures
/// are reported and never end the run.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    if let Some(ref log_file) = cli.log_file {
        config.log_file = log_file.clone();
    }
    log::debug!("Effective configuration: {:?}", config);

    let results = ResultLog::open(&config.log_file)?;

    let mut finder_config = config.finder_config();
    finder_config.walker_config = finder_config
        .walker_config
        .with_excluded_file(results.path());
    if !cli.no_progress && !cli.quiet {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new()));
    }

    println!("Walking dirs..");
    let summary = DuplicateFinder::new(finder_config)
        .find_duplicates(&cli.path, &results)
        .context("Scan failed")?;
    drop(results);

    print_summary(&summary);

    let space = reclaimable_space(&config.log_file)?;
    println!(
        "Total space used by the files: {:.2} Megabytes",
        space.megabytes()
    );

    if cli.delete_duplicated {
        let delete_config = if cli.trash {
            DeleteConfig::trash()
        } else {
            DeleteConfig::permanent()
        };
        let replay = replay_deletions(&config.log_file, &delete_config)?;

        for deleted in &replay.deleted {
            println!("Deleted file: {}", deleted.path.display());
        }
        for missing in &replay.missing {
            println!("File not found: {}", missing.display());
        }
        for (path, error) in &replay.failures {
            println!("Error deleting file: {}. {}", path.display(), error);
        }
        println!("{}", replay.summary());
    }

    Ok(ExitCode::Success)
}

fn print_summary(summary: &ScanSummary) {
    if summary.has_duplicates() {
        println!(
            "Duplicates found. Total files scanned: {}, Total duplicates: {}.",
            summary.total_files,
            summary.duplicate_count()
        );
        println!("Duplicate files:");
        for path in &summary.duplicates {
            println!("{}", path.display());
        }
    } else {
        println!(
            "No duplicates found. Total files scanned: {}.",
            summary.total_files
        );
    }

    if !summary.hash_failures.is_empty() {
        println!(
            "Skipped {} unreadable file(s)",
            summary.hash_failures.len()
        );
    }
    if summary.log_failures > 0 {
        println!(
            "Warning: {} finding(s) could not be written to the log",
            summary.log_failures
        );
    }
}
