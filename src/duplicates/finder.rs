//! Duplicate finder: the scan coordinator.
//!
//! # Overview
//!
//! [`DuplicateFinder`] drives a whole scan:
//! 1. **Enumerate** - the [`Walker`] streams (directory, filename) pairs
//! 2. **Hash** - a bounded rayon pool hashes each file with the [`Hasher`]
//! 3. **Claim** - each digest is checked against the shared [`DuplicateIndex`]
//! 4. **Record** - duplicates are appended to the [`ResultLog`] as they are found
//!
//! Failures are per file. A file whose hash fails terminally is counted as
//! scanned and otherwise ignored; a failed log write is counted and the
//! finding is still reported in memory.
//!
//! # Example
//!
//! ```no_run
//! use dupscan::duplicates::{DuplicateFinder, FinderConfig};
//! use dupscan::findings::ResultLog;
//! use std::path::Path;
//!
//! let log = ResultLog::open(Path::new("duplicates.txt")).unwrap();
//! let finder = DuplicateFinder::new(FinderConfig::default().with_workers(16));
//! let summary = finder.find_duplicates(Path::new("."), &log).unwrap();
//!
//! println!("{} files, {} duplicates", summary.total_files, summary.duplicate_count());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::DuplicateIndex;
use crate::findings::{DuplicateFinding, ResultLog};
use crate::progress::ProgressCallback;
use crate::scanner::{DiscoveredFile, HashError, Hasher, HasherConfig, Walker, WalkerConfig};

/// Default number of concurrent hashing workers.
pub const DEFAULT_WORKERS: usize = 60;

/// Configuration for the duplicate finder.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of concurrent workers hashing files.
    pub workers: usize,
    /// Block size and retry budget for hashing.
    pub hasher: HasherConfig,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("workers", &self.workers)
            .field("hasher", &self.hasher)
            .field("walker_config", &self.walker_config)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            hasher: HasherConfig::default(),
            walker_config: WalkerConfig::default(),
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the number of concurrent workers (at least one).
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the hasher configuration.
    #[must_use]
    pub fn with_hasher(mut self, hasher: HasherConfig) -> Self {
        self.hasher = hasher;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }
}

/// Summary of a completed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Every file dispatched, including those that failed to hash
    pub total_files: usize,
    /// Duplicate paths, in the order they were found
    pub duplicates: Vec<PathBuf>,
    /// Findings, in the order they were found
    pub findings: Vec<DuplicateFinding>,
    /// Files skipped after a terminal hash failure
    pub hash_failures: Vec<HashError>,
    /// Findings that could not be written to the log
    pub log_failures: usize,
    /// Duration of the entire scan
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Number of duplicate files found.
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.duplicates.len()
    }

    /// Whether any duplicate was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The worker pool could not be started.
    #[error("Failed to start {workers} worker threads: {source}")]
    ThreadPool {
        /// Requested pool width
        workers: usize,
        /// The underlying rayon error
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

/// What happened to a single dispatched file.
#[derive(Debug)]
enum FileOutcome {
    Original,
    Duplicate {
        finding: DuplicateFinding,
        logged: bool,
    },
    Failed(HashError),
}

/// Duplicate finder that orchestrates hashing, claiming and logging.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let hasher = Hasher::with_config(config.hasher.clone());
        Self { config, hasher }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Scan every regular file below `root`.
    ///
    /// A missing root scans zero files.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::ThreadPool`] if the worker pool cannot start.
    pub fn find_duplicates(
        &self,
        root: &Path,
        results: &ResultLog,
    ) -> Result<ScanSummary, FinderError> {
        log::info!(
            "Scanning {} with {} workers",
            root.display(),
            self.config.workers
        );
        let walker = Walker::new(root, self.config.walker_config.clone());
        // jwalk's directory readers run on the global pool and must be
        // spawned outside the hashing pool.
        let files = walker.walk();
        self.run(files.par_bridge(), results)
    }

    /// Scan a pre-collected list of files.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::ThreadPool`] if the worker pool cannot start.
    pub fn find_duplicates_from_files(
        &self,
        files: Vec<DiscoveredFile>,
        results: &ResultLog,
    ) -> Result<ScanSummary, FinderError> {
        log::info!(
            "Checking {} files with {} workers",
            files.len(),
            self.config.workers
        );
        self.run(files.into_par_iter(), results)
    }

    fn run<I>(&self, files: I, results: &ResultLog) -> Result<ScanSummary, FinderError>
    where
        I: ParallelIterator<Item = DiscoveredFile>,
    {
        let start_time = Instant::now();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .thread_name(|i| format!("dupscan-worker-{i}"))
            .build()
            .map_err(|source| FinderError::ThreadPool {
                workers: self.config.workers,
                source,
            })?;

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_start();
        }

        let index = DuplicateIndex::new();
        let outcomes: Vec<FileOutcome> =
            pool.install(|| files.map(|file| self.process_file(&file, &index, results)).collect());

        let mut summary = ScanSummary {
            total_files: outcomes.len(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Original => {}
                FileOutcome::Duplicate { finding, logged } => {
                    if !logged {
                        summary.log_failures += 1;
                    }
                    summary.duplicates.push(finding.duplicate.clone());
                    summary.findings.push(finding);
                }
                FileOutcome::Failed(e) => summary.hash_failures.push(e),
            }
        }
        summary.scan_duration = start_time.elapsed();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_end(summary.total_files, summary.duplicate_count());
        }

        log::info!(
            "Scan complete: {} files, {} duplicates, {} unreadable, {} distinct contents in {:.2?}",
            summary.total_files,
            summary.duplicate_count(),
            summary.hash_failures.len(),
            index.len(),
            summary.scan_duration
        );

        Ok(summary)
    }

    /// Hash one file and claim its digest. Runs on a pool worker.
    fn process_file(
        &self,
        file: &DiscoveredFile,
        index: &DuplicateIndex,
        results: &ResultLog,
    ) -> FileOutcome {
        let path = file.path();

        let outcome = match self.hasher.hash_file(&path) {
            Err(e) => {
                log::debug!("Skipping {}: {}", path.display(), e);
                FileOutcome::Failed(e)
            }
            Ok(digest) => match index.observe(digest, &path) {
                None => {
                    log::trace!("Original: {}", path.display());
                    FileOutcome::Original
                }
                Some(original) => {
                    let finding = DuplicateFinding::new(path.clone(), original);
                    log::debug!("Duplicate found: {}", finding);
                    let logged = match results.record(&finding) {
                        Ok(()) => true,
                        Err(e) => {
                            log::error!("Failed to record {}: {}", finding, e);
                            false
                        }
                    };
                    FileOutcome::Duplicate { finding, logged }
                }
            },
        };

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_file_done(
                &path.to_string_lossy(),
                matches!(outcome, FileOutcome::Duplicate { .. }),
            );
        }

        outcome
    }
}
