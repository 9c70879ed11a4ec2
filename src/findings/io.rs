//! Writing and reading the findings log.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::data::{extract_duplicate_path, extract_original_path, DuplicateFinding};
use super::LogError;

/// Append-only findings log shared by all scan workers.
///
/// Each [`record`](ResultLog::record) call holds the file lock while it
/// writes both lines of a finding as a single buffer, so findings from
/// concurrent workers never interleave.
#[derive(Debug)]
pub struct ResultLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl ResultLog {
    /// Open (or create) the log at `path` in append mode.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Open`] if the file cannot be opened for appending.
    pub fn open(path: &Path) -> Result<Self, LogError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| LogError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        log::debug!("Opened findings log: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one finding.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnloggablePath`] without writing anything if a
    /// path cannot be stored as a single line, or [`LogError::Io`] if the
    /// write or flush fails. At most this one finding is left incomplete at
    /// the tail of the file.
    pub fn record(&self, finding: &DuplicateFinding) -> Result<(), LogError> {
        let lines = finding.to_log_lines()?;
        let mut file = self
            .file
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        file.write_all(lines.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|source| LogError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// All UTF-8 lines of the log. Lines that are not valid UTF-8 cannot name
/// a path this crate wrote, so they are skipped.
fn read_lines(path: &Path) -> Result<Vec<String>, LogError> {
    let file = File::open(path).map_err(|source| LogError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = Vec::new();
    for (number, line) in BufReader::new(file).split(b'\n').enumerate() {
        let mut line = line.map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        match String::from_utf8(line) {
            Ok(line) => lines.push(line),
            Err(_) => log::debug!(
                "Skipping non-UTF-8 line {} in {}",
                number + 1,
                path.display()
            ),
        }
    }
    Ok(lines)
}

/// Every duplicate path named in the log, in file order.
///
/// Lines that are not duplicate markers are ignored.
///
/// # Errors
///
/// Returns [`LogError`] if the log cannot be opened or read.
pub fn read_duplicate_paths(path: &Path) -> Result<Vec<PathBuf>, LogError> {
    Ok(read_lines(path)?
        .iter()
        .filter_map(|line| extract_duplicate_path(line))
        .collect())
}

/// Every complete finding in the log, in file order.
///
/// A duplicate line counts only when the next line is its `Original:` line;
/// a truncated finding at the tail of the log is dropped.
///
/// # Errors
///
/// Returns [`LogError`] if the log cannot be opened or read.
pub fn read_findings(path: &Path) -> Result<Vec<DuplicateFinding>, LogError> {
    let lines = read_lines(path)?;
    let mut findings = Vec::new();
    let mut iter = lines.iter().peekable();

    while let Some(line) = iter.next() {
        let Some(duplicate) = extract_duplicate_path(line) else {
            continue;
        };
        if let Some(original) = iter.peek().and_then(|next| extract_original_path(next)) {
            findings.push(DuplicateFinding::new(duplicate, original));
            iter.next();
        } else {
            log::debug!(
                "Incomplete finding in {} for {}",
                path.display(),
                duplicate.display()
            );
        }
    }

    Ok(findings)
}
