//! Progress reporting utilities using indicatif.
//!
//! The scan consumes a stream of files whose length is not known up front,
//! so [`Progress`] shows a spinner with a running file count and duplicate
//! tally instead of a bounded bar.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the scan.
///
/// Called concurrently from every worker, hence `Send + Sync`.
pub trait ProgressCallback: Send + Sync {
    /// Called once before the first file is dispatched.
    fn on_scan_start(&self);

    /// Called after each file has been processed.
    ///
    /// # Arguments
    ///
    /// * `path` - Path that was processed
    /// * `is_duplicate` - Whether the file was recorded as a duplicate
    fn on_file_done(&self, path: &str, is_duplicate: bool);

    /// Called once every dispatched file has completed.
    fn on_scan_end(&self, total_files: usize, duplicates: usize);
}

/// Spinner-based progress reporter.
///
/// Nothing is drawn until [`ProgressCallback::on_scan_start`]; callers that
/// want a silent scan simply install no callback.
#[derive(Default)]
pub struct Progress {
    bar: Mutex<Option<ProgressBar>>,
    duplicates: AtomicU64,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Examples
    ///
    /// ```
    /// use dupscan::progress::Progress;
    ///
    /// let progress = Progress::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {pos} files, {prefix} duplicates {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self
            .bar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(ref pb) = *guard {
            f(pb);
        }
    }
}

impl ProgressCallback for Progress {
    fn on_scan_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::style());
        pb.set_prefix("0");
        pb.enable_steady_tick(Duration::from_millis(100));
        *self
            .bar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(pb);
    }

    fn on_file_done(&self, path: &str, is_duplicate: bool) {
        let duplicates = if is_duplicate {
            self.duplicates.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.duplicates.load(Ordering::Relaxed)
        };

        self.with_bar(|pb| {
            pb.inc(1);
            pb.set_prefix(duplicates.to_string());
            pb.set_message(truncate_path(path, 40));
        });
    }

    fn on_scan_end(&self, total_files: usize, duplicates: usize) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
        {
            pb.set_position(total_files as u64);
            pb.set_prefix(duplicates.to_string());
            pb.finish_with_message("scan complete");
        }
    }
}

/// Truncate a path for display next to the spinner.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.chars().count() <= max_len {
        return path.to_string();
    }

    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let name_len = file_name.chars().count();
    if name_len + 4 > max_len {
        let tail: String = file_name
            .chars()
            .skip(name_len.saturating_sub(max_len.saturating_sub(3)))
            .collect();
        return format!("...{tail}");
    }

    format!(".../{file_name}")
}
