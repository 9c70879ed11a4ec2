//! BLAKE3 file hasher with streaming reads and retry/backoff.
//!
//! # Overview
//!
//! [`Hasher::hash_file`] reads a file in fixed-size blocks and feeds each
//! block into an incremental BLAKE3 state. Transient I/O failures (a file
//! locked by another process, a permission race) are retried with
//! exponential backoff. When the retry budget is spent the file is reported
//! as a terminal [`HashError`] and the caller skips it.
//!
//! The hasher touches no shared state, so backoff sleeps only ever occupy
//! the worker that is hashing the stalled file.
//!
//! # Example
//!
//! ```no_run
//! use dupscan::scanner::{digest_to_hex, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let digest = hasher.hash_file(Path::new("photo.jpg")).unwrap();
//! println!("{}", digest_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::HashError;

/// Content digest of a file (BLAKE3, 256 bits).
pub type Digest = [u8; 32];

/// Default read block size in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 512_000;

/// Default number of attempts before a file is given up on.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 300;

/// Default backoff before the first retry.
pub const DEFAULT_BASE_BACKOFF: Duration = Duration::from_millis(100);

/// Default ceiling for a single backoff sleep.
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Tuning for block size and the retry budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasherConfig {
    /// Size of each read in bytes.
    pub block_size: usize,
    /// Total attempts per file, including the first one.
    pub max_attempts: u32,
    /// Sleep before the first retry; doubles on every further retry.
    pub base_backoff: Duration,
    /// Upper bound for a single sleep.
    pub max_backoff: Duration,
}

impl Default for HasherConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: DEFAULT_BASE_BACKOFF,
            max_backoff: DEFAULT_MAX_BACKOFF,
        }
    }
}

impl HasherConfig {
    /// Set the read block size (at least one byte).
    #[must_use]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    /// Set the total number of attempts (at least one).
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the backoff before the first retry.
    #[must_use]
    pub fn with_base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Set the ceiling for a single backoff sleep.
    #[must_use]
    pub fn with_max_backoff(mut self, backoff: Duration) -> Self {
        self.max_backoff = backoff;
        self
    }

    /// Sleep that follows the failed attempt number `attempt` (0-based).
    ///
    /// `base * 2^attempt`, saturating and clamped to `max_backoff`.
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_backoff
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
            .min(self.max_backoff)
    }
}

/// Streaming file hasher.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    config: HasherConfig,
}

impl Hasher {
    /// Create a hasher with the default block size and retry budget.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with a custom configuration.
    #[must_use]
    pub fn with_config(config: HasherConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &HasherConfig {
        &self.config
    }

    /// Hash the full content of a file, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`HashError::NotFound`] as soon as the file is found to be missing
    /// - [`HashError::RetriesExhausted`] once every attempt has failed
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match self.hash_once(path) {
                Ok(digest) => {
                    if attempt > 0 {
                        log::debug!(
                            "Hashed {} after {} retries",
                            path.display(),
                            attempt
                        );
                    }
                    return Ok(digest);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::warn!("File vanished before hashing: {}", path.display());
                    return Err(HashError::NotFound(path.to_path_buf()));
                }
                Err(e) if attempt + 1 < attempts => {
                    let delay = self.config.backoff_for(attempt);
                    log::warn!(
                        "Encountered error reading {}: {}. Retrying in {:?} ({}/{})",
                        path.display(),
                        e,
                        delay,
                        attempt + 1,
                        attempts
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => {
                    log::error!(
                        "Failed to read file: {} after {} attempts. Error: {}",
                        path.display(),
                        attempts,
                        e
                    );
                    return Err(HashError::RetriesExhausted {
                        path: path.to_path_buf(),
                        attempts,
                        source: Arc::new(e),
                    });
                }
            }
        }
    }

    /// One open-and-read pass over the file.
    fn hash_once(&self, path: &Path) -> io::Result<Digest> {
        let mut file = File::open(path)?;
        let mut state = blake3::Hasher::new();
        let mut buffer = vec![0u8; self.config.block_size.max(1)];

        loop {
            let n = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            state.update(&buffer[..n]);
        }

        Ok(*state.finalize().as_bytes())
    }
}

/// Render a digest as lowercase hex.
#[must_use]
pub fn digest_to_hex(digest: &Digest) -> String {
    blake3::Hash::from_bytes(*digest).to_hex().to_string()
}

/// Parse a 64-character hex string back into a digest.
#[must_use]
pub fn hex_to_digest(hex: &str) -> Option<Digest> {
    blake3::Hash::from_hex(hex).ok().map(|h| *h.as_bytes())
}
