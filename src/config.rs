//! Application configuration management.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`--config PATH`, or `config.toml` in the platform config dir)
//! 3. `DUPSCAN_*` environment variables (e.g. `DUPSCAN_WORKERS=16`)
//! 4. Command-line flags, applied by the caller
//!
//! ```toml
//! workers = 60
//! block_size = 512000
//! max_attempts = 300
//! retry_base_ms = 100
//! max_backoff_ms = 60000
//! log_file = "duplicates.txt"
//! follow_symlinks = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::duplicates::{FinderConfig, DEFAULT_WORKERS};
use crate::scanner::hasher::{
    DEFAULT_BASE_BACKOFF, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF,
};
use crate::scanner::{HasherConfig, WalkerConfig};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "DUPSCAN_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Concurrent hashing workers.
    pub workers: usize,
    /// Read block size in bytes.
    pub block_size: usize,
    /// Attempts per file before it is given up on.
    pub max_attempts: u32,
    /// Backoff before the first retry, in milliseconds.
    pub retry_base_ms: u64,
    /// Ceiling for a single backoff sleep, in milliseconds.
    pub max_backoff_ms: u64,
    /// Findings log, appended to on every run.
    pub log_file: PathBuf,
    /// Follow symbolic links while walking.
    pub follow_symlinks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            block_size: DEFAULT_BLOCK_SIZE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_base_ms: DEFAULT_BASE_BACKOFF.as_millis() as u64,
            max_backoff_ms: DEFAULT_MAX_BACKOFF.as_millis() as u64,
            log_file: PathBuf::from("duplicates.txt"),
            follow_symlinks: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults, a TOML file and the environment.
    ///
    /// With `path` set, that file is used (and must parse if present);
    /// otherwise the platform-specific default location is tried.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file or an environment override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::config_path().ok(),
        };
        Self::figment(file.as_deref())
            .extract()
            .context("Invalid configuration")
    }

    /// The figment used by [`Config::load`].
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(file) = file {
            log::debug!("Reading configuration from {}", file.display());
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Save the configuration as TOML at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default platform-specific configuration path.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "dupscan", "dupscan")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// Hasher settings derived from this configuration.
    #[must_use]
    pub fn hasher_config(&self) -> HasherConfig {
        HasherConfig::default()
            .with_block_size(self.block_size)
            .with_max_attempts(self.max_attempts)
            .with_base_backoff(Duration::from_millis(self.retry_base_ms))
            .with_max_backoff(Duration::from_millis(self.max_backoff_ms))
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self) -> FinderConfig {
        FinderConfig::default()
            .with_workers(self.workers)
            .with_hasher(self.hasher_config())
            .with_walker_config(
                WalkerConfig::default().with_follow_symlinks(self.follow_symlinks),
            )
    }
}
