//! Directory walker implementation using jwalk for parallel traversal.
//!
//! # Overview
//!
//! The [`Walker`] enumerates every regular file below a root directory and
//! yields it as a [`DiscoveredFile`] (directory, filename) pair. Enumeration
//! order is deterministic within a directory but carries no meaning for
//! duplicate detection.
//!
//! Unreadable directories are logged and skipped. A root that does not exist
//! produces an empty walk rather than an error.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use super::{DiscoveredFile, WalkerConfig};

/// Directory walker for parallel file discovery.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` is one of the configured excluded files.
    ///
    /// Only canonicalizes when the file name matches an excluded one.
    fn is_excluded(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        if !self
            .config
            .exclude_files
            .iter()
            .any(|ex| ex.file_name() == Some(name))
        {
            return false;
        }
        path.canonicalize()
            .map(|canonical| self.config.exclude_files.contains(&canonical))
            .unwrap_or(false)
    }

    /// Walk the directory tree, yielding every regular file.
    ///
    /// Returns an empty iterator when the root does not exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupscan::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// let files: Vec<_> = walker.walk().collect();
    /// println!("Found {} files", files.len());
    /// ```
    pub fn walk(&self) -> Box<dyn Iterator<Item = DiscoveredFile> + Send + '_> {
        if !self.root.exists() {
            log::warn!(
                "Path does not exist, nothing to scan: {}",
                self.root.display()
            );
            return Box::new(std::iter::empty());
        }

        let walk_dir = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .skip_hidden(false)
            .process_read_dir(|_depth, _path, _read_dir_state, children| {
                // Sort children for deterministic output
                children.sort_by(|a, b| match (a, b) {
                    (Ok(a), Ok(b)) => a.file_name().cmp(b.file_name()),
                    (Ok(_), Err(_)) => std::cmp::Ordering::Less,
                    (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
                    (Err(_), Err(_)) => std::cmp::Ordering::Equal,
                });
            });

        Box::new(
            walk_dir
                .into_iter()
                .filter_map(move |entry_result| match entry_result {
                    Ok(entry) => {
                        let file_type = entry.file_type();
                        if file_type.is_dir() {
                            return None;
                        }

                        if file_type.is_symlink() && !self.config.follow_symlinks {
                            log::trace!("Skipping symlink: {}", entry.path().display());
                            return None;
                        }

                        let path = entry.path();
                        let is_file = if self.config.follow_symlinks {
                            std::fs::metadata(&path).map(|m| m.is_file())
                        } else {
                            Ok(file_type.is_file())
                        };

                        match is_file {
                            Ok(true) if self.is_excluded(&path) => {
                                log::debug!("Skipping excluded file: {}", path.display());
                                None
                            }
                            Ok(true) => Some(DiscoveredFile::new(
                                entry.parent_path().to_path_buf(),
                                entry.file_name().to_os_string(),
                            )),
                            Ok(false) => {
                                log::trace!("Skipping non-regular file: {}", path.display());
                                None
                            }
                            Err(e) => {
                                log::warn!("Cannot stat {}: {}", path.display(), e);
                                None
                            }
                        }
                    }
                    Err(e) => {
                        let path = e
                            .path()
                            .map_or_else(|| self.root.clone(), Path::to_path_buf);
                        log::warn!("Cannot read {}: {}", path.display(), e);
                        None
                    }
                }),
        )
    }
}
