//! Shared digest-to-original index.
//!
//! Every worker in a scan consults the same [`DuplicateIndex`]. The lookup
//! and the insert happen inside one critical section, so for any digest
//! exactly one caller becomes the original and every later caller is told
//! who that original is.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::scanner::Digest;

/// Mapping from content digest to the first path observed with it.
///
/// Entries are never overwritten or removed; the index lives for a single
/// scan and is dropped with it.
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    originals: Mutex<HashMap<Digest, PathBuf>>,
}

impl DuplicateIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically check and claim `digest`.
    ///
    /// Returns `None` when `path` became the original for `digest`, or the
    /// already-recorded original when `path` is a duplicate. In the latter
    /// case the index is left untouched.
    pub fn observe(&self, digest: Digest, path: &Path) -> Option<PathBuf> {
        match self.lock().entry(digest) {
            Entry::Occupied(original) => Some(original.get().clone()),
            Entry::Vacant(slot) => {
                slot.insert(path.to_path_buf());
                None
            }
        }
    }

    /// The original recorded for `digest`, if any.
    #[must_use]
    pub fn original_for(&self, digest: &Digest) -> Option<PathBuf> {
        self.lock().get(digest).cloned()
    }

    /// Number of distinct digests seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no digest has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A worker that panicked mid-insert cannot leave a half-written entry,
    // so a poisoned map is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<Digest, PathBuf>> {
        self.originals
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
