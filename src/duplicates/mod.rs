//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - The shared digest index that elects one original per content
//! - The scan coordinator that fans files out to a bounded worker pool

pub mod finder;
pub mod index;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary, DEFAULT_WORKERS};
pub use index::DuplicateIndex;
