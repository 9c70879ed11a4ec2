//! Post-scan actions over the findings log.
//!
//! Both passes run after the scan has fully drained and re-read the log:
//! - [`space`]: total the size of every recorded duplicate still on disk
//! - [`delete`]: remove every recorded duplicate, permanently or to the trash
//!
//! ```no_run
//! use dupscan::actions::{reclaimable_space, replay_deletions, DeleteConfig};
//! use std::path::Path;
//!
//! let log = Path::new("duplicates.txt");
//! let report = reclaimable_space(log).unwrap();
//! println!("{:.2} MB reclaimable", report.megabytes());
//!
//! let result = replay_deletions(log, &DeleteConfig::default()).unwrap();
//! println!("{}", result.summary());
//! ```

pub mod delete;
pub mod space;

pub use delete::{
    delete_to_trash, permanent_delete, replay_deletions, DeleteConfig, DeleteError, DeleteResult,
    ReplayResult,
};
pub use space::{reclaimable_space, SpaceReport};
