//! Rotation of dated directories.
//!
//! For every base directory a path expression expands to, the directories
//! whose names match a pattern are ordered and split into the ones to keep
//! and the ones to delete:
//!
//! - Count-based: keep the `k` newest directories
//! - Size-based: keep the newest directories whose combined size fits a budget
//!
//! Deletion is best effort. Unwritable directories are skipped and individual
//! entries that cannot be removed are logged without stopping the run.
//!
//! # Example
//!
//! ```no_run
//! use rotdir::rotation::{Rotation, SortKey, parse_size};
//!
//! let rotation = Rotation::builder()
//!     .path("/media/motion/*/*")
//!     .pattern(r"\d{8}")
//!     .sort_key(SortKey::ModificationTime)
//!     .max_size(parse_size("350G")?)
//!     .build()?;
//!
//! let stats = rotation.run();
//! println!("removed {} directories", stats.removed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod policy;
mod remove;
mod select;
mod size;
#[cfg(test)]
mod tests;
mod usage;

pub use config::{BaseSummary, DEFAULT_PATTERN, Rotation, RotationBuilder, RotationStats};
pub use policy::{
    RetentionCriterion, RetentionOutcome, SortKey, keep_last, keep_up_to_size, sort_newest_first,
    sort_oldest_first,
};
pub use remove::{RemovalReport, remove_directory};
pub use select::{CandidateDirectory, compile_name_pattern, select_directories};
pub use size::{format_size, parse_size};
pub use usage::calculate_directory_size;
