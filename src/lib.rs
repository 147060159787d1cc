//! # rotdir
//!
//! Retains the most recent (or size-bounded) directories matching a naming
//! pattern under a base path and deletes the rest. Built for rotating
//! timestamped capture directories, such as one directory of recordings per
//! day, on a schedule.
//!
//! ## Overview
//!
//! A run expands a base path expression (which may contain glob wildcards)
//! into base directories. In each of them the immediate child directories
//! whose names fully match a regular expression are ordered by modification
//! time or name, then split by one of two criteria:
//!
//! - **Keep last K**: the `K` newest directories survive
//! - **Keep up to size**: the newest directories survive while their combined
//!   size fits the budget
//!
//! Everything else is deleted, best effort: unwritable directories are
//! skipped and entries that cannot be removed are logged without stopping the
//! run.
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: Glue from parsed arguments to a rotation run
//! - [`error`]: Error types with thiserror + miette
//! - [`rotation`]: Selection, retention policies, sizing and deletion
//! - [`logging`]: tracing subscriber setup
//!
//! ## Library Usage
//!
//! ```no_run
//! use rotdir::cli::Cli;
//! use rotdir::commands;
//!
//! let cli = Cli::builder()
//!     .path("/media/motion/*/*")
//!     .keep_last(7)
//!     .verbose(1)
//!     .build()?;
//!
//! let stats = commands::execute(&cli)?;
//! println!("removed {} directories", stats.removed());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Invalid arguments are returned as [`error::RotateError`] before any
//! filesystem work. Filesystem problems during a run are logged as warnings
//! and never abort it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod rotation;
