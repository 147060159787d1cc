//! Error types for rotdir.
//!
//! Errors are defined with `thiserror` and carry `miette` diagnostics so the
//! CLI can render them with codes and help text.
//!
//! # Error Handling Strategy
//!
//! Only argument validation is fatal. [`RotateError::NotFound`],
//! [`RotateError::SizeComputation`] and [`RotateError::Deletion`] are built
//! and logged by the rotation pipeline, then downgraded to a skip so one bad
//! directory never stops the batch.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rotdir::error::{Result, RotateError};
//!
//! fn check_base(path: &Path) -> Result<()> {
//!     if !path.is_dir() {
//!         return Err(RotateError::NotFound(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in rotdir operations
#[derive(Error, Debug, Diagnostic)]
pub enum RotateError {
    /// Invalid size specification for --max_size.
    ///
    /// Raised when parsing strings like "500M" or "2G" fails. Units are
    /// decimal: K = 10^3, M = 10^6, G = 10^9, T = 10^12.
    #[error("Invalid size '{0}': must be an integer with an optional suffix [K, M, G, T]")]
    #[diagnostic(
        code(rotdir::args::invalid_size),
        help("Specify a size as raw bytes or with a suffix, e.g. '1024', '500M', '2 G'")
    )]
    InvalidSizeFormat(
        /// The rejected input
        String,
    ),

    /// The --pattern value is not a valid regular expression.
    #[error("Invalid directory name pattern '{pattern}'")]
    #[diagnostic(
        code(rotdir::args::invalid_pattern),
        help("The pattern must be a regular expression matched against the whole name")
    )]
    InvalidPattern {
        /// The pattern as supplied
        pattern: String,
        /// The underlying regex compilation error
        #[source]
        source: regex::Error,
    },

    /// The --path value is not a valid glob expression.
    #[error("Invalid path expression '{expression}'")]
    #[diagnostic(
        code(rotdir::args::invalid_path),
        help("Shell glob syntax: '*', '?' and '[abc]'; '**' matches a single level")
    )]
    InvalidPathExpression {
        /// The expression as supplied
        expression: String,
        /// The underlying glob pattern error
        #[source]
        source: glob::PatternError,
    },

    /// Contradictory or missing configuration.
    ///
    /// Raised when neither or both retention criteria are supplied, or a
    /// required builder field is absent.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(rotdir::config::error),
        help("Pass exactly one of --keep_last or --max_size together with --path")
    )]
    ConfigError(
        /// Description of the configuration problem
        String,
    ),

    /// Base directory is missing or is not a directory.
    #[error("Base directory '{0}' does not exist or is not a directory")]
    #[diagnostic(code(rotdir::fs::not_found))]
    NotFound(
        /// The base directory that was looked up
        PathBuf,
    ),

    /// Walking a directory tree to measure its size failed part way.
    #[error("Failed to compute size of '{path}'")]
    #[diagnostic(code(rotdir::fs::size_computation))]
    SizeComputation {
        /// The entry that could not be read
        path: PathBuf,
        /// The underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// A single entry could not be removed while deleting a directory tree.
    #[error("Failed to remove '{path}'")]
    #[diagnostic(code(rotdir::fs::deletion))]
    Deletion {
        /// The entry that could not be removed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File system I/O error.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(rotdir::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RotateError>;
