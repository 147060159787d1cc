//! Command-line interface definitions for rotdir.
//!
//! The CLI is defined with clap's derive API. Exactly one retention criterion
//! (`--keep_last` or `--max_size`) is required; clap rejects both or neither
//! before any filesystem work starts.
//!
//! # Example
//!
//! ```no_run
//! use rotdir::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! println!("rotating {}", cli.path());
//! ```

use clap::{ArgGroup, Parser, ValueEnum};

use crate::error::{Result, RotateError};
use crate::rotation::{DEFAULT_PATTERN, SortKey, parse_size};

/// Remove the oldest directories whose names match a pattern.
#[derive(Debug, Parser)]
#[command(
    name = "rotdir",
    bin_name = "rotdir",
    author,
    version,
    about = "Remove oldest directories with specified pattern in name",
    long_about = None,
    group(ArgGroup::new("criterion").required(true).args(["keep_last", "max_size"]))
)]
pub struct Cli {
    /// Root directory to search and remove within; accepts wildcards
    #[arg(short = 'p', long, value_name = "BASE_DIR", env = "ROTDIR_PATH")]
    path: String,

    /// Regexp that directory names must fully match to be rotated
    #[arg(short = 'r', long, default_value = DEFAULT_PATTERN, env = "ROTDIR_PATTERN")]
    pattern: String,

    /// How many newest directories to keep
    #[arg(
        short = 'k',
        long = "keep_last",
        value_name = "ITEMS_TO_KEEP",
        allow_negative_numbers = true,
        env = "ROTDIR_KEEP_LAST"
    )]
    keep_last: Option<i64>,

    /// Keep newest directories with total size up to this amount (e.g. "500M", "2G")
    #[arg(
        short = 'm',
        long = "max_size",
        value_name = "SIZE",
        value_parser = parse_size,
        env = "ROTDIR_MAX_SIZE"
    )]
    max_size: Option<u64>,

    /// Attribute directories are ordered by before deleting
    #[arg(
        short = 's',
        long = "sort_by",
        value_enum,
        default_value_t = SortBy::Time,
        env = "ROTDIR_SORT_BY"
    )]
    sort_by: SortBy,

    /// Output additional messages, use -vv for more details
    #[arg(short, long, action = clap::ArgAction::Count, env = "ROTDIR_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors
    #[arg(short, long, conflicts_with = "verbose", env = "ROTDIR_QUIET")]
    quiet: bool,
}

/// Values accepted by `--sort_by`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortBy {
    /// Modification time of the directory
    Time,
    /// Directory name
    Name,
}

impl From<SortBy> for SortKey {
    fn from(sort_by: SortBy) -> Self {
        match sort_by {
            SortBy::Time => SortKey::ModificationTime,
            SortBy::Name => SortKey::Name,
        }
    }
}

impl Cli {
    /// Parse the process arguments, exiting with usage on invalid input
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the base path expression
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the name pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Get the requested keep count, as typed
    pub fn keep_last(&self) -> Option<i64> {
        self.keep_last
    }

    /// Get the size budget in bytes
    pub fn max_size(&self) -> Option<u64> {
        self.max_size
    }

    /// Get the sort attribute
    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Get the verbose level
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Check if quiet mode is enabled
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    path: Option<String>,
    pattern: Option<String>,
    keep_last: Option<i64>,
    max_size: Option<String>,
    sort_by: Option<SortBy>,
    verbose: u8,
    quiet: bool,
}

impl CliBuilder {
    /// Set the base path expression
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the name pattern
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the keep count
    pub fn keep_last(mut self, count: i64) -> Self {
        self.keep_last = Some(count);
        self
    }

    /// Set the size budget, using the `--max_size` grammar
    pub fn max_size(mut self, size: impl Into<String>) -> Self {
        self.max_size = Some(size.into());
        self
    }

    /// Set the sort attribute
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    /// Set the verbose level
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        let path = self
            .path
            .ok_or_else(|| RotateError::ConfigError("path is required".to_string()))?;
        let max_size = self.max_size.as_deref().map(parse_size).transpose()?;

        Ok(Cli {
            path,
            pattern: self.pattern.unwrap_or_else(|| DEFAULT_PATTERN.to_string()),
            keep_last: self.keep_last,
            max_size,
            sort_by: self.sort_by.unwrap_or(SortBy::Time),
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}
