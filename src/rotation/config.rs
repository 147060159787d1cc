use std::path::{Path, PathBuf, is_separator};

use glob::{MatchOptions, Pattern};
use regex::Regex;
use tracing::{debug, info, warn};

use super::policy::{RetentionCriterion, RetentionOutcome, SortKey};
use super::remove::{RemovalReport, remove_directory};
use super::select::{compile_name_pattern, select_directories};
use super::size::format_size;
use super::usage::calculate_directory_size;
use crate::error::{Result, RotateError};
use crate::logging::error_chain;

/// Default directory name pattern: an eight digit date such as `20240131`
pub const DEFAULT_PATTERN: &str = r"\d{8}";

/// A fully validated rotation run
#[derive(Debug, Clone)]
pub struct Rotation {
    /// Base path, possibly containing glob wildcards
    path_expression: String,
    /// The expression ended with a separator, so only directories expand
    directories_only: bool,
    /// Anchored name pattern
    pattern: Regex,
    /// Attribute directories are ordered by
    sort_key: SortKey,
    /// What to keep in every base directory
    criterion: RetentionCriterion,
}

impl Rotation {
    /// Creates a new builder for [`Rotation`]
    pub fn builder() -> RotationBuilder {
        RotationBuilder::default()
    }

    /// Get the base path expression
    pub fn path_expression(&self) -> &str {
        &self.path_expression
    }

    /// Get the compiled, anchored name pattern
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Get the sort key
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Get the retention criterion
    pub fn criterion(&self) -> RetentionCriterion {
        self.criterion
    }

    /// Whether expansion keeps directories only
    pub fn directories_only(&self) -> bool {
        self.directories_only
    }

    /// Expand the path expression into concrete base directories.
    ///
    /// A wildcard-free expression is returned as is, so a missing directory
    /// surfaces later as [`RotateError::NotFound`]. Wildcards never recurse:
    /// `**` matches a single path component like `*`. When the expression
    /// ended with a separator, expanded entries that are not directories are
    /// dropped. Entries the glob walk cannot read are logged and counted in
    /// `stats.bases_skipped`.
    pub fn base_directories(&self, stats: &mut RotationStats) -> Vec<PathBuf> {
        let expression = self.path_expression.as_str();
        if !has_wildcards(expression) {
            return vec![PathBuf::from(expression)];
        }

        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };
        let glob_expression = collapse_star_runs(expression);
        let paths = match glob::glob_with(&glob_expression, options) {
            Ok(paths) => paths,
            Err(err) => {
                warn!("failed to expand {expression}: {err}");
                stats.bases_skipped += 1;
                return Vec::new();
            }
        };

        let mut base_dirs = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) if self.directories_only && !path.is_dir() => {
                    debug!("ignoring {}, not a directory", path.display());
                }
                Ok(path) => base_dirs.push(path),
                Err(err) => {
                    warn!("failed to expand {expression}: {}", error_chain(&err));
                    stats.bases_skipped += 1;
                }
            }
        }

        debug!("expanding {expression} to {base_dirs:?}");
        base_dirs
    }

    /// Select, sort and partition one base directory without deleting anything
    pub fn plan(&self, base_dir: &Path) -> Result<RetentionOutcome> {
        let candidates = select_directories(base_dir, &self.pattern)?;
        Ok(self
            .criterion
            .apply(candidates, self.sort_key, calculate_directory_size))
    }

    /// Rotate a single base directory: plan, then delete everything not kept
    pub fn rotate_base(&self, base_dir: &Path) -> Result<BaseSummary> {
        self.rotate_base_with(base_dir, remove_directory)
    }

    fn rotate_base_with<F>(&self, base_dir: &Path, mut remove: F) -> Result<BaseSummary>
    where
        F: FnMut(&Path) -> RemovalReport,
    {
        let outcome = self.plan(base_dir)?;
        let mut summary = BaseSummary {
            base_dir: base_dir.to_path_buf(),
            candidates: outcome.kept.len() + outcome.to_remove.len(),
            kept_size: outcome.kept_size,
            ..BaseSummary::default()
        };

        if let Some(kept_size) = outcome.kept_size {
            info!(
                "keep {} items with size of {} in {}",
                outcome.kept.len(),
                format_size(kept_size),
                base_dir.display()
            );
        }
        info!(
            "remove {}/{} items in {}",
            outcome.to_remove.len(),
            summary.candidates,
            base_dir.display()
        );

        for candidate in &outcome.to_remove {
            debug!("remove {}", candidate.path().display());
            let report = remove(candidate.path());
            if report.skipped {
                summary.skipped += 1;
            } else if report.is_complete() {
                summary.removed += 1;
            } else {
                summary.incomplete += 1;
            }
        }

        Ok(summary)
    }

    /// Rotate every base directory the expression expands to.
    ///
    /// Never fails: a base directory that is missing or unreadable is logged
    /// and skipped, and deletion problems only show up in the log and the
    /// returned statistics.
    pub fn run(&self) -> RotationStats {
        let mut stats = RotationStats::default();

        for base_dir in self.base_directories(&mut stats) {
            match self.rotate_base(&base_dir) {
                Ok(summary) => stats.record(summary),
                Err(err) => {
                    warn!("{}, skipping", error_chain(&err));
                    stats.bases_skipped += 1;
                }
            }
        }

        debug!(
            "processed {} base directories ({} skipped): {} removed, {} skipped, {} incomplete",
            stats.bases.len(),
            stats.bases_skipped,
            stats.removed(),
            stats.skipped(),
            stats.incomplete()
        );

        stats
    }
}

fn has_wildcards(expression: &str) -> bool {
    expression.contains(['*', '?', '['])
}

/// Replace every run of `*` with a single `*`, turning `**` into a plain
/// one-component wildcard
fn collapse_star_runs(expression: &str) -> String {
    let mut collapsed = String::with_capacity(expression.len());
    for c in expression.chars() {
        if c == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

/// Strip trailing separators, keeping a bare root intact
fn trim_trailing_separators(expression: &str) -> &str {
    let trimmed = expression.trim_end_matches(is_separator);
    if trimmed.is_empty() && !expression.is_empty() {
        &expression[..1]
    } else {
        trimmed
    }
}

/// Builder for [`Rotation`]
#[derive(Debug, Default)]
pub struct RotationBuilder {
    path_expression: Option<String>,
    pattern: Option<String>,
    sort_key: SortKey,
    keep_last: Option<usize>,
    max_size: Option<u64>,
}

impl RotationBuilder {
    /// Set the base path expression
    pub fn path(mut self, expression: impl Into<String>) -> Self {
        self.path_expression = Some(expression.into());
        self
    }

    /// Set the directory name pattern (defaults to [`DEFAULT_PATTERN`])
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Set the sort key
    pub fn sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Keep the `count` newest directories
    pub fn keep_last(mut self, count: usize) -> Self {
        self.keep_last = Some(count);
        self
    }

    /// Keep the newest directories fitting in `bytes`
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    /// Validate and build the [`Rotation`]
    pub fn build(self) -> Result<Rotation> {
        let criterion = match (self.keep_last, self.max_size) {
            (Some(count), None) => RetentionCriterion::KeepLast(count),
            (None, Some(bytes)) => RetentionCriterion::MaxSize(bytes),
            (Some(_), Some(_)) => {
                return Err(RotateError::ConfigError(
                    "keep_last and max_size are mutually exclusive".to_string(),
                ));
            }
            (None, None) => {
                return Err(RotateError::ConfigError(
                    "either keep_last or max_size must be specified".to_string(),
                ));
            }
        };

        let raw_expression = self
            .path_expression
            .filter(|expression| !expression.is_empty())
            .ok_or_else(|| RotateError::ConfigError("path is required".to_string()))?;
        let path_expression = trim_trailing_separators(&raw_expression).to_string();
        let directories_only = path_expression.len() < raw_expression.len();
        if has_wildcards(&path_expression) {
            Pattern::new(&collapse_star_runs(&path_expression)).map_err(|source| {
                RotateError::InvalidPathExpression {
                    expression: raw_expression.clone(),
                    source,
                }
            })?;
        }

        let pattern = compile_name_pattern(self.pattern.as_deref().unwrap_or(DEFAULT_PATTERN))?;

        Ok(Rotation {
            path_expression,
            directories_only,
            pattern,
            sort_key: self.sort_key,
            criterion,
        })
    }
}

/// Result of rotating one base directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseSummary {
    /// The base directory
    pub base_dir: PathBuf,
    /// Matching directories found
    pub candidates: usize,
    /// Directories fully removed
    pub removed: usize,
    /// Directories left alone for lack of write access
    pub skipped: usize,
    /// Directories where some entries could not be removed
    pub incomplete: usize,
    /// Combined size of the kept directories, for size-bounded runs
    pub kept_size: Option<u64>,
}

/// Statistics about a whole rotation run
#[derive(Debug, Default)]
pub struct RotationStats {
    /// One summary per base directory that was rotated
    pub bases: Vec<BaseSummary>,
    /// Base directories that could not be expanded or read
    pub bases_skipped: usize,
}

impl RotationStats {
    fn record(&mut self, summary: BaseSummary) {
        self.bases.push(summary);
    }

    /// Total directories fully removed
    pub fn removed(&self) -> usize {
        self.bases.iter().map(|b| b.removed).sum()
    }

    /// Total directories skipped for lack of write access
    pub fn skipped(&self) -> usize {
        self.bases.iter().map(|b| b.skipped).sum()
    }

    /// Total directories only partly removed
    pub fn incomplete(&self) -> usize {
        self.bases.iter().map(|b| b.incomplete).sum()
    }
}
