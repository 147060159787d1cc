//! Retention policies deciding which candidate directories survive.
//!
//! Both policies work on a materialized candidate list and only return a
//! partition; nothing here touches the filesystem apart from the size probe
//! handed to [`keep_up_to_size`].

use std::cmp::Ordering;
use std::path::Path;

use tracing::{debug, warn};

use super::select::CandidateDirectory;
use crate::error::Result;
use crate::logging::error_chain;

/// Attribute candidates are ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Directory modification time
    #[default]
    ModificationTime,
    /// Lexicographic base name
    Name,
}

impl SortKey {
    /// Compare two candidates, oldest first
    pub fn compare(self, a: &CandidateDirectory, b: &CandidateDirectory) -> Ordering {
        match self {
            Self::ModificationTime => a.modified().cmp(&b.modified()),
            Self::Name => a.name().cmp(b.name()),
        }
    }
}

/// How many directories to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetentionCriterion {
    /// Keep the `n` newest directories
    KeepLast(usize),
    /// Keep the newest directories whose combined size fits in this many bytes
    MaxSize(u64),
}

/// Partition of the candidates into survivors and directories to delete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionOutcome {
    /// Candidates that survive the run
    pub kept: Vec<CandidateDirectory>,
    /// Candidates to hand to the deleter
    pub to_remove: Vec<CandidateDirectory>,
    /// Combined measured size of `kept`, for size-bounded runs
    pub kept_size: Option<u64>,
}

impl RetentionCriterion {
    /// Sort `candidates` the way this criterion expects and partition them.
    ///
    /// `size_of` is only called by [`RetentionCriterion::MaxSize`], once per
    /// candidate until the budget is exhausted.
    pub fn apply<F>(
        &self,
        mut candidates: Vec<CandidateDirectory>,
        sort_key: SortKey,
        size_of: F,
    ) -> RetentionOutcome
    where
        F: FnMut(&Path) -> Result<u64>,
    {
        match *self {
            Self::KeepLast(count) => {
                sort_oldest_first(&mut candidates, sort_key);
                keep_last(candidates, count)
            }
            Self::MaxSize(max_bytes) => {
                sort_newest_first(&mut candidates, sort_key);
                keep_up_to_size(candidates, max_bytes, size_of)
            }
        }
    }
}

/// Stable ascending sort; ties keep enumeration order
pub fn sort_oldest_first(candidates: &mut [CandidateDirectory], sort_key: SortKey) {
    candidates.sort_by(|a, b| sort_key.compare(a, b));
}

/// Stable descending sort; ties keep enumeration order
pub fn sort_newest_first(candidates: &mut [CandidateDirectory], sort_key: SortKey) {
    candidates.sort_by(|a, b| sort_key.compare(b, a));
}

/// Keep the last `count` entries of an oldest-first list.
pub fn keep_last(mut sorted: Vec<CandidateDirectory>, count: usize) -> RetentionOutcome {
    let split = sorted.len().saturating_sub(count);
    let kept = sorted.split_off(split);

    RetentionOutcome {
        kept,
        to_remove: sorted,
        kept_size: None,
    }
}

/// Keep the leading entries of a newest-first list while they fit in
/// `max_bytes`.
///
/// The first candidate that would push the running total over the budget is
/// removed together with everything after it, even when nothing has been kept
/// yet. A candidate whose size cannot be measured is kept and contributes
/// nothing to the total.
pub fn keep_up_to_size<F>(
    sorted: Vec<CandidateDirectory>,
    max_bytes: u64,
    mut size_of: F,
) -> RetentionOutcome
where
    F: FnMut(&Path) -> Result<u64>,
{
    let mut kept = Vec::new();
    let mut cumulative = 0u64;
    let mut remaining = sorted.into_iter();

    while let Some(candidate) = remaining.next() {
        let size = match size_of(candidate.path()) {
            Ok(size) => size,
            Err(err) => {
                warn!("{}; excluding it from the size budget", error_chain(&err));
                kept.push(candidate);
                continue;
            }
        };

        match cumulative.checked_add(size) {
            Some(total) if total <= max_bytes => {
                debug!("keep {} ({size} bytes, total {total})", candidate.path().display());
                cumulative = total;
                kept.push(candidate);
            }
            _ => {
                debug!(
                    "budget of {max_bytes} bytes exceeded at {}",
                    candidate.path().display()
                );
                let mut to_remove = vec![candidate];
                to_remove.extend(remaining);
                return RetentionOutcome {
                    kept,
                    to_remove,
                    kept_size: Some(cumulative),
                };
            }
        }
    }

    RetentionOutcome {
        kept,
        to_remove: Vec::new(),
        kept_size: Some(cumulative),
    }
}
