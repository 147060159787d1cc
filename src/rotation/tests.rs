use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use proptest::prelude::*;

use super::policy::{RetentionCriterion, SortKey};
use super::select::CandidateDirectory;
use crate::error::RotateError;

// Property test strategies

/// Candidate directories with unique names and arbitrary, possibly equal,
/// modification times
fn candidates_strategy() -> impl Strategy<Value = Vec<CandidateDirectory>> {
    prop::collection::vec(0u64..50, 0..40).prop_map(|ages| {
        ages.into_iter()
            .enumerate()
            .map(|(i, age)| {
                let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(10_000 - age * 60);
                CandidateDirectory::new(PathBuf::from(format!("/data/{i:08}")), modified)
            })
            .collect()
    })
}

fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![Just(SortKey::ModificationTime), Just(SortKey::Name)]
}

/// Deterministic pseudo size derived from the directory name
fn fake_size(path: &Path) -> u64 {
    let digits = path.file_name().unwrap().to_string_lossy();
    let index: u64 = digits.parse().unwrap();
    (index * 7_919) % 1_000
}

fn path_set(candidates: &[CandidateDirectory]) -> HashSet<PathBuf> {
    candidates.iter().map(|c| c.path().to_path_buf()).collect()
}

fn assert_partition(
    input: &[CandidateDirectory],
    kept: &[CandidateDirectory],
    to_remove: &[CandidateDirectory],
) -> Result<(), TestCaseError> {
    let kept_set = path_set(kept);
    let remove_set = path_set(to_remove);

    prop_assert_eq!(kept.len() + to_remove.len(), input.len());
    prop_assert_eq!(kept_set.len(), kept.len());
    prop_assert_eq!(remove_set.len(), to_remove.len());
    prop_assert!(kept_set.is_disjoint(&remove_set));

    let union: HashSet<PathBuf> = kept_set.union(&remove_set).cloned().collect();
    prop_assert_eq!(union, path_set(input));
    Ok(())
}

proptest! {
    #[test]
    fn test_keep_last_partitions_and_bounds(
        candidates in candidates_strategy(),
        count in 0usize..50,
        sort_key in sort_key_strategy(),
    ) {
        let outcome = RetentionCriterion::KeepLast(count)
            .apply(candidates.clone(), sort_key, |path| Ok(fake_size(path)));

        assert_partition(&candidates, &outcome.kept, &outcome.to_remove)?;
        prop_assert_eq!(outcome.kept.len(), count.min(candidates.len()));

        // Nothing removed is newer than anything kept
        for removed in &outcome.to_remove {
            for kept in &outcome.kept {
                prop_assert!(sort_key.compare(removed, kept).is_le());
            }
        }
    }

    #[test]
    fn test_max_size_partitions_within_budget(
        candidates in candidates_strategy(),
        max_bytes in 0u64..20_000,
        sort_key in sort_key_strategy(),
    ) {
        let outcome = RetentionCriterion::MaxSize(max_bytes)
            .apply(candidates.clone(), sort_key, |path| Ok(fake_size(path)));

        assert_partition(&candidates, &outcome.kept, &outcome.to_remove)?;

        let kept_total: u64 = outcome.kept.iter().map(|c| fake_size(c.path())).sum();
        prop_assert!(kept_total <= max_bytes);
        prop_assert_eq!(outcome.kept_size, Some(kept_total));

        // The first removed directory is the one that broke the budget
        if let Some(first_removed) = outcome.to_remove.first() {
            prop_assert!(kept_total + fake_size(first_removed.path()) > max_bytes);
        }
        for removed in &outcome.to_remove {
            for kept in &outcome.kept {
                prop_assert!(sort_key.compare(kept, removed).is_ge());
            }
        }
    }

    #[test]
    fn test_partition_is_deterministic(
        candidates in candidates_strategy(),
        count in 0usize..50,
        max_bytes in 0u64..20_000,
    ) {
        let criteria = [
            RetentionCriterion::KeepLast(count),
            RetentionCriterion::MaxSize(max_bytes),
        ];
        for criterion in criteria {
            let size_of = |p: &Path| Ok::<_, RotateError>(fake_size(p));
            let first = criterion.apply(candidates.clone(), SortKey::ModificationTime, size_of);
            let second = criterion.apply(candidates.clone(), SortKey::ModificationTime, size_of);
            prop_assert_eq!(first, second);
        }
    }
}
