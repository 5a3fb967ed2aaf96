//! # Sorting Algorithms
//!
//! Two stable sorts over the tie-break comparator:
//! - [`insertion_sort`]: adjacent-shift insertion, O(n²)
//! - [`merge_sort`]: recursive top-down merge, O(n log n)
//!
//! Both read their input through a shared slice and return a new `Vec`;
//! the caller's sequence is never reordered. For any input and
//! [`SortSpec`] the two produce identical output.

mod insertion;
mod merge;
mod timing;

pub use insertion::insertion_sort;
pub use merge::merge_sort;

use insertion::insertion_sort_in_place;
use merge::merge_sort_owned;
pub use timing::timed;

use crate::primitives::{INSERTION_SORT_LABEL, MERGE_SORT_LABEL};
use crate::{Record, ShelfError, SortSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The sorting algorithms the engine provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Loop-based insertion sort.
    Insertion,
    /// Recursive merge sort.
    Merge,
}

impl Algorithm {
    /// Every algorithm, in report order.
    pub const ALL: [Algorithm; 2] = [Algorithm::Insertion, Algorithm::Merge];

    /// Human-readable label used in reports and charts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Algorithm::Insertion => INSERTION_SORT_LABEL,
            Algorithm::Merge => MERGE_SORT_LABEL,
        }
    }

    /// Sort `records` under `spec` with this algorithm.
    pub fn run<T: Record + Clone>(self, records: &[T], spec: &SortSpec) -> Result<Vec<T>, ShelfError> {
        match self {
            Algorithm::Insertion => insertion_sort(records, spec),
            Algorithm::Merge => merge_sort(records, spec),
        }
    }

    fn run_owned<T: Record>(self, mut items: Vec<T>, spec: &SortSpec) -> Result<Vec<T>, ShelfError> {
        match self {
            Algorithm::Insertion => {
                insertion_sort_in_place(&mut items, spec)?;
                Ok(items)
            }
            Algorithm::Merge => merge_sort_owned(items, spec),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Algorithm {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insertion" | "insertion-sort" => Ok(Algorithm::Insertion),
            "merge" | "merge-sort" => Ok(Algorithm::Merge),
            other => Err(ShelfError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Sort `records` and report how long the sort itself took.
///
/// The working copy is made before the clock starts. A `KeyError` aborts
/// only this invocation.
pub fn sort<T: Record + Clone>(
    algorithm: Algorithm,
    records: &[T],
    spec: &SortSpec,
) -> Result<(Vec<T>, Duration), ShelfError> {
    let working = records.to_vec();
    let (ordered, elapsed) = timed(|| algorithm.run_owned(working, spec));
    let ordered = ordered?;

    tracing::debug!(
        algorithm = algorithm.label(),
        records = records.len(),
        secondary = spec.has_secondary(),
        elapsed_us = elapsed.as_micros() as u64,
        "sort complete"
    );

    Ok((ordered, elapsed))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;

    const CLONE_DELAY: Duration = Duration::from_millis(20);

    #[derive(Debug)]
    struct SlowClone(i64);

    impl Clone for SlowClone {
        fn clone(&self) -> Self {
            std::thread::sleep(CLONE_DELAY);
            SlowClone(self.0)
        }
    }

    impl Record for SlowClone {
        fn field(&self, name: &str) -> Option<FieldValue> {
            (name == "key").then_some(FieldValue::Int(self.0))
        }
    }

    #[test]
    fn algorithm_parsing() {
        assert_eq!("merge".parse::<Algorithm>().expect("parse"), Algorithm::Merge);
        assert_eq!(
            "Insertion".parse::<Algorithm>().expect("parse"),
            Algorithm::Insertion
        );
        assert!(matches!(
            "bubble".parse::<Algorithm>(),
            Err(ShelfError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn labels_are_distinct() {
        assert_ne!(Algorithm::Insertion.label(), Algorithm::Merge.label());
        assert_eq!(Algorithm::Merge.to_string(), "Merge Sort (Recursive)");
    }

    #[test]
    fn working_copy_is_not_timed() {
        let records = [SlowClone(3), SlowClone(1), SlowClone(2)];
        for algorithm in Algorithm::ALL {
            let (sorted, elapsed) = sort(algorithm, &records, &SortSpec::new("key")).expect("sort");

            assert_eq!(sorted.iter().map(|r| r.0).collect::<Vec<_>>(), vec![1, 2, 3]);
            assert!(elapsed < CLONE_DELAY, "{:?} timed the copy: {:?}", algorithm, elapsed);
        }
    }

    #[test]
    fn run_and_sort_agree() {
        let records = [SlowClone(2), SlowClone(1)];
        let spec = SortSpec::new("key");
        for algorithm in Algorithm::ALL {
            let direct = algorithm.run(&records, &spec).expect("run");
            let (timed_sort, _) = sort(algorithm, &records, &spec).expect("sort");
            assert_eq!(
                direct.iter().map(|r| r.0).collect::<Vec<_>>(),
                timed_sort.iter().map(|r| r.0).collect::<Vec<_>>()
            );
        }
    }
}
