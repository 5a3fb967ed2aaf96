//! Recursive merge sort.

use crate::comparator::compare;
use crate::{Record, ShelfError, SortSpec};
use std::cmp::Ordering;

/// Top-down merge sort.
///
/// Splits at the midpoint, sorts both halves recursively and merges them.
/// On `Equal` the merge takes from the left run, so equal records keep
/// their input order.
///
/// Time O(n log n), O(n) auxiliary space per merge level.
pub fn merge_sort<T: Record + Clone>(records: &[T], spec: &SortSpec) -> Result<Vec<T>, ShelfError> {
    merge_sort_owned(records.to_vec(), spec)
}

/// Merge sort that consumes its input instead of copying it.
pub(crate) fn merge_sort_owned<T: Record>(mut items: Vec<T>, spec: &SortSpec) -> Result<Vec<T>, ShelfError> {
    if items.len() <= 1 {
        return Ok(items);
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_owned(items, spec)?;
    let right = merge_sort_owned(right, spec)?;

    merge(left, right, spec)
}

fn merge<T: Record>(left: Vec<T>, right: Vec<T>, spec: &SortSpec) -> Result<Vec<T>, ShelfError> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r, spec)? != Ordering::Greater,
            _ => break,
        };
        merged.extend(if take_left { left.next() } else { right.next() });
    }

    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}
