//! Loop-based insertion sort.

use crate::comparator::compare;
use crate::{Record, ShelfError, SortSpec};
use std::cmp::Ordering;

/// Insertion sort over a working copy of `records`.
///
/// Each element moves left past neighbours that compare `Greater`; an
/// `Equal` neighbour stops it, which keeps the sort stable.
///
/// Time O(n²), extra space O(1) beyond the copy.
pub fn insertion_sort<T: Record + Clone>(records: &[T], spec: &SortSpec) -> Result<Vec<T>, ShelfError> {
    let mut items = records.to_vec();
    insertion_sort_in_place(&mut items, spec)?;
    Ok(items)
}

/// Sort `items` in place. On error the slice is left partially sorted.
pub(crate) fn insertion_sort_in_place<T: Record>(items: &mut [T], spec: &SortSpec) -> Result<(), ShelfError> {
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j], spec)? == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
    Ok(())
}
