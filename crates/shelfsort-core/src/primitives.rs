//! # Engine Primitives
//!
//! Fixed constants for shelfsort: report labels, catalog field limits and
//! benchmark defaults. Compiled in and immutable at runtime.

// =============================================================================
// ALGORITHM LABELS
// =============================================================================

/// Report label for insertion sort.
pub const INSERTION_SORT_LABEL: &str = "Insertion Sort (Loop-based)";

/// Report label for merge sort.
pub const MERGE_SORT_LABEL: &str = "Merge Sort (Recursive)";

/// Suffix appended to a label for runs that used secondary tie-breakers.
pub const WITH_SECONDARY_SUFFIX: &str = " (With Secondary)";

/// Suffix appended to a label for runs that sorted on the primary key only.
pub const PRIMARY_ONLY_SUFFIX: &str = " (Primary Only)";

// =============================================================================
// CATALOG FIELD LIMITS
// =============================================================================

/// Titles longer than this are truncated on construction.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Author names longer than this are truncated on construction.
pub const MAX_AUTHOR_LENGTH: usize = 50;

/// Minimum length for member and author names.
pub const MIN_NAME_LENGTH: usize = 2;

/// Number of digits in a phone-number contact.
pub const PHONE_DIGITS: usize = 10;

// =============================================================================
// BENCHMARK DEFAULTS
// =============================================================================

/// Data sizes used when none are configured.
pub const DEFAULT_BENCHMARK_SIZES: [usize; 4] = [10, 100, 500, 1000];

/// Chart title handed to visualization sinks.
pub const CHART_TITLE: &str = "Sorting Algorithm Performance Comparison";
