//! # shelfsort-core
//!
//! The sorting engine for shelfsort - THE ENGINE.
//!
//! Orders arbitrary records by a named primary key and resolves ties through
//! an ordered list of logical expressions (AND / OR / IMPLIES) over boolean
//! fields. A benchmarking harness times the algorithms across data sizes and
//! aggregates the results.
//!
//! ## Pipeline
//!
//! ```text
//! records ─▶ compare (accessor + evaluator) ─▶ insertion | merge ─▶ ordered records
//!                                   ▲
//!            PerformanceAnalyzer ───┘ timing, aggregation, chart data
//! ```
//!
//! ## Architectural Constraints
//!
//! - Sorting never reorders the caller's sequence; algorithms return a new `Vec`
//! - Both algorithms are stable and agree on every input
//! - Single-threaded, synchronous, no I/O (rendering goes through a sink trait)
//! - Benchmark state lives in one `PerformanceAnalyzer`, never in globals

// =============================================================================
// MODULES
// =============================================================================

pub mod accessor;
pub mod bench;
pub mod catalog;
pub mod comparator;
pub mod logic;
pub mod primitives;
pub mod sort;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use accessor::{Accessor, FieldAccessors, Record};
pub use types::{FieldValue, ShelfError};

// =============================================================================
// RE-EXPORTS: Ordering
// =============================================================================

pub use comparator::{SortSpec, compare};
pub use logic::{LogicalExpression, LogicalOperator, evaluate};
pub use sort::{Algorithm, insertion_sort, merge_sort, sort, timed};

// =============================================================================
// RE-EXPORTS: Benchmarking
// =============================================================================

pub use bench::{
    AggregatedResult, ArtifactId, BenchmarkResult, BenchmarkTable, ChartData, ChartPoint,
    ChartSeries, FailedRun, PerformanceAnalyzer, SkippedSize, VisualizationSink, aggregate,
    complexity_report,
};

// =============================================================================
// RE-EXPORTS: Catalog
// =============================================================================

pub use catalog::{Book, LoanStatus, Member, Transaction};
