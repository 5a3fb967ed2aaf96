//! # Performance Analyzer
//!
//! Runs the benchmark matrix and keeps its results for one session.
//!
//! - Datasets are generated before any timing starts
//! - A failing size or run is recorded, never fatal to the matrix
//! - Results accumulate until [`PerformanceAnalyzer::reset`]

use super::report::{ArtifactId, ChartData, VisualizationSink, aggregate, AggregatedResult};
use crate::primitives::{PRIMARY_ONLY_SUFFIX, WITH_SECONDARY_SUFFIX};
use crate::sort::{Algorithm, sort};
use crate::{LogicalExpression, Record, ShelfError, SortSpec};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::time::Duration;

// =============================================================================
// RESULT TYPES
// =============================================================================

/// One timed sort invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Number of records sorted.
    pub record_count: usize,
    /// Time spent inside the sort call.
    pub elapsed: Duration,
    /// Whether secondary tie-break expressions were active.
    pub secondary: bool,
}

impl BenchmarkResult {
    /// Report label, e.g. `Merge Sort (Recursive) (With Secondary)`.
    #[must_use]
    pub fn label(&self) -> String {
        let suffix = if self.secondary {
            WITH_SECONDARY_SUFFIX
        } else {
            PRIMARY_ONLY_SUFFIX
        };
        format!("{}{}", self.algorithm.label(), suffix)
    }
}

/// A data size whose generator failed; none of its runs were recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSize {
    /// Requested data size.
    pub size: usize,
    /// Generator error message.
    pub reason: String,
}

/// A sort invocation that aborted with an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRun {
    /// Algorithm that failed.
    pub algorithm: Algorithm,
    /// Number of records it was given.
    pub record_count: usize,
    /// Whether secondary tie-break expressions were active.
    pub secondary: bool,
    /// Error message.
    pub error: String,
}

/// All outcomes of one analysis session, in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkTable {
    results: Vec<BenchmarkResult>,
    skipped: Vec<SkippedSize>,
    failures: Vec<FailedRun>,
}

impl BenchmarkTable {
    /// Successful runs.
    #[must_use]
    pub fn results(&self) -> &[BenchmarkResult] {
        &self.results
    }

    /// Data sizes skipped because their generator failed.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedSize] {
        &self.skipped
    }

    /// Runs that aborted with an error.
    #[must_use]
    pub fn failures(&self) -> &[FailedRun] {
        &self.failures
    }

    /// Number of successful runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when no run has succeeded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results recorded for one data size.
    pub fn for_size(&self, size: usize) -> impl Iterator<Item = &BenchmarkResult> + '_ {
        self.results.iter().filter(move |r| r.record_count == size)
    }
}

// =============================================================================
// ANALYZER
// =============================================================================

/// Drives timed sort runs and owns their results for one session.
///
/// The table grows append-only and is cleared only by [`reset`](Self::reset).
#[derive(Debug, Default)]
pub struct PerformanceAnalyzer {
    table: BenchmarkTable,
}

impl PerformanceAnalyzer {
    /// Create an analyzer with an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The session's results so far.
    #[must_use]
    pub fn table(&self) -> &BenchmarkTable {
        &self.table
    }

    /// Discard every recorded result.
    pub fn reset(&mut self) {
        self.table = BenchmarkTable::default();
    }

    /// Time one sort of `records` and record the result.
    ///
    /// The caller's records are not reordered. A failing sort records
    /// nothing and returns the error.
    pub fn analyze<T: Record + Clone>(
        &mut self,
        algorithm: Algorithm,
        records: &[T],
        spec: &SortSpec,
    ) -> Result<Duration, ShelfError> {
        let (_, elapsed) = sort(algorithm, records, spec)?;

        self.table.results.push(BenchmarkResult {
            algorithm,
            record_count: records.len(),
            elapsed,
            secondary: spec.has_secondary(),
        });

        Ok(elapsed)
    }

    /// Run the benchmark matrix.
    ///
    /// For every size, each (algorithm, tie-break mode) pair sorts its own
    /// freshly generated dataset. The "with secondary" mode only runs when
    /// `secondary` is non-empty. All datasets for a size are generated before
    /// any of its runs, so a generator failure skips the whole size.
    /// Sort errors are recorded as failed runs; the matrix always completes.
    pub fn run_benchmark<T, E, G>(
        &mut self,
        algorithms: &[Algorithm],
        sizes: &[usize],
        mut generator: G,
        primary_key: &str,
        secondary: &[LogicalExpression],
    ) -> &BenchmarkTable
    where
        T: Record + Clone,
        E: Display,
        G: FnMut(usize) -> Result<Vec<T>, E>,
    {
        let mut specs = vec![SortSpec::new(primary_key)];
        if !secondary.is_empty() {
            specs.push(SortSpec::with_secondary(primary_key, secondary.to_vec()));
        }

        for &size in sizes {
            let runs = algorithms.len() * specs.len();
            let datasets = match (0..runs).map(|_| generator(size)).collect::<Result<Vec<_>, E>>() {
                Ok(datasets) => datasets,
                Err(e) => {
                    tracing::warn!(size, error = %e, "data generation failed, skipping size");
                    self.table.skipped.push(SkippedSize {
                        size,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let plan = algorithms
                .iter()
                .flat_map(|&algorithm| specs.iter().map(move |spec| (algorithm, spec)));

            for ((algorithm, spec), data) in plan.zip(datasets) {
                if let Err(e) = self.analyze(algorithm, &data, spec) {
                    tracing::warn!(
                        algorithm = algorithm.label(),
                        size,
                        error = %e,
                        "benchmark run failed"
                    );
                    self.table.failures.push(FailedRun {
                        algorithm,
                        record_count: data.len(),
                        secondary: spec.has_secondary(),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            runs = self.table.results.len(),
            skipped = self.table.skipped.len(),
            failed = self.table.failures.len(),
            "benchmark matrix finished"
        );

        &self.table
    }

    /// Mean duration per (algorithm, size, secondary) group.
    #[must_use]
    pub fn aggregate(&self) -> Vec<AggregatedResult> {
        aggregate(self.table.results())
    }

    /// Hand the aggregated series to `sink` and return its artifact id.
    ///
    /// # Errors
    /// `ShelfError::NoBenchmarkData` if nothing has been recorded, or
    /// whatever the sink reports.
    pub fn export_visualization(
        &self,
        sink: &mut dyn VisualizationSink,
    ) -> Result<ArtifactId, ShelfError> {
        if self.table.is_empty() {
            return Err(ShelfError::NoBenchmarkData);
        }
        let chart = ChartData::from_aggregates(&self.aggregate());
        sink.render(&chart)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldValue;
    use std::collections::BTreeMap;

    type Row = BTreeMap<String, FieldValue>;

    fn rows(size: usize) -> Result<Vec<Row>, String> {
        Ok((0..size)
            .map(|i| {
                let mut row = Row::new();
                row.insert("key".to_string(), FieldValue::from((size - i) % 7));
                row.insert("available".to_string(), FieldValue::Bool(i % 2 == 0));
                row
            })
            .collect())
    }

    #[test]
    fn analyze_appends_one_result() {
        let mut analyzer = PerformanceAnalyzer::new();
        let data = rows(20).expect("rows");

        analyzer
            .analyze(Algorithm::Merge, &data, &SortSpec::new("key"))
            .expect("analyze");

        let results = analyzer.table().results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].record_count, 20);
        assert!(!results[0].secondary);
        assert_eq!(results[0].label(), "Merge Sort (Recursive) (Primary Only)");
    }

    #[test]
    fn analyze_failure_records_nothing() {
        let mut analyzer = PerformanceAnalyzer::new();
        let data = rows(5).expect("rows");

        let result = analyzer.analyze(Algorithm::Insertion, &data, &SortSpec::new("missing"));
        assert!(result.is_err());
        assert!(analyzer.table().is_empty());
    }

    #[test]
    fn matrix_without_secondary() {
        let mut analyzer = PerformanceAnalyzer::new();
        let table = analyzer.run_benchmark(&Algorithm::ALL, &[10, 100], rows, "key", &[]);

        assert_eq!(table.len(), 4);
        assert_eq!(table.for_size(10).count(), 2);
        assert_eq!(table.for_size(100).count(), 2);
        assert!(table.results().iter().all(|r| !r.secondary));
    }

    #[test]
    fn matrix_with_secondary_doubles_runs() {
        let mut analyzer = PerformanceAnalyzer::new();
        let secondary = [LogicalExpression::and("available", "available")];
        let table = analyzer.run_benchmark(&Algorithm::ALL, &[10, 100], rows, "key", &secondary);

        assert_eq!(table.for_size(10).count(), 4);
        assert_eq!(table.for_size(100).count(), 4);
        assert_eq!(table.results().iter().filter(|r| r.secondary).count(), 4);
    }

    #[test]
    fn generator_failure_skips_size() {
        let mut analyzer = PerformanceAnalyzer::new();
        let generator = |size: usize| {
            if size == 50 {
                Err("disk full".to_string())
            } else {
                rows(size)
            }
        };
        let table = analyzer.run_benchmark(&Algorithm::ALL, &[10, 50, 100], generator, "key", &[]);

        assert_eq!(table.for_size(50).count(), 0);
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.skipped(),
            &[SkippedSize {
                size: 50,
                reason: "disk full".to_string()
            }]
        );
    }

    #[test]
    fn key_error_is_recorded_and_matrix_continues() {
        let mut analyzer = PerformanceAnalyzer::new();
        let table = analyzer.run_benchmark(&Algorithm::ALL, &[1, 10], rows, "title", &[]);

        // Single records never reach the comparator, so size 1 still succeeds.
        assert_eq!(table.for_size(1).count(), 2);
        assert_eq!(table.failures().len(), 2);
        assert!(table.failures().iter().all(|f| f.record_count == 10));
    }

    #[test]
    fn reset_clears_the_table() {
        let mut analyzer = PerformanceAnalyzer::new();
        analyzer.run_benchmark(&[Algorithm::Merge], &[10], rows, "key", &[]);
        assert!(!analyzer.table().is_empty());

        analyzer.reset();
        assert!(analyzer.table().is_empty());
        assert!(analyzer.table().skipped().is_empty());
    }
}
