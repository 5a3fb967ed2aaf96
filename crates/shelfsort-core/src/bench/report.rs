//! # Benchmark Reporting
//!
//! Aggregation, the static complexity table and chart data for
//! visualization sinks.

use super::analyzer::BenchmarkResult;
use crate::ShelfError;
use crate::primitives::{CHART_TITLE, WITH_SECONDARY_SUFFIX};
use crate::sort::Algorithm;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

// =============================================================================
// AGGREGATION
// =============================================================================

/// Mean duration of every run sharing an (algorithm, size, secondary) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResult {
    /// Algorithm that ran.
    pub algorithm: Algorithm,
    /// Number of records sorted.
    pub record_count: usize,
    /// Whether secondary tie-break expressions were active.
    pub secondary: bool,
    /// Mean time across the group's runs.
    pub mean: Duration,
    /// Number of runs in the group.
    pub runs: usize,
}

/// Group results by (algorithm, size, secondary) and reduce each group to
/// its mean duration.
///
/// Output is ordered by algorithm, then size, then primary-only before
/// with-secondary. The mean is taken over whole nanoseconds.
#[must_use]
pub fn aggregate(results: &[BenchmarkResult]) -> Vec<AggregatedResult> {
    let mut groups: BTreeMap<(Algorithm, usize, bool), (u128, usize)> = BTreeMap::new();

    for result in results {
        let entry = groups
            .entry((result.algorithm, result.record_count, result.secondary))
            .or_insert((0, 0));
        entry.0 = entry.0.saturating_add(result.elapsed.as_nanos());
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((algorithm, record_count, secondary), (total, runs))| {
            let mean = total / runs.max(1) as u128;
            AggregatedResult {
                algorithm,
                record_count,
                secondary,
                mean: Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX)),
                runs,
            }
        })
        .collect()
}

// =============================================================================
// COMPLEXITY REPORT
// =============================================================================

/// Asymptotic order of each algorithm, keyed by report label.
///
/// A static lookup; nothing here is derived from measured timings.
#[must_use]
pub fn complexity_report() -> BTreeMap<String, &'static str> {
    let mut report = BTreeMap::new();
    for algorithm in Algorithm::ALL {
        let (plain, secondary) = match algorithm {
            Algorithm::Insertion => (
                "O(n²) - Quadratic time complexity",
                "O(n²) - With additional constant factor for logical operations",
            ),
            Algorithm::Merge => (
                "O(n log n) - Linearithmic time complexity",
                "O(n log n) - With additional constant factor for logical operations",
            ),
        };
        report.insert(algorithm.label().to_string(), plain);
        report.insert(
            format!("{}{}", algorithm.label(), WITH_SECONDARY_SUFFIX),
            secondary,
        );
    }
    report
}

// =============================================================================
// VISUALIZATION
// =============================================================================

/// One point of a chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X axis: data size.
    pub record_count: usize,
    /// Y axis: mean duration in nanoseconds.
    pub mean_nanos: u64,
}

/// One line of the chart: an algorithm with or without secondary tie-break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Legend label.
    pub label: String,
    /// Algorithm plotted.
    pub algorithm: Algorithm,
    /// Whether this line is the with-secondary variant.
    pub secondary: bool,
    /// Points ordered by data size.
    pub points: Vec<ChartPoint>,
}

/// Everything a sink needs to draw the performance comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    /// Chart title.
    pub title: String,
    /// X axis label.
    pub x_label: String,
    /// Y axis label.
    pub y_label: String,
    /// One series per (algorithm, secondary) pair.
    pub series: Vec<ChartSeries>,
}

impl ChartData {
    /// Build chart series from aggregated results.
    #[must_use]
    pub fn from_aggregates(aggregates: &[AggregatedResult]) -> Self {
        let mut lines: BTreeMap<(Algorithm, bool), Vec<ChartPoint>> = BTreeMap::new();
        for agg in aggregates {
            lines
                .entry((agg.algorithm, agg.secondary))
                .or_default()
                .push(ChartPoint {
                    record_count: agg.record_count,
                    mean_nanos: u64::try_from(agg.mean.as_nanos()).unwrap_or(u64::MAX),
                });
        }

        let series = lines
            .into_iter()
            .map(|((algorithm, secondary), mut points)| {
                points.sort_by_key(|p| p.record_count);
                let label = if secondary {
                    format!("{}{}", algorithm.label(), WITH_SECONDARY_SUFFIX)
                } else {
                    algorithm.label().to_string()
                };
                ChartSeries {
                    label,
                    algorithm,
                    secondary,
                    points,
                }
            })
            .collect();

        Self {
            title: CHART_TITLE.to_string(),
            x_label: "Data Size".to_string(),
            y_label: "Execution Time (ns)".to_string(),
            series,
        }
    }
}

/// Identifier of a rendered artifact (file path, URL, handle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactId(pub String);

impl ArtifactId {
    /// Get the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Renders benchmark charts outside the engine.
///
/// The engine supplies only [`ChartData`]; drawing, file formats and storage
/// belong to the implementor.
pub trait VisualizationSink {
    /// Render `chart` and return the identifier of the produced artifact.
    fn render(&mut self, chart: &ChartData) -> Result<ArtifactId, ShelfError>;
}

// =============================================================================
// TESTS
// =============================================================================
