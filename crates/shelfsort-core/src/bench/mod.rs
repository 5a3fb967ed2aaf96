//! # Bench Module
//!
//! Performance analysis for the sorting algorithms.
//!
//! A [`PerformanceAnalyzer`] owns one session's [`BenchmarkTable`]. It times
//! single invocations or a full benchmark matrix (algorithm × data size ×
//! with/without secondary tie-break), aggregates mean durations, and hands
//! chart-ready series to a [`VisualizationSink`]. Runs are strictly
//! sequential; concurrent timing would make wall-clock comparisons meaningless.

mod analyzer;
mod report;

pub use analyzer::*;
pub use report::*;
