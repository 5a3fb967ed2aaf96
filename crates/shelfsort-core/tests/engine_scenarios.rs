//! # Engine Scenarios
//!
//! End-to-end checks of the sorting pipeline and the benchmark harness
//! through the public API.

use shelfsort_core::{
    Algorithm, ArtifactId, Book, ChartData, FieldValue, LogicalExpression, Member,
    PerformanceAnalyzer, Record, ShelfError, SortSpec, VisualizationSink, complexity_report, sort,
};
use std::collections::BTreeMap;
use std::time::Duration;

type Row = BTreeMap<String, FieldValue>;

fn row(id: i64, key: &str) -> Row {
    let mut row = Row::new();
    row.insert("id".to_string(), FieldValue::Int(id));
    row.insert("key".to_string(), FieldValue::from(key));
    row
}

fn ids<R: Record>(records: &[R], field: &str) -> Vec<FieldValue> {
    records.iter().filter_map(|r| r.field(field)).collect()
}

fn books(size: usize) -> Result<Vec<Book>, ShelfError> {
    Ok((0..size)
        .map(|i| {
            Book::new(i as u64 + 1, format!("title-{}", (i * 7) % 13), "Author", "0441013597")
                .with_availability(i % 3 == 0)
        })
        .collect())
}

// =============================================================================
// SORTING
// =============================================================================

#[test]
fn ties_preserve_input_order() {
    let input = vec![row(2, "b"), row(1, "a"), row(3, "a")];

    for algorithm in Algorithm::ALL {
        let (sorted, elapsed) = sort(algorithm, &input, &SortSpec::new("key")).expect("sort");
        assert_eq!(
            ids(&sorted, "id"),
            vec![FieldValue::Int(1), FieldValue::Int(3), FieldValue::Int(2)]
        );
        assert!(elapsed >= Duration::ZERO);
    }
    assert_eq!(ids(&input, "id")[0], FieldValue::Int(2));
}

#[test]
fn available_book_sorts_first_on_tie() {
    let input = vec![
        Book::new(1, "Dune", "Frank Herbert", "0441013597").with_availability(false),
        Book::new(2, "Dune", "Frank Herbert", "0441013597"),
    ];
    let spec = SortSpec::new("title").then(LogicalExpression::and("available", "available"));

    for algorithm in Algorithm::ALL {
        let (sorted, _) = sort(algorithm, &input, &spec).expect("sort");
        assert_eq!(sorted[0].book_id, 2);
        assert!(sorted[0].available);
    }
}

#[test]
fn empty_and_single_inputs_are_unchanged() {
    let empty: Vec<Row> = Vec::new();
    let single = vec![row(1, "only")];

    for algorithm in Algorithm::ALL {
        let (sorted, _) = sort(algorithm, &empty, &SortSpec::new("key")).expect("sort");
        assert!(sorted.is_empty());

        let (sorted, _) = sort(algorithm, &single, &SortSpec::new("key")).expect("sort");
        assert_eq!(sorted, single);
    }
}

#[test]
fn missing_primary_key_is_reported() {
    let input = vec![row(1, "a"), row(2, "b")];

    for algorithm in Algorithm::ALL {
        let err = sort(algorithm, &input, &SortSpec::new("title")).expect_err("key error");
        assert!(matches!(err, ShelfError::KeyError { .. }));
    }
}

#[test]
fn members_sort_by_derived_count() {
    let mut busy = Member::new(1, "Grace Hopper", "grace@example.org");
    busy.borrow(4);
    busy.borrow(5);
    let idle = Member::new(2, "Ada Lovelace", "0123456789");

    let (sorted, _) = sort(
        Algorithm::Merge,
        &[busy, idle],
        &SortSpec::new("borrowed_count"),
    )
    .expect("sort");
    assert_eq!(sorted[0].member_id, 2);
}

// =============================================================================
// BENCHMARKING
// =============================================================================

struct RecordingSink {
    last: Option<ChartData>,
}

impl VisualizationSink for RecordingSink {
    fn render(&mut self, chart: &ChartData) -> Result<ArtifactId, ShelfError> {
        self.last = Some(chart.clone());
        Ok(ArtifactId("chart.json".to_string()))
    }
}

#[test]
fn benchmark_produces_two_runs_per_size() {
    let mut analyzer = PerformanceAnalyzer::new();
    let table = analyzer.run_benchmark(&Algorithm::ALL, &[10, 100], books, "title", &[]);

    for size in [10, 100] {
        assert_eq!(table.for_size(size).count(), 2);
    }
    assert!(table.results().iter().all(|r| r.elapsed >= Duration::ZERO));
}

#[test]
fn benchmark_with_secondary_produces_four_runs_per_size() {
    let mut analyzer = PerformanceAnalyzer::new();
    let secondary = [LogicalExpression::and("available", "available")];
    let table = analyzer.run_benchmark(&Algorithm::ALL, &[10, 100], books, "title", &secondary);

    for size in [10, 100] {
        assert_eq!(table.for_size(size).count(), 4);
        assert_eq!(table.for_size(size).filter(|r| r.secondary).count(), 2);
    }
}

#[test]
fn visualization_receives_one_series_per_mode() {
    let mut analyzer = PerformanceAnalyzer::new();
    let secondary = [LogicalExpression::and("available", "available")];
    analyzer.run_benchmark(&Algorithm::ALL, &[10, 20, 30], books, "title", &secondary);

    let mut sink = RecordingSink { last: None };
    let id = analyzer.export_visualization(&mut sink).expect("export");
    assert_eq!(id.as_str(), "chart.json");

    let chart = sink.last.expect("chart rendered");
    assert_eq!(chart.series.len(), 4);
    assert!(chart.series.iter().all(|s| s.points.len() == 3));
}

#[test]
fn visualization_without_data_is_an_error() {
    let analyzer = PerformanceAnalyzer::new();
    let mut sink = RecordingSink { last: None };

    assert!(matches!(
        analyzer.export_visualization(&mut sink),
        Err(ShelfError::NoBenchmarkData)
    ));
    assert!(sink.last.is_none());
}

#[test]
fn results_accumulate_until_reset() {
    let mut analyzer = PerformanceAnalyzer::new();
    analyzer.run_benchmark(&[Algorithm::Insertion], &[10], books, "title", &[]);
    analyzer.run_benchmark(&[Algorithm::Insertion], &[10], books, "title", &[]);

    let aggregated = analyzer.aggregate();
    assert_eq!(analyzer.table().len(), 2);
    assert_eq!(aggregated.len(), 1);
    assert_eq!(aggregated[0].runs, 2);

    analyzer.reset();
    assert!(analyzer.aggregate().is_empty());
}

#[test]
fn complexity_report_is_static() {
    let report = complexity_report();
    assert_eq!(
        report.get("Merge Sort (Recursive)").copied(),
        Some("O(n log n) - Linearithmic time complexity")
    );
}
