//! Integration tests for configuration loading and the chart sink.

#![allow(clippy::unwrap_used, clippy::panic)]

use shelfsort::chart::JsonChartSink;
use shelfsort::config::Config;
use shelfsort_core::{
    Algorithm, Book, ChartData, PerformanceAnalyzer, ShelfError, VisualizationSink,
};
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_full_document() {
    let config = Config::from_toml_str(
        r#"
data_dir = "/var/lib/shelfsort"

[benchmark]
sizes = [5, 50]
chart_path = "out/chart.json"
"#,
    )
    .unwrap();

    assert_eq!(config.data_dir, PathBuf::from("/var/lib/shelfsort"));
    assert_eq!(config.benchmark.sizes, vec![5, 50]);
    assert_eq!(config.benchmark.chart_path, PathBuf::from("out/chart.json"));
}

#[test]
fn test_partial_table_keeps_defaults() {
    let config = Config::from_toml_str("[benchmark]\nsizes = [3]").unwrap();

    assert_eq!(config.data_dir, Config::default().data_dir);
    assert_eq!(config.benchmark.chart_path, Config::default().benchmark.chart_path);
}

#[test]
fn test_unknown_key_is_rejected() {
    let err = Config::from_toml_str("colour = \"blue\"").unwrap_err();
    assert!(matches!(err, ShelfError::Config(_)));
}

#[test]
fn test_empty_sizes_are_rejected() {
    let err = Config::from_toml_str("[benchmark]\nsizes = []").unwrap_err();
    assert!(err.to_string().contains("benchmark.sizes"));
}

#[test]
fn test_explicit_missing_file_errors() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ShelfError::Config(_)));
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shelfsort.toml");
    std::fs::write(&path, "data_dir = \"catalog\"").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.data_dir, PathBuf::from("catalog"));
}

#[test]
fn test_env_chart_path_override() {
    let config = Config::default()
        .with_env_from(|key| (key == "SHELFSORT_CHART_PATH").then(|| "env.json".to_string()));
    assert_eq!(config.benchmark.chart_path, PathBuf::from("env.json"));

    let unchanged = Config::default().with_env_from(|_| Some(String::new()));
    assert_eq!(unchanged, Config::default());
}

// =============================================================================
// CHART SINK
// =============================================================================

#[test]
fn test_json_chart_sink_writes_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("charts").join("perf.json");

    let books = |n: usize| {
        Ok::<_, ShelfError>(
            (0..n)
                .map(|i| Book::new(i as u64, format!("t{}", n - i), "Anon", "0441013597"))
                .collect::<Vec<_>>(),
        )
    };
    let mut analyzer = PerformanceAnalyzer::new();
    analyzer.run_benchmark(&Algorithm::ALL, &[3, 6], books, "title", &[]);

    let mut sink = JsonChartSink::new(&path);
    let artifact = analyzer.export_visualization(&mut sink).unwrap();
    assert_eq!(artifact.as_str(), path.display().to_string());

    let written: ChartData = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.series.len(), 2);
    assert_eq!(written.series[0].points.len(), 2);
}

#[test]
fn test_json_chart_sink_reports_unwritable_path() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    std::fs::write(&blocker, "x").unwrap();

    let mut sink = JsonChartSink::new(blocker.join("chart.json"));
    let err = sink.render(&ChartData::from_aggregates(&[])).unwrap_err();
    assert!(matches!(err, ShelfError::Render(_)));
}
