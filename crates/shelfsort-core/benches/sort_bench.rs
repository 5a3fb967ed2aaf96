//! # Sort Benchmarks
//!
//! Criterion benchmarks for the two sorting algorithms.
//!
//! Run with: `cargo bench -p shelfsort-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shelfsort_core::{Algorithm, Book, LogicalExpression, SortSpec};
use std::hint::black_box;

/// Books with repeating titles so the tie-breaker has work to do.
fn create_books(size: usize) -> Vec<Book> {
    (0..size)
        .map(|i| {
            Book::new(
                i as u64,
                format!("title-{:04}", (i * 7919) % (size / 4 + 1)),
                "Author",
                "0441013597",
            )
            .with_availability(i % 2 == 0)
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_primary_only(c: &mut Criterion) {
    let spec = SortSpec::new("title");

    for algorithm in Algorithm::ALL {
        let mut group = c.benchmark_group(format!("primary_only/{}", algorithm.label()));
        for size in [10, 100, 1000].iter() {
            let books = create_books(*size);
            group.bench_with_input(BenchmarkId::from_parameter(size), &books, |b, books| {
                b.iter(|| black_box(algorithm.run(books, &spec)));
            });
        }
        group.finish();
    }
}

fn bench_with_secondary(c: &mut Criterion) {
    let spec = SortSpec::new("title").then(LogicalExpression::and("available", "available"));

    for algorithm in Algorithm::ALL {
        let mut group = c.benchmark_group(format!("with_secondary/{}", algorithm.label()));
        for size in [10, 100, 1000].iter() {
            let books = create_books(*size);
            group.bench_with_input(BenchmarkId::from_parameter(size), &books, |b, books| {
                b.iter(|| black_box(algorithm.run(books, &spec)));
            });
        }
        group.finish();
    }
}

criterion_group!(benches, bench_primary_only, bench_with_secondary);
criterion_main!(benches);
