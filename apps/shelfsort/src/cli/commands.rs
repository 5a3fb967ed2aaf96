//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::{CatalogKind, EntityKind};
use crate::chart::JsonChartSink;
use crate::generator;
use crate::store::CatalogStore;
use serde::Serialize;
use shelfsort_core::primitives::WITH_SECONDARY_SUFFIX;
use shelfsort_core::{
    Algorithm, Book, FieldAccessors, LogicalExpression, Member, PerformanceAnalyzer, Record,
    ShelfError, SortSpec, Transaction, complexity_report, sort,
};
use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// Separator printed between multi-line records.
const RECORD_SEPARATOR: &str = "------------------------------";

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn print_json(value: &serde_json::Value) -> Result<(), ShelfError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ShelfError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, ShelfError> {
    serde_json::to_value(value).map_err(|e| ShelfError::SerializationError(e.to_string()))
}

fn print_records<T: Display>(records: &[T]) {
    for record in records {
        println!("{}", record);
        println!("{}", RECORD_SEPARATOR);
    }
}

// =============================================================================
// CATALOG COMMANDS
// =============================================================================

/// Add a book and persist the catalog.
pub fn cmd_add_book(
    data_dir: &Path,
    json_mode: bool,
    title: &str,
    author: &str,
    isbn: &str,
) -> Result<(), ShelfError> {
    let mut store = CatalogStore::open(data_dir)?;
    let book = store.add_book(title, author, isbn)?.clone();
    store.save()?;

    if json_mode {
        print_json(&to_json(&book)?)?;
    } else {
        println!("Book added successfully! ID: {}", book.book_id);
    }
    Ok(())
}

/// Add a member and persist the catalog.
pub fn cmd_add_member(
    data_dir: &Path,
    json_mode: bool,
    name: &str,
    contact: &str,
) -> Result<(), ShelfError> {
    let mut store = CatalogStore::open(data_dir)?;
    let member = store.add_member(name, contact)?.clone();
    store.save()?;

    if json_mode {
        print_json(&to_json(&member)?)?;
    } else {
        println!("Member added successfully! ID: {}", member.member_id);
    }
    Ok(())
}

/// List one collection.
pub fn cmd_list(data_dir: &Path, json_mode: bool, entity: EntityKind) -> Result<(), ShelfError> {
    let store = CatalogStore::open(data_dir)?;

    if json_mode {
        let value = match entity {
            EntityKind::Books => to_json(store.books())?,
            EntityKind::Members => to_json(store.members())?,
            EntityKind::Transactions => to_json(store.transactions())?,
        };
        return print_json(&value);
    }

    let count = match entity {
        EntityKind::Books => store.books().len(),
        EntityKind::Members => store.members().len(),
        EntityKind::Transactions => store.transactions().len(),
    };
    if count == 0 {
        println!("No {} in the catalog.", entity);
        return Ok(());
    }

    match entity {
        EntityKind::Books => print_records(store.books()),
        EntityKind::Members => print_records(store.members()),
        EntityKind::Transactions => print_records(store.transactions()),
    }
    Ok(())
}

/// Lend a book.
pub fn cmd_borrow(data_dir: &Path, json_mode: bool, book_id: u64, member_id: u64) -> Result<(), ShelfError> {
    let mut store = CatalogStore::open(data_dir)?;
    let transaction = store.borrow(book_id, member_id, &now())?.clone();
    store.save()?;

    if json_mode {
        print_json(&to_json(&transaction)?)?;
    } else {
        println!(
            "Book {} borrowed by member {} (transaction {}).",
            book_id, member_id, transaction.transaction_id
        );
    }
    Ok(())
}

/// Return a book.
pub fn cmd_return(data_dir: &Path, json_mode: bool, book_id: u64, member_id: u64) -> Result<(), ShelfError> {
    let mut store = CatalogStore::open(data_dir)?;
    let closed = store.give_back(book_id, member_id, &now())?;
    store.save()?;

    if json_mode {
        print_json(&serde_json::json!({
            "book_id": book_id,
            "member_id": member_id,
            "transaction_id": closed,
        }))?;
    } else {
        println!("Book {} returned by member {}.", book_id, member_id);
    }
    Ok(())
}

// =============================================================================
// FIELDS COMMAND
// =============================================================================

/// Show sortable field names.
pub fn cmd_fields(json_mode: bool, entity: EntityKind) -> Result<(), ShelfError> {
    let names: Vec<&str> = match entity {
        EntityKind::Books => Book::fields().field_names().collect(),
        EntityKind::Members => Member::fields().field_names().collect(),
        EntityKind::Transactions => Transaction::fields().field_names().collect(),
    };

    if json_mode {
        print_json(&serde_json::json!({ "entity": entity.to_string(), "fields": names }))
    } else {
        println!("Sortable fields for {}:", entity);
        for name in names {
            println!("  {}", name);
        }
        Ok(())
    }
}

// =============================================================================
// SORT COMMAND
// =============================================================================

/// Sort a collection and print it in order.
pub fn cmd_sort(
    data_dir: &Path,
    json_mode: bool,
    entity: EntityKind,
    key: &str,
    algorithm: Algorithm,
    then: Vec<LogicalExpression>,
) -> Result<(), ShelfError> {
    let store = CatalogStore::open(data_dir)?;
    let spec = SortSpec::with_secondary(key, then);

    match entity {
        EntityKind::Books => run_sort(store.books(), Book::fields(), algorithm, &spec, json_mode),
        EntityKind::Members => run_sort(store.members(), Member::fields(), algorithm, &spec, json_mode),
        EntityKind::Transactions => run_sort(
            store.transactions(),
            Transaction::fields(),
            algorithm,
            &spec,
            json_mode,
        ),
    }
}

fn run_sort<T>(
    records: &[T],
    fields: &FieldAccessors<T>,
    algorithm: Algorithm,
    spec: &SortSpec,
    json_mode: bool,
) -> Result<(), ShelfError>
where
    T: Record + Clone + Serialize + Display,
{
    if !fields.contains(&spec.primary_key) {
        return Err(ShelfError::MissingField(format!(
            "'{}' (available: {})",
            spec.primary_key,
            fields.field_names().collect::<Vec<_>>().join(", ")
        )));
    }
    for expression in &spec.secondary {
        for name in [&expression.left, &expression.right] {
            if !fields.contains(name) {
                tracing::warn!(field = %name, "tie-break field not present, evaluates to false");
            }
        }
    }

    let (sorted, elapsed) = sort(algorithm, records, spec)?;

    if json_mode {
        return print_json(&serde_json::json!({
            "algorithm": algorithm.label(),
            "key": spec.primary_key,
            "then": spec.secondary.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "elapsed_ns": elapsed.as_nanos().to_string(),
            "records": to_json(&sorted)?,
        }));
    }

    print_records(&sorted);
    println!(
        "Sorted {} records by '{}' with {} in {:?}",
        sorted.len(),
        spec.primary_key,
        algorithm,
        elapsed
    );
    Ok(())
}

// =============================================================================
// CSV COMMANDS
// =============================================================================

/// Where `export` writes: a bare file name goes into the data directory,
/// anything with a directory component is used as given.
pub fn export_target(data_dir: &Path, output: &Path) -> PathBuf {
    let bare = output
        .parent()
        .is_none_or(|parent| parent.as_os_str().is_empty());
    if bare && !output.is_absolute() {
        data_dir.join(output)
    } else {
        output.to_path_buf()
    }
}

/// Import a CSV file and persist the catalog.
pub fn cmd_import(data_dir: &Path, json_mode: bool, entity: CatalogKind, file: &Path) -> Result<(), ShelfError> {
    let mut store = CatalogStore::open(data_dir)?;
    let ids = match entity {
        CatalogKind::Books => store.import_books_csv(file)?,
        CatalogKind::Members => store.import_members_csv(file)?,
    };
    store.save()?;

    if json_mode {
        print_json(&serde_json::json!({
            "entity": entity.to_string(),
            "imported": ids.len(),
            "ids": ids,
        }))
    } else {
        match (ids.first(), ids.last()) {
            (Some(first), Some(last)) => println!(
                "Imported {} {} from {} (IDs {}-{}).",
                ids.len(),
                entity,
                file.display(),
                first,
                last
            ),
            _ => println!("No {} found in {}.", entity, file.display()),
        }
        Ok(())
    }
}

/// Export one collection to CSV.
pub fn cmd_export(data_dir: &Path, json_mode: bool, entity: CatalogKind, output: &Path) -> Result<(), ShelfError> {
    let store = CatalogStore::open(data_dir)?;
    let target = export_target(data_dir, output);
    let count = match entity {
        CatalogKind::Books => {
            store.export_books_csv(&target)?;
            store.books().len()
        }
        CatalogKind::Members => {
            store.export_members_csv(&target)?;
            store.members().len()
        }
    };

    if json_mode {
        print_json(&serde_json::json!({
            "entity": entity.to_string(),
            "exported": count,
            "path": target.display().to_string(),
        }))
    } else {
        println!("Exported {} {} to {}.", count, entity, target.display());
        Ok(())
    }
}

// =============================================================================
// BENCH COMMAND
// =============================================================================

/// `sizes` with repeats removed, first occurrence kept.
pub fn distinct_sizes(sizes: &[usize]) -> Vec<usize> {
    let mut seen = BTreeSet::new();
    sizes.iter().copied().filter(|size| seen.insert(*size)).collect()
}

/// Run the benchmark matrix on synthetic data, print the report and export
/// the chart. A failed export is reported after the results are printed.
pub fn cmd_bench(
    json_mode: bool,
    target: CatalogKind,
    sizes: &[usize],
    with_secondary: bool,
    chart_path: &Path,
) -> Result<(), ShelfError> {
    let mut rng = rand::thread_rng();
    let mut analyzer = PerformanceAnalyzer::new();
    let sizes = distinct_sizes(sizes);

    let (primary_key, tie_break) = match target {
        CatalogKind::Books => ("title", LogicalExpression::and("available", "available")),
        CatalogKind::Members => ("name", LogicalExpression::and("has_loans", "has_loans")),
    };
    let secondary = if with_secondary { vec![tie_break] } else { Vec::new() };

    tracing::info!(?sizes, secondary = with_secondary, "starting benchmark");
    match target {
        CatalogKind::Books => analyzer.run_benchmark(
            &Algorithm::ALL,
            &sizes,
            |n| Ok::<_, ShelfError>(generator::books(&mut rng, n)),
            primary_key,
            &secondary,
        ),
        CatalogKind::Members => analyzer.run_benchmark(
            &Algorithm::ALL,
            &sizes,
            |n| Ok::<_, ShelfError>(generator::members(&mut rng, n)),
            primary_key,
            &secondary,
        ),
    };

    let table = analyzer.table();
    let aggregates = analyzer.aggregate();
    let complexity = complexity_report();
    let mut sink = JsonChartSink::new(chart_path);

    if json_mode {
        let exported = analyzer.export_visualization(&mut sink);
        print_json(&serde_json::json!({
            "results": to_json(table.results())?,
            "skipped": to_json(table.skipped())?,
            "failures": to_json(table.failures())?,
            "aggregates": to_json(&aggregates)?,
            "complexity": to_json(&complexity)?,
            "chart": exported.as_ref().ok().map(|artifact| artifact.as_str()),
            "chart_error": exported.as_ref().err().map(ToString::to_string),
        }))?;
        return exported.map(|_| ());
    }

    println!("Performance Analysis Results");
    println!("============================");
    for &size in &sizes {
        println!();
        println!("Data Size: {}", size);
        for result in table.for_size(size) {
            println!("  {}: {:?}", result.label(), result.elapsed);
        }
    }

    for skipped in table.skipped() {
        println!("Skipped size {}: {}", skipped.size, skipped.reason);
    }
    for failed in table.failures() {
        println!(
            "Failed {} on {} records: {}",
            failed.algorithm, failed.record_count, failed.error
        );
    }

    println!();
    println!("Mean Execution Time");
    println!("===================");
    for agg in &aggregates {
        println!(
            "  {:<45} n={:<6} {:?} ({} runs)",
            if agg.secondary {
                format!("{}{}", agg.algorithm, WITH_SECONDARY_SUFFIX)
            } else {
                agg.algorithm.to_string()
            },
            agg.record_count,
            agg.mean,
            agg.runs
        );
    }

    println!();
    println!("Time Complexity");
    println!("===============");
    for (label, order) in &complexity {
        println!("  {}: {}", label, order);
    }

    let artifact = analyzer.export_visualization(&mut sink)?;
    println!();
    println!("Chart data written to {}", artifact);
    Ok(())
}
