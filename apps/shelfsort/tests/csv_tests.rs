//! Integration tests for CSV import and export.

#![allow(clippy::unwrap_used, clippy::panic)]

use shelfsort::csv_io::{read_books, read_members};
use shelfsort::store::CatalogStore;
use shelfsort_core::ShelfError;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// IMPORT
// =============================================================================

#[test]
fn test_import_numbers_past_existing_ids() {
    let dir = TempDir::new().unwrap();
    let mut store = CatalogStore::open(dir.path().join("data")).unwrap();
    store.add_book("Dune", "Frank Herbert", "0441013597").unwrap();
    store.add_book("Emma", "Jane Austen", "0141439580").unwrap();

    let input = write(
        &dir,
        "books.csv",
        "book_id,title,author,isbn,available\n\
         1,Ulysses,James Joyce,9780199535675,False\n\
         1,Middlemarch,George Eliot,0141439548,\n",
    );
    let ids = store.import_books_csv(&input).unwrap();

    assert_eq!(ids, vec![3, 4]);
    let ulysses = &store.books()[2];
    assert_eq!(ulysses.title, "Ulysses");
    assert!(!ulysses.available);
    assert!(store.books()[3].available);
}

#[test]
fn test_invalid_row_rejects_whole_file() {
    let dir = TempDir::new().unwrap();
    let mut store = CatalogStore::open(dir.path().join("data")).unwrap();

    let input = write(
        &dir,
        "members.csv",
        "name,contact\n\
         Ada Lovelace,ada@example.com\n\
         Alan Turing,not-a-contact\n",
    );
    let err = store.import_members_csv(&input).unwrap_err();

    match err {
        ShelfError::Validation(reason) => assert!(reason.starts_with("row 3:"), "{}", reason),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(store.members().is_empty());
}

#[test]
fn test_missing_column_or_file_is_error() {
    let dir = TempDir::new().unwrap();
    let input = write(&dir, "books.csv", "title,author\nDune,Frank Herbert\n");

    assert!(matches!(read_books(&input), Err(ShelfError::SerializationError(_))));
    assert!(matches!(
        read_members(&dir.path().join("absent.csv")),
        Err(ShelfError::IoError(_))
    ));
}

#[test]
fn test_import_rejects_overlong_title() {
    let dir = TempDir::new().unwrap();
    let mut store = CatalogStore::open(dir.path().join("data")).unwrap();
    let input = write(
        &dir,
        "books.csv",
        &format!("title,author,isbn\n{},Jane Austen,0141439580\n", "T".repeat(140)),
    );

    let err = store.import_books_csv(&input).unwrap_err();
    assert!(matches!(err, ShelfError::Validation(ref reason) if reason.starts_with("row 2:")));
    assert!(store.books().is_empty());
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[test]
fn test_export_then_import_into_fresh_catalog() {
    let dir = TempDir::new().unwrap();
    let mut source = CatalogStore::open(dir.path().join("source")).unwrap();
    source.add_book("Dune", "Frank Herbert", "0441013597").unwrap();
    source.add_book("Emma", "Jane Austen", "978-0-14-143958-7").unwrap();
    source.add_member("Ada Lovelace", "ada@example.com").unwrap();
    source.borrow(2, 1, "2026-01-01").unwrap();

    let books_csv = dir.path().join("export").join("books.csv");
    let members_csv = dir.path().join("export").join("members.csv");
    source.export_books_csv(&books_csv).unwrap();
    source.export_members_csv(&members_csv).unwrap();

    let members_text = std::fs::read_to_string(&members_csv).unwrap();
    assert!(members_text.starts_with("member_id,name,contact,borrowed_books\n"));
    assert!(members_text.contains("1,Ada Lovelace,ada@example.com,2"));

    let mut target = CatalogStore::open(dir.path().join("target")).unwrap();
    target.import_books_csv(&books_csv).unwrap();
    target.import_members_csv(&members_csv).unwrap();
    target.save().unwrap();

    let reopened = CatalogStore::open(dir.path().join("target")).unwrap();
    assert_eq!(reopened.books(), source.books());
    assert_eq!(reopened.members().len(), 1);
    assert_eq!(reopened.members()[0].name, "Ada Lovelace");
    assert!(reopened.members()[0].borrowed_books.is_empty());
}
