//! # CSV Transfer
//!
//! Bulk import and export of books and members.
//!
//! ## Columns
//!
//! - Books in: `title`, `author`, `isbn`, optional `available`
//! - Members in: `name`, `contact`
//! - Books out: `book_id`, `title`, `author`, `isbn`, `available`
//! - Members out: `member_id`, `name`, `contact`, `borrowed_books`
//!   (comma-joined ids)
//!
//! Unknown columns are ignored on import. Ids in an import file are not
//! read; the store assigns new ones.

use serde::{Deserialize, Deserializer, Serialize};
use shelfsort_core::{Book, Member, ShelfError};
use std::path::Path;

/// Maximum size of a CSV file accepted for import (100 MB).
const MAX_CSV_FILE_SIZE: u64 = 100 * 1024 * 1024;

// =============================================================================
// ROW TYPES
// =============================================================================

/// One book row of an import file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookImportRow {
    /// Book title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// ISBN as written in the file.
    pub isbn: String,
    /// Shelf status; blank or absent means available.
    #[serde(default, deserialize_with = "loose_bool")]
    pub available: Option<bool>,
}

/// One member row of an import file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberImportRow {
    /// Member name.
    pub name: String,
    /// Email or phone number.
    pub contact: String,
}

#[derive(Serialize)]
struct MemberExportRow<'a> {
    member_id: u64,
    name: &'a str,
    contact: &'a str,
    borrowed_books: String,
}

/// Accepts `true`/`false`, `yes`/`no` and `1`/`0` in any case.
fn loose_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => match value.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "'{}' is not a boolean",
                other
            ))),
        },
    }
}

// =============================================================================
// IMPORT
// =============================================================================

fn read_rows<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, ShelfError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        ShelfError::IoError(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    if metadata.len() > MAX_CSV_FILE_SIZE {
        return Err(ShelfError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_CSV_FILE_SIZE
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ShelfError::IoError(format!("Open {}: {}", path.display(), e)))?;

    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|e| ShelfError::SerializationError(format!("{}: {}", path.display(), e)))?;

    tracing::debug!(rows = rows.len(), "read {}", path.display());
    Ok(rows)
}

/// Read book rows from `path`.
pub fn read_books(path: &Path) -> Result<Vec<BookImportRow>, ShelfError> {
    read_rows(path)
}

/// Read member rows from `path`.
pub fn read_members(path: &Path) -> Result<Vec<MemberImportRow>, ShelfError> {
    read_rows(path)
}

// =============================================================================
// EXPORT
// =============================================================================

fn writer(path: &Path) -> Result<csv::Writer<std::fs::File>, ShelfError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ShelfError::IoError(format!("Create {}: {}", parent.display(), e)))?;
    }
    csv::Writer::from_path(path)
        .map_err(|e| ShelfError::IoError(format!("Create {}: {}", path.display(), e)))
}

fn finish(mut writer: csv::Writer<std::fs::File>, path: &Path) -> Result<(), ShelfError> {
    writer
        .flush()
        .map_err(|e| ShelfError::IoError(format!("Write {}: {}", path.display(), e)))
}

/// Write `books` to `path`, one row per book.
pub fn write_books(path: &Path, books: &[Book]) -> Result<(), ShelfError> {
    let mut out = writer(path)?;
    for book in books {
        out.serialize(book)
            .map_err(|e| ShelfError::SerializationError(e.to_string()))?;
    }
    finish(out, path)
}

/// Write `members` to `path`, one row per member.
pub fn write_members(path: &Path, members: &[Member]) -> Result<(), ShelfError> {
    let mut out = writer(path)?;
    for member in members {
        let borrowed_books = member
            .borrowed_books
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        out.serialize(MemberExportRow {
            member_id: member.member_id,
            name: &member.name,
            contact: &member.contact,
            borrowed_books,
        })
        .map_err(|e| ShelfError::SerializationError(e.to_string()))?;
    }
    finish(out, path)
}
