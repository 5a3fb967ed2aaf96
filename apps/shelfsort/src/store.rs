//! # Catalog Store
//!
//! Flat JSON persistence for books, members and loans.
//!
//! Each collection lives in its own pretty-printed JSON array under the data
//! directory. Missing files load as empty collections. Mutations change the
//! in-memory catalog only; call [`CatalogStore::save`] to persist.
//!
//! Books and members can also be bulk-loaded from and written to CSV (see
//! [`crate::csv_io`]).

use crate::csv_io::{self, BookImportRow, MemberImportRow};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shelfsort_core::catalog::validate::{
    validate_author, validate_contact, validate_isbn, validate_name, validate_title,
};
use shelfsort_core::{Book, Member, ShelfError, Transaction};
use std::path::{Path, PathBuf};

/// Books file name inside the data directory.
pub const BOOKS_FILE: &str = "books.json";

/// Members file name inside the data directory.
pub const MEMBERS_FILE: &str = "members.json";

/// Transactions file name inside the data directory.
pub const TRANSACTIONS_FILE: &str = "transactions.json";

/// Maximum size of a single catalog file (100 MB).
const MAX_CATALOG_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// In-memory catalog bound to a data directory.
#[derive(Debug)]
pub struct CatalogStore {
    dir: PathBuf,
    books: Vec<Book>,
    members: Vec<Member>,
    transactions: Vec<Transaction>,
}

impl CatalogStore {
    /// Open the catalog in `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ShelfError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| ShelfError::IoError(format!("Create {}: {}", dir.display(), e)))?;

        let store = Self {
            books: load_json(&dir.join(BOOKS_FILE))?,
            members: load_json(&dir.join(MEMBERS_FILE))?,
            transactions: load_json(&dir.join(TRANSACTIONS_FILE))?,
            dir,
        };

        tracing::debug!(
            books = store.books.len(),
            members = store.members.len(),
            transactions = store.transactions.len(),
            "catalog loaded from {}",
            store.dir.display()
        );
        Ok(store)
    }

    /// Write all three collections back to disk.
    pub fn save(&self) -> Result<(), ShelfError> {
        save_json(&self.dir.join(BOOKS_FILE), &self.books)?;
        save_json(&self.dir.join(MEMBERS_FILE), &self.members)?;
        save_json(&self.dir.join(TRANSACTIONS_FILE), &self.transactions)
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All books.
    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All members.
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// All loans, open and closed.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Validate and add a book. The id is one past the current maximum.
    pub fn add_book(&mut self, title: &str, author: &str, isbn: &str) -> Result<&Book, ShelfError> {
        validate_title(title)?;
        validate_author(author)?;
        validate_isbn(isbn)?;

        let id = next_id(self.books.iter().map(|b| b.book_id));
        self.books.push(Book::new(id, title, author, isbn));
        tracing::info!(book_id = id, "book added");
        self.books
            .last()
            .ok_or_else(|| ShelfError::NotFound(format!("book {}", id)))
    }

    /// Validate and add a member. The id is one past the current maximum.
    pub fn add_member(&mut self, name: &str, contact: &str) -> Result<&Member, ShelfError> {
        validate_name(name)?;
        validate_contact(contact)?;

        let id = next_id(self.members.iter().map(|m| m.member_id));
        self.members.push(Member::new(id, name, contact));
        tracing::info!(member_id = id, "member added");
        self.members
            .last()
            .ok_or_else(|| ShelfError::NotFound(format!("member {}", id)))
    }

    /// Lend `book_id` to `member_id`, opening a loan dated `date`.
    ///
    /// # Errors
    /// - `NotFound` if either id is unknown
    /// - `Conflict` if the book is already out
    pub fn borrow(&mut self, book_id: u64, member_id: u64, date: &str) -> Result<&Transaction, ShelfError> {
        let book_idx = self.book_index(book_id)?;
        let member_idx = self.member_index(member_id)?;

        if !self.books[book_idx].available {
            return Err(ShelfError::Conflict(format!(
                "book {} is not available for borrowing",
                book_id
            )));
        }

        let id = next_id(self.transactions.iter().map(|t| t.transaction_id));
        self.transactions
            .push(Transaction::new(id, book_id, member_id, date));
        self.books[book_idx].available = false;
        self.members[member_idx].borrow(book_id);

        tracing::info!(transaction_id = id, book_id, member_id, "book borrowed");
        self.transactions
            .last()
            .ok_or_else(|| ShelfError::NotFound(format!("transaction {}", id)))
    }

    /// Take `book_id` back from `member_id`.
    ///
    /// Closes the matching open loan if there is one and returns its id.
    ///
    /// # Errors
    /// - `NotFound` if either id is unknown
    /// - `Conflict` if the member does not hold the book
    pub fn give_back(&mut self, book_id: u64, member_id: u64, date: &str) -> Result<Option<u64>, ShelfError> {
        let book_idx = self.book_index(book_id)?;
        let member_idx = self.member_index(member_id)?;

        if !self.members[member_idx].give_back(book_id) {
            return Err(ShelfError::Conflict(format!(
                "member {} has not borrowed book {}",
                member_id, book_id
            )));
        }
        self.books[book_idx].available = true;

        let closed = self
            .transactions
            .iter_mut()
            .find(|t| t.book_id == book_id && t.member_id == member_id && t.is_open())
            .map(|t| {
                t.complete_return(date);
                t.transaction_id
            });

        if closed.is_none() {
            tracing::warn!(book_id, member_id, "no open loan found for returned book");
        }
        tracing::info!(book_id, member_id, "book returned");
        Ok(closed)
    }

    /// Validate every row, then append them all with ids continuing past the
    /// current maximum. Nothing is added if any row is invalid.
    ///
    /// Returns the new ids in row order.
    pub fn import_books(&mut self, rows: &[BookImportRow]) -> Result<Vec<u64>, ShelfError> {
        for (line, row) in data_lines(rows) {
            validate_title(&row.title)
                .and_then(|()| validate_author(&row.author))
                .and_then(|()| validate_isbn(&row.isbn))
                .map_err(|e| at_line(line, e))?;
        }

        let first = next_id(self.books.iter().map(|b| b.book_id));
        let ids: Vec<u64> = (first..).take(rows.len()).collect();
        for (&id, row) in ids.iter().zip(rows) {
            self.books.push(
                Book::new(id, &row.title, &row.author, &row.isbn)
                    .with_availability(row.available.unwrap_or(true)),
            );
        }
        tracing::info!(count = ids.len(), first_id = first, "books imported");
        Ok(ids)
    }

    /// Member counterpart of [`CatalogStore::import_books`].
    pub fn import_members(&mut self, rows: &[MemberImportRow]) -> Result<Vec<u64>, ShelfError> {
        for (line, row) in data_lines(rows) {
            validate_name(&row.name)
                .and_then(|()| validate_contact(&row.contact))
                .map_err(|e| at_line(line, e))?;
        }

        let first = next_id(self.members.iter().map(|m| m.member_id));
        let ids: Vec<u64> = (first..).take(rows.len()).collect();
        for (&id, row) in ids.iter().zip(rows) {
            self.members.push(Member::new(id, &row.name, &row.contact));
        }
        tracing::info!(count = ids.len(), first_id = first, "members imported");
        Ok(ids)
    }

    /// Read a books CSV and import it.
    pub fn import_books_csv(&mut self, path: &Path) -> Result<Vec<u64>, ShelfError> {
        let rows = csv_io::read_books(path)?;
        self.import_books(&rows)
    }

    /// Read a members CSV and import it.
    pub fn import_members_csv(&mut self, path: &Path) -> Result<Vec<u64>, ShelfError> {
        let rows = csv_io::read_members(path)?;
        self.import_members(&rows)
    }

    /// Write all books to a CSV file.
    pub fn export_books_csv(&self, path: &Path) -> Result<(), ShelfError> {
        csv_io::write_books(path, &self.books)?;
        tracing::info!(count = self.books.len(), "books exported to {}", path.display());
        Ok(())
    }

    /// Write all members to a CSV file.
    pub fn export_members_csv(&self, path: &Path) -> Result<(), ShelfError> {
        csv_io::write_members(path, &self.members)?;
        tracing::info!(count = self.members.len(), "members exported to {}", path.display());
        Ok(())
    }

    fn book_index(&self, book_id: u64) -> Result<usize, ShelfError> {
        self.books
            .iter()
            .position(|b| b.book_id == book_id)
            .ok_or_else(|| ShelfError::NotFound(format!("book {}", book_id)))
    }

    fn member_index(&self, member_id: u64) -> Result<usize, ShelfError> {
        self.members
            .iter()
            .position(|m| m.member_id == member_id)
            .ok_or_else(|| ShelfError::NotFound(format!("member {}", member_id)))
    }
}

fn next_id(ids: impl Iterator<Item = u64>) -> u64 {
    ids.max().map_or(1, |max| max.saturating_add(1))
}

/// Rows paired with their line number in the file (the header is line 1).
fn data_lines<T>(rows: &[T]) -> impl Iterator<Item = (usize, &T)> {
    rows.iter().enumerate().map(|(i, row)| (i + 2, row))
}

fn at_line(line: usize, error: ShelfError) -> ShelfError {
    match error {
        ShelfError::Validation(reason) => ShelfError::Validation(format!("row {}: {}", line, reason)),
        other => other,
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ShelfError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| ShelfError::IoError(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_CATALOG_FILE_SIZE {
        return Err(ShelfError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_CATALOG_FILE_SIZE
        )));
    }

    let data = std::fs::read(path)
        .map_err(|e| ShelfError::IoError(format!("Read {}: {}", path.display(), e)))?;
    serde_json::from_slice(&data)
        .map_err(|e| ShelfError::SerializationError(format!("Parse {}: {}", path.display(), e)))
}

fn save_json<T: Serialize>(path: &Path, items: &[T]) -> Result<(), ShelfError> {
    let json = serde_json::to_string_pretty(items)
        .map_err(|e| ShelfError::SerializationError(e.to_string()))?;
    std::fs::write(path, json)
        .map_err(|e| ShelfError::IoError(format!("Write {}: {}", path.display(), e)))
}
