//! Catalog books.
//!
//! Title and author limits apply on every construction path, including
//! deserialization.

use super::truncate_chars;
use crate::primitives::{MAX_AUTHOR_LENGTH, MAX_TITLE_LENGTH};
use crate::{FieldAccessors, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredBook")]
pub struct Book {
    /// Catalog identifier.
    pub book_id: u64,
    /// Title, at most 100 characters.
    pub title: String,
    /// Author, at most 50 characters.
    pub author: String,
    /// ISBN-10 or ISBN-13 as entered.
    pub isbn: String,
    /// Whether the book is on the shelf.
    pub available: bool,
}

/// Wire form of a [`Book`] before limits are applied.
#[derive(Deserialize)]
struct StoredBook {
    book_id: u64,
    title: String,
    author: String,
    isbn: String,
    #[serde(default = "on_shelf")]
    available: bool,
}

fn on_shelf() -> bool {
    true
}

impl From<StoredBook> for Book {
    fn from(stored: StoredBook) -> Self {
        Book::new(stored.book_id, stored.title, stored.author, stored.isbn)
            .with_availability(stored.available)
    }
}

impl Book {
    /// Create an available book, truncating over-long title and author.
    #[must_use]
    pub fn new(
        book_id: u64,
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: impl Into<String>,
    ) -> Self {
        Self {
            book_id,
            title: truncate_chars(title.into(), MAX_TITLE_LENGTH),
            author: truncate_chars(author.into(), MAX_AUTHOR_LENGTH),
            isbn: isbn.into(),
            available: true,
        }
    }

    /// Builder-style availability override.
    #[must_use]
    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sortable fields of a book.
    pub fn fields() -> &'static FieldAccessors<Book> {
        static FIELDS: OnceLock<FieldAccessors<Book>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            FieldAccessors::<Book>::new()
                .with("book_id", |b| FieldValue::from(b.book_id))
                .with("title", |b| FieldValue::from(b.title.as_str()))
                .with("author", |b| FieldValue::from(b.author.as_str()))
                .with("isbn", |b| FieldValue::from(b.isbn.as_str()))
                .with("available", |b| FieldValue::Bool(b.available))
        })
    }
}

impl Record for Book {
    fn field(&self, name: &str) -> Option<FieldValue> {
        Self::fields().get(self, name)
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " ID: {}", self.book_id)?;
        writeln!(f, " Title: {}", self.title)?;
        writeln!(f, " Author: {}", self.author)?;
        writeln!(f, " ISBN: {}", self.isbn)?;
        write!(
            f,
            " Status: {}",
            if self.available {
                "Available"
            } else {
                "Not Available"
            }
        )
    }
}
