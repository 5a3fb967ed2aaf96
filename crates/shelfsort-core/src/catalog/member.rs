//! Library members and the books they hold.

use crate::{FieldAccessors, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A registered library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Membership identifier.
    pub member_id: u64,
    /// Full name.
    pub name: String,
    /// Email address or 10-digit phone number.
    pub contact: String,
    /// Ids of books currently on loan, in borrow order.
    #[serde(default)]
    pub borrowed_books: Vec<u64>,
}

impl Member {
    /// Create a member with no loans.
    #[must_use]
    pub fn new(member_id: u64, name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            member_id,
            name: name.into(),
            contact: contact.into(),
            borrowed_books: Vec::new(),
        }
    }

    /// Record a loan. Returns `false` if the book was already on loan to this member.
    pub fn borrow(&mut self, book_id: u64) -> bool {
        if self.borrowed_books.contains(&book_id) {
            return false;
        }
        self.borrowed_books.push(book_id);
        true
    }

    /// Clear a loan. Returns `false` if the member did not hold the book.
    pub fn give_back(&mut self, book_id: u64) -> bool {
        let before = self.borrowed_books.len();
        self.borrowed_books.retain(|&id| id != book_id);
        self.borrowed_books.len() != before
    }

    /// Whether the member holds `book_id`.
    #[must_use]
    pub fn holds(&self, book_id: u64) -> bool {
        self.borrowed_books.contains(&book_id)
    }

    /// Sortable fields of a member. `borrowed_count` and `has_loans` are derived.
    pub fn fields() -> &'static FieldAccessors<Member> {
        static FIELDS: OnceLock<FieldAccessors<Member>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            FieldAccessors::<Member>::new()
                .with("member_id", |m| FieldValue::from(m.member_id))
                .with("name", |m| FieldValue::from(m.name.as_str()))
                .with("contact", |m| FieldValue::from(m.contact.as_str()))
                .with("borrowed_count", |m| FieldValue::from(m.borrowed_books.len()))
                .with("has_loans", |m| FieldValue::Bool(!m.borrowed_books.is_empty()))
        })
    }
}

impl Record for Member {
    fn field(&self, name: &str) -> Option<FieldValue> {
        Self::fields().get(self, name)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " ID: {}", self.member_id)?;
        writeln!(f, " Name: {}", self.name)?;
        writeln!(f, " Contact: {}", self.contact)?;
        write!(f, " Books Borrowed: {}", self.borrowed_books.len())
    }
}
