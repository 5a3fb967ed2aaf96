//! Loan records.
//!
//! A loan opens as `Borrowed` and closes once, when the book comes back.

use crate::{FieldAccessors, FieldValue, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Lifecycle of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// The book is out.
    #[default]
    Borrowed,
    /// The book came back.
    Returned,
}

impl LoanStatus {
    /// Lowercase status name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LoanStatus::Borrowed => "borrowed",
            LoanStatus::Returned => "returned",
        }
    }
}

/// A loan of one book to one member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Loan identifier.
    pub transaction_id: u64,
    /// Book on loan.
    pub book_id: u64,
    /// Borrowing member.
    pub member_id: u64,
    /// RFC 3339 timestamp of the loan.
    pub borrow_date: String,
    /// RFC 3339 timestamp of the return, once returned.
    #[serde(default)]
    pub return_date: Option<String>,
    /// Current state.
    #[serde(default)]
    pub status: LoanStatus,
}

impl Transaction {
    /// Open a new loan.
    #[must_use]
    pub fn new(transaction_id: u64, book_id: u64, member_id: u64, borrow_date: impl Into<String>) -> Self {
        Self {
            transaction_id,
            book_id,
            member_id,
            borrow_date: borrow_date.into(),
            return_date: None,
            status: LoanStatus::Borrowed,
        }
    }

    /// Whether the loan is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == LoanStatus::Borrowed
    }

    /// Close the loan.
    pub fn complete_return(&mut self, return_date: impl Into<String>) {
        self.return_date = Some(return_date.into());
        self.status = LoanStatus::Returned;
    }

    /// Sortable fields of a loan. `returned` is derived from the status.
    pub fn fields() -> &'static FieldAccessors<Transaction> {
        static FIELDS: OnceLock<FieldAccessors<Transaction>> = OnceLock::new();
        FIELDS.get_or_init(|| {
            FieldAccessors::<Transaction>::new()
                .with("transaction_id", |t| FieldValue::from(t.transaction_id))
                .with("book_id", |t| FieldValue::from(t.book_id))
                .with("member_id", |t| FieldValue::from(t.member_id))
                .with("borrow_date", |t| FieldValue::from(t.borrow_date.as_str()))
                .with("status", |t| FieldValue::from(t.status.as_str()))
                .with("returned", |t| FieldValue::Bool(t.status == LoanStatus::Returned))
        })
    }
}

impl Record for Transaction {
    fn field(&self, name: &str) -> Option<FieldValue> {
        Self::fields().get(self, name)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " Transaction ID: {}", self.transaction_id)?;
        writeln!(f, " Book ID: {}", self.book_id)?;
        writeln!(f, " Member ID: {}", self.member_id)?;
        writeln!(f, " Borrowed: {}", self.borrow_date)?;
        writeln!(
            f,
            " Returned: {}",
            self.return_date.as_deref().unwrap_or("-")
        )?;
        write!(f, " Status: {}", self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_closes_the_loan() {
        let mut loan = Transaction::new(1, 7, 3, "2026-01-02T10:00:00Z");
        assert!(loan.is_open());
        assert_eq!(loan.field("returned"), Some(FieldValue::Bool(false)));

        loan.complete_return("2026-01-09T10:00:00Z");
        assert!(!loan.is_open());
        assert_eq!(loan.return_date.as_deref(), Some("2026-01-09T10:00:00Z"));
        assert_eq!(loan.field("status"), Some(FieldValue::from("returned")));
        assert_eq!(loan.field("returned"), Some(FieldValue::Bool(true)));
    }
}
