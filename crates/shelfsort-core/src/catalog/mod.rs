//! # Catalog Module
//!
//! Book, member and loan records, each exposing its fields to the sorting
//! engine through a static accessor table, plus field validation for
//! user-supplied input.
//!
//! Persistence lives in the application crate; these types only carry data.

mod book;
mod member;
mod transaction;
pub mod validate;

pub use book::Book;
pub use member::Member;
pub use transaction::{LoanStatus, Transaction};

/// Keep at most `max` characters of `s`.
fn truncate_chars(s: String, max: usize) -> String {
    if s.chars().count() <= max {
        s
    } else {
        s.chars().take(max).collect()
    }
}
