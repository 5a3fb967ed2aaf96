//! # Tie-Break Comparator
//!
//! Decides the order of two records: primary key first, then the secondary
//! expressions in declared order. The first expression that evaluates
//! differently on the two records decides, and the record for which it is
//! `true` sorts first.
//!
//! When everything agrees the records are `Equal`; keeping their input order
//! is the sort algorithm's job.

use crate::{LogicalExpression, Record, ShelfError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A primary key plus ordered secondary tie-break expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field used for the main ordering.
    pub primary_key: String,
    /// Tie-breakers, evaluated left to right.
    pub secondary: Vec<LogicalExpression>,
}

impl SortSpec {
    /// Sort by `primary_key` only.
    #[must_use]
    pub fn new(primary_key: impl Into<String>) -> Self {
        Self {
            primary_key: primary_key.into(),
            secondary: Vec::new(),
        }
    }

    /// Sort by `primary_key`, breaking ties with `secondary`.
    #[must_use]
    pub fn with_secondary(primary_key: impl Into<String>, secondary: Vec<LogicalExpression>) -> Self {
        Self {
            primary_key: primary_key.into(),
            secondary,
        }
    }

    /// Append a tie-break expression.
    #[must_use]
    pub fn then(mut self, expression: LogicalExpression) -> Self {
        self.secondary.push(expression);
        self
    }

    /// Whether any tie-break expression is declared.
    #[must_use]
    pub fn has_secondary(&self) -> bool {
        !self.secondary.is_empty()
    }
}

/// Compare `a` and `b` under `spec`.
///
/// # Errors
/// `ShelfError::KeyError` if the primary key is missing on either record or
/// its values are not mutually comparable.
pub fn compare<R: Record + ?Sized>(a: &R, b: &R, spec: &SortSpec) -> Result<Ordering, ShelfError> {
    let primary = compare_primary(a, b, &spec.primary_key)?;
    if primary != Ordering::Equal {
        return Ok(primary);
    }

    for expression in &spec.secondary {
        match (expression.evaluate(a), expression.evaluate(b)) {
            (true, false) => return Ok(Ordering::Less),
            (false, true) => return Ok(Ordering::Greater),
            _ => {}
        }
    }

    Ok(Ordering::Equal)
}

fn compare_primary<R: Record + ?Sized>(a: &R, b: &R, key: &str) -> Result<Ordering, ShelfError> {
    let left = a
        .field(key)
        .ok_or_else(|| ShelfError::key_error(key, "field missing on record"))?;
    let right = b
        .field(key)
        .ok_or_else(|| ShelfError::key_error(key, "field missing on record"))?;

    left.try_cmp(&right).ok_or_else(|| {
        ShelfError::key_error(
            key,
            format!(
                "cannot compare {} with {}",
                left.type_name(),
                right.type_name()
            ),
        )
    })
}

// =============================================================================
// TESTS
// =============================================================================
