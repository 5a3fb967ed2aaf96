//! # Core Type Definitions
//!
//! This module contains the value and error types shared by every part of
//! the engine:
//! - Field values (`FieldValue`)
//! - Error types (`ShelfError`)
//!
//! ## Ordering Guarantees
//!
//! - Values of the same variant are totally ordered
//! - Values of different variants are never comparable; the comparator
//!   reports this as a key error instead of inventing an order

use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

// =============================================================================
// FIELD VALUES
// =============================================================================

/// A single named field read from a record.
///
/// Integers compare numerically, text lexicographically (byte order),
/// booleans with `false < true`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    /// Signed integer (identifiers, counts).
    Int(i64),
    /// Text (titles, names, ISBNs).
    Text(String),
    /// Boolean flag (availability, loan state).
    Bool(bool),
}

impl FieldValue {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Int(_) => "int",
            FieldValue::Text(_) => "text",
            FieldValue::Bool(_) => "bool",
        }
    }

    /// The value as a boolean, if it holds one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Compare two values of the same variant.
    ///
    /// Returns `None` when the variants differ.
    #[must_use]
    pub fn try_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

/// Identifiers are stored as `u64`; values past `i64::MAX` saturate.
impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for FieldValue {
    fn from(value: usize) -> Self {
        FieldValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Text(v) => write!(f, "{}", v),
            FieldValue::Bool(v) => write!(f, "{}", v),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in shelfsort.
///
/// - No silent failures
/// - Use `Result<T, ShelfError>` for fallible operations
/// - A `KeyError` aborts a single sort invocation, never a whole session
#[derive(Debug, Error)]
pub enum ShelfError {
    /// The primary sort key is missing or not comparable across records.
    #[error("Key error on '{key}': {reason}")]
    KeyError {
        /// The primary key that failed.
        key: String,
        /// Why the comparison could not be made.
        reason: String,
    },

    /// A requested field does not exist on the record type.
    #[error("Field not found: {0}")]
    MissingField(String),

    /// A logical expression could not be parsed.
    #[error("Invalid logical expression: {0}")]
    InvalidExpression(String),

    /// An algorithm name did not match any known algorithm.
    #[error("Unknown sorting algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Input failed field validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A referenced catalog entry does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The requested operation conflicts with the current catalog state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Visualization was requested before any benchmark ran.
    #[error("No benchmark data to visualize")]
    NoBenchmarkData,

    /// A visualization sink failed to produce its artifact.
    #[error("Render error: {0}")]
    Render(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration could not be loaded or parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShelfError {
    /// Build a `KeyError` for the given key.
    pub fn key_error(key: &str, reason: impl Into<String>) -> Self {
        ShelfError::KeyError {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
