//! # Logical Expression Evaluator
//!
//! Boolean combinators over two named fields of a record, used only to break
//! primary-key ties.
//!
//! - Closed operator set: AND, OR, IMPLIES
//! - A missing or non-boolean field evaluates to `false`, never an error

use crate::{Record, ShelfError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical combinators available to secondary expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOperator {
    /// p ∧ q
    And,
    /// p ∨ q
    Or,
    /// ¬p ∨ q
    Implies,
}

impl LogicalOperator {
    /// Apply the operator to two truth values.
    #[must_use]
    pub const fn apply(self, p: bool, q: bool) -> bool {
        match self {
            LogicalOperator::And => p && q,
            LogicalOperator::Or => p || q,
            LogicalOperator::Implies => !p || q,
        }
    }

    /// Lowercase operator name as used in the textual expression form.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LogicalOperator::And => "and",
            LogicalOperator::Or => "or",
            LogicalOperator::Implies => "implies",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalOperator {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "and" => Ok(LogicalOperator::And),
            "or" => Ok(LogicalOperator::Or),
            "implies" => Ok(LogicalOperator::Implies),
            other => Err(ShelfError::InvalidExpression(format!(
                "unknown operator '{}' (expected and, or, implies)",
                other
            ))),
        }
    }
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// A secondary tie-break expression: `operator(left, right)`.
///
/// Textual form is `operator:left:right`, e.g. `and:available:available`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalExpression {
    /// The combinator.
    pub operator: LogicalOperator,
    /// Field name supplying `p`.
    pub left: String,
    /// Field name supplying `q`.
    pub right: String,
}

impl LogicalExpression {
    /// Create a new expression.
    #[must_use]
    pub fn new(operator: LogicalOperator, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            operator,
            left: left.into(),
            right: right.into(),
        }
    }

    /// `left AND right`
    #[must_use]
    pub fn and(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(LogicalOperator::And, left, right)
    }

    /// `left OR right`
    #[must_use]
    pub fn or(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(LogicalOperator::Or, left, right)
    }

    /// `left IMPLIES right`
    #[must_use]
    pub fn implies(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(LogicalOperator::Implies, left, right)
    }

    /// Evaluate this expression on a record.
    pub fn evaluate<R: Record + ?Sized>(&self, record: &R) -> bool {
        evaluate(record, self.operator, &self.left, &self.right)
    }
}

impl fmt::Display for LogicalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.operator, self.left, self.right)
    }
}

impl FromStr for LogicalExpression {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [operator, left, right] = parts.as_slice() else {
            return Err(ShelfError::InvalidExpression(format!(
                "'{}' is not of the form operator:left:right",
                s
            )));
        };
        if left.is_empty() || right.is_empty() {
            return Err(ShelfError::InvalidExpression(format!(
                "'{}' has an empty field name",
                s
            )));
        }
        Ok(Self::new(operator.parse()?, *left, *right))
    }
}

/// Evaluate `operator(record.left, record.right)`.
///
/// Returns `false` if either field is absent or not a boolean.
pub fn evaluate<R: Record + ?Sized>(
    record: &R,
    operator: LogicalOperator,
    left: &str,
    right: &str,
) -> bool {
    let p = record.field(left).and_then(|v| v.as_bool());
    let q = record.field(right).and_then(|v| v.as_bool());

    match (p, q) {
        (Some(p), Some(q)) => operator.apply(p, q),
        _ => false,
    }
}

// =============================================================================
// TESTS
// =============================================================================
