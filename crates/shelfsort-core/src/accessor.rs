//! # Attribute Accessor
//!
//! Resolves a named field on a record.
//!
//! - Records expose fields by name only; the engine never sees their type
//! - Typed records build a name -> accessor table once per type
//! - An absent field is `None`, never a panic

use crate::{FieldValue, ShelfError};
use std::collections::BTreeMap;
use std::fmt;

/// A typed accessor reading one field from a record.
pub type Accessor<T> = fn(&T) -> FieldValue;

/// Anything the sorting engine can order.
pub trait Record {
    /// Read the field called `name`, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Read the field called `name`, failing if the record has no such field.
    fn require(&self, name: &str) -> Result<FieldValue, ShelfError> {
        self.field(name)
            .ok_or_else(|| ShelfError::MissingField(name.to_string()))
    }
}

/// Untyped records: every entry of the map is a field.
impl Record for BTreeMap<String, FieldValue> {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> Option<FieldValue> {
        (**self).field(name)
    }
}

// =============================================================================
// ACCESSOR TABLE
// =============================================================================

/// Field name -> accessor mapping for a concrete record type.
///
/// Built once per type (typically inside a `OnceLock`) and consulted on
/// every field read. Names keep their declaration order.
pub struct FieldAccessors<T> {
    fields: Vec<(&'static str, Accessor<T>)>,
}

impl<T> FieldAccessors<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Register an accessor. Re-registering a name replaces the old accessor.
    #[must_use]
    pub fn with(mut self, name: &'static str, accessor: Accessor<T>) -> Self {
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = accessor,
            None => self.fields.push((name, accessor)),
        }
        self
    }

    /// Read `name` from `record`.
    pub fn get(&self, record: &T, name: &str) -> Option<FieldValue> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, accessor)| accessor(record))
    }

    /// Whether `name` is a known field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| *field == name)
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

impl<T> Default for FieldAccessors<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldAccessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.field_names()).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
