//! Ordered column to value mapping.

use crate::value::{IntoValue, Value};

/// Column values in insertion order. Setting a column again replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnValues {
    entries: Vec<(String, Value)>,
}

impl ColumnValues {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets the value of a column.
    pub fn set(&mut self, column: impl Into<String>, value: impl IntoValue) {
        let column = column.into();
        let value = value.into_value();
        match self.entries.iter_mut().find(|(name, _)| *name == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no column is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_column_overwrites_in_place() {
        let mut columns = ColumnValues::new();
        columns.set("id", 1);
        columns.set("name", "Alice");
        columns.set("id", 2);
        assert_eq!(columns.names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(columns.get("id"), Some(&Value::Int(2)));
        assert_eq!(columns.len(), 2);
    }
}
