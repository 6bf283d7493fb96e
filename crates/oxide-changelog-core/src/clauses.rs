//! Ordered list of SQL clause fragments.

use std::fmt;

/// SQL clauses rendered in insertion order, separated by a single space.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StringClauses {
    clauses: Vec<String>,
}

impl StringClauses {
    /// Creates an empty clause list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Appends a clause, skipping blank ones.
    #[must_use]
    pub fn append(mut self, clause: impl Into<String>) -> Self {
        let clause = clause.into();
        if !clause.trim().is_empty() {
            self.clauses.push(clause);
        }
        self
    }

    /// Returns true if no clause was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Iterates over the clauses.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.clauses.iter().map(String::as_str)
    }
}

impl fmt::Display for StringClauses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.clauses.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clauses_join_with_spaces() {
        let clauses = StringClauses::new()
            .append("CREATE TABLE")
            .append("  ")
            .append("users");
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses.to_string(), "CREATE TABLE users");
    }
}
