//! Generated SQL fragments.

use std::fmt;

use crate::statement::TableRef;

/// Default statement terminator.
pub const DEFAULT_END_DELIMITER: &str = ";";

/// A database object a SQL fragment touches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AffectedObject {
    /// A table.
    Table(TableRef),
}

/// One generated SQL fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sql {
    text: String,
    end_delimiter: String,
    affected: Vec<AffectedObject>,
}

impl Sql {
    /// Creates a fragment terminated by [`DEFAULT_END_DELIMITER`].
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            end_delimiter: String::from(DEFAULT_END_DELIMITER),
            affected: Vec::new(),
        }
    }

    /// Records an affected table.
    #[must_use]
    pub fn affecting(mut self, table: TableRef) -> Self {
        self.affected.push(AffectedObject::Table(table));
        self
    }

    /// Replaces the end delimiter.
    #[must_use]
    pub fn with_end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = delimiter.into();
        self
    }

    /// The SQL text, without delimiter.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The statement terminator.
    #[must_use]
    pub fn end_delimiter(&self) -> &str {
        &self.end_delimiter
    }

    /// Objects this fragment touches.
    #[must_use]
    pub fn affected(&self) -> &[AffectedObject] {
        &self.affected
    }
}

impl fmt::Display for Sql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.text, self.end_delimiter)
    }
}
