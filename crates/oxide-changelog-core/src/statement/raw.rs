//! Literal SQL statement.

use crate::accessor::{PropertyTable, PropertyTarget};

/// SQL passed through as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSqlStatement {
    sql: String,
    end_delimiter: String,
}

impl Default for RawSqlStatement {
    fn default() -> Self {
        Self {
            sql: String::new(),
            end_delimiter: String::from(";"),
        }
    }
}

impl RawSqlStatement {
    /// Creates a statement ending with `;`.
    #[must_use]
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            ..Self::default()
        }
    }

    /// Sets the end delimiter.
    #[must_use]
    pub fn end_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.end_delimiter = delimiter.into();
        self
    }

    /// The SQL text.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The end delimiter.
    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.end_delimiter
    }
}

impl PropertyTarget for RawSqlStatement {
    fn type_path() -> &'static str {
        "oxide_changelog_core::statement::RawSqlStatement"
    }

    fn describe(table: &mut PropertyTable<Self>) {
        table
            .property("sql", |s: &Self| s.sql.clone(), |s: &mut Self, v| s.sql = v)
            .property(
                "endDelimiter",
                |s: &Self| s.end_delimiter.clone(),
                |s: &mut Self, v| s.end_delimiter = v,
            );
    }
}
