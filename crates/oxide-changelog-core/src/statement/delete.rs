//! DELETE statement.

use super::{table_ref, TableRef};
use crate::accessor::{PropertyTable, PropertyTarget};

/// Deletes rows of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteStatement {
    catalog_name: Option<String>,
    schema_name: Option<String>,
    table_name: Option<String>,
    where_clause: Option<String>,
}

impl DeleteStatement {
    /// Creates a delete from `table_name`.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
            ..Self::default()
        }
    }

    /// Sets the schema.
    #[must_use]
    pub fn schema(mut self, schema_name: impl Into<String>) -> Self {
        self.schema_name = Some(schema_name.into());
        self
    }

    /// Restricts the rows with a raw condition.
    #[must_use]
    pub fn where_clause(mut self, condition: impl Into<String>) -> Self {
        self.where_clause = Some(condition.into());
        self
    }

    /// Table name.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Raw condition, if any.
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    /// The table this statement deletes from.
    #[must_use]
    pub fn table(&self) -> TableRef {
        table_ref(
            self.catalog_name.as_ref(),
            self.schema_name.as_ref(),
            self.table_name.as_ref(),
        )
    }
}

impl PropertyTarget for DeleteStatement {
    fn type_path() -> &'static str {
        "oxide_changelog_core::statement::DeleteStatement"
    }

    fn describe(table: &mut PropertyTable<Self>) {
        table
            .property(
                "catalogName",
                |s: &Self| s.catalog_name.clone(),
                |s: &mut Self, v| s.catalog_name = v,
            )
            .property(
                "schemaName",
                |s: &Self| s.schema_name.clone(),
                |s: &mut Self, v| s.schema_name = v,
            )
            .property(
                "tableName",
                |s: &Self| s.table_name.clone(),
                |s: &mut Self, v| s.table_name = v,
            )
            .property(
                "where",
                |s: &Self| s.where_clause.clone(),
                |s: &mut Self, v| s.where_clause = v,
            );
    }
}
