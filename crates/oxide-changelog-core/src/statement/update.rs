//! UPDATE statement.

use super::{table_ref, ColumnValues, TableRef};
use crate::accessor::{PropertyTable, PropertyTarget};
use crate::value::IntoValue;

/// Updates rows of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateStatement {
    catalog_name: Option<String>,
    schema_name: Option<String>,
    table_name: Option<String>,
    new_values: ColumnValues,
    where_clause: Option<String>,
}

impl UpdateStatement {
    /// Creates an update of `table_name`.
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

    /// Adds a new column value.
    #[must_use]
    pub fn set(mut self, column: impl Into<String>, value: impl IntoValue) -> Self {
        self.new_values.set(column, value);
        self
    }

    /// Sets a new column value in place.
    pub fn add_new_column_value(&mut self, column: impl Into<String>, value: impl IntoValue) {
        self.new_values.set(column, value);
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

    /// New values in emission order.
    #[must_use]
    pub const fn new_values(&self) -> &ColumnValues {
        &self.new_values
    }

    /// Raw condition, if any.
    #[must_use]
    pub fn condition(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    /// The table this statement writes to.
    #[must_use]
    pub fn table(&self) -> TableRef {
        table_ref(
            self.catalog_name.as_ref(),
            self.schema_name.as_ref(),
            self.table_name.as_ref(),
        )
    }
}

impl PropertyTarget for UpdateStatement {
    fn type_path() -> &'static str {
        "oxide_changelog_core::statement::UpdateStatement"
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
