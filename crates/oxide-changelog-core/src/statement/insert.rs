//! INSERT statement.

use super::{table_ref, ColumnValues, TableRef};
use crate::accessor::{PropertyTable, PropertyTarget};
use crate::value::{IntoValue, Value};

/// Inserts one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStatement {
    catalog_name: Option<String>,
    schema_name: Option<String>,
    table_name: Option<String>,
    columns: ColumnValues,
}

impl InsertStatement {
    /// Creates an insert into `table_name`.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
            ..Self::default()
        }
    }

    /// Creates an insert into a qualified table.
    #[must_use]
    pub fn qualified(
        catalog_name: Option<&str>,
        schema_name: Option<&str>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            catalog_name: catalog_name.map(str::to_string),
            schema_name: schema_name.map(str::to_string),
            table_name: Some(table_name.into()),
            columns: ColumnValues::new(),
        }
    }

    /// Adds a column value.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, value: impl IntoValue) -> Self {
        self.columns.set(name, value);
        self
    }

    /// Sets a column value in place.
    pub fn add_column_value(&mut self, name: impl Into<String>, value: impl IntoValue) {
        self.columns.set(name, value);
    }

    /// Catalog name.
    #[must_use]
    pub fn catalog_name(&self) -> Option<&str> {
        self.catalog_name.as_deref()
    }

    /// Schema name.
    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }

    /// Table name.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    /// Column values in emission order.
    #[must_use]
    pub const fn columns(&self) -> &ColumnValues {
        &self.columns
    }

    /// Value of one column.
    #[must_use]
    pub fn column_value(&self, name: &str) -> Option<&Value> {
        self.columns.get(name)
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

impl PropertyTarget for InsertStatement {
    fn type_path() -> &'static str {
        "oxide_changelog_core::statement::InsertStatement"
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
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_column_order() {
        let insert = InsertStatement::qualified(None, Some("public"), "person")
            .column("id", 1)
            .column("name", "Alice");
        assert_eq!(insert.schema_name(), Some("public"));
        assert_eq!(insert.columns().names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(insert.table().to_string(), "public.person");
    }
}
