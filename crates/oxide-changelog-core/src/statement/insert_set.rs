//! Batched INSERT of several rows into one table.

use super::{table_ref, InsertStatement, TableRef};
use crate::accessor::{PropertyTable, PropertyTarget, PropertyVeto};

/// Rows per generated INSERT unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Rows inserted into the same table, emitted in batches.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSetStatement {
    catalog_name: Option<String>,
    schema_name: Option<String>,
    table_name: Option<String>,
    batch_size: usize,
    rows: Vec<InsertStatement>,
}

impl Default for InsertSetStatement {
    fn default() -> Self {
        Self {
            catalog_name: None,
            schema_name: None,
            table_name: None,
            batch_size: DEFAULT_BATCH_SIZE,
            rows: Vec::new(),
        }
    }
}

impl InsertSetStatement {
    /// Creates an empty set for `table_name`.
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

    /// Sets the number of rows per INSERT. Zero is treated as one.
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Appends a row.
    #[must_use]
    pub fn row(mut self, row: InsertStatement) -> Self {
        self.rows.push(row);
        self
    }

    /// Appends a row in place.
    pub fn add_insert_statement(&mut self, row: InsertStatement) {
        self.rows.push(row);
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

    /// Rows per INSERT.
    #[must_use]
    pub const fn rows_per_batch(&self) -> usize {
        self.batch_size
    }

    /// The rows in order.
    #[must_use]
    pub fn rows(&self) -> &[InsertStatement] {
        &self.rows
    }

    /// The table every row writes to.
    #[must_use]
    pub fn table(&self) -> TableRef {
        table_ref(
            self.catalog_name.as_ref(),
            self.schema_name.as_ref(),
            self.table_name.as_ref(),
        )
    }

    /// A row re-targeted at this set's table, so batches share one header.
    #[must_use]
    pub fn row_for_table(&self, row: &InsertStatement) -> InsertStatement {
        let mut targeted = InsertStatement::qualified(
            self.catalog_name(),
            self.schema_name(),
            self.table_name().unwrap_or_default(),
        );
        for (name, value) in row.columns().iter() {
            targeted.add_column_value(name, value.clone());
        }
        targeted
    }
}

impl PropertyTarget for InsertSetStatement {
    fn type_path() -> &'static str {
        "oxide_changelog_core::statement::InsertSetStatement"
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
            .getter("batchSize", |s: &Self| {
                i32::try_from(s.batch_size).unwrap_or(i32::MAX)
            })
            .checked_setter("batchSize", |s: &mut Self, v: i32| {
                let size = usize::try_from(v)
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| PropertyVeto::new(format!("batchSize must be positive, got {v}")))?;
                s.batch_size = size;
                Ok(())
            });
    }
}
