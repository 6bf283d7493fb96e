//! Database-independent statement descriptors.
//!
//! Statements describe one SQL operation without committing to a dialect.
//! They are built by callers, or materialized from change-log nodes, and
//! consumed read-only by the SQL generators.

mod column;
mod columns;
mod delete;
mod insert;
mod insert_set;
mod raw;
mod update;

use std::fmt;

pub use column::ColumnConfig;
pub use columns::ColumnValues;
pub use delete::DeleteStatement;
pub use insert::InsertStatement;
pub use insert_set::{InsertSetStatement, DEFAULT_BATCH_SIZE};
pub use raw::RawSqlStatement;
pub use update::UpdateStatement;

/// Fully qualified table identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TableRef {
    /// Catalog name.
    pub catalog: Option<String>,
    /// Schema name.
    pub schema: Option<String>,
    /// Table name.
    pub name: String,
}

impl TableRef {
    /// Creates an unqualified table reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in [&self.catalog, &self.schema].into_iter().flatten() {
            write!(f, "{part}.")?;
        }
        f.write_str(&self.name)
    }
}

/// Any statement the generator factory can handle.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Single row INSERT.
    Insert(InsertStatement),
    /// Batched INSERT of several rows.
    InsertSet(InsertSetStatement),
    /// UPDATE.
    Update(UpdateStatement),
    /// DELETE.
    Delete(DeleteStatement),
    /// Literal SQL.
    RawSql(RawSqlStatement),
}

impl Statement {
    /// Short name of the statement kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Insert(_) => "insert",
            Self::InsertSet(_) => "insertSet",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::RawSql(_) => "sql",
        }
    }
}

impl From<InsertStatement> for Statement {
    fn from(statement: InsertStatement) -> Self {
        Self::Insert(statement)
    }
}

impl From<InsertSetStatement> for Statement {
    fn from(statement: InsertSetStatement) -> Self {
        Self::InsertSet(statement)
    }
}

impl From<UpdateStatement> for Statement {
    fn from(statement: UpdateStatement) -> Self {
        Self::Update(statement)
    }
}

impl From<DeleteStatement> for Statement {
    fn from(statement: DeleteStatement) -> Self {
        Self::Delete(statement)
    }
}

impl From<RawSqlStatement> for Statement {
    fn from(statement: RawSqlStatement) -> Self {
        Self::RawSql(statement)
    }
}

/// Table identity shared by the table-level statements.
pub(crate) fn table_ref(
    catalog: Option<&String>,
    schema: Option<&String>,
    table: Option<&String>,
) -> TableRef {
    TableRef {
        catalog: catalog.cloned(),
        schema: schema.cloned(),
        name: table.cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_display() {
        let table = TableRef {
            catalog: None,
            schema: Some(String::from("public")),
            name: String::from("person"),
        };
        assert_eq!(table.to_string(), "public.person");
        assert_eq!(TableRef::new("t").to_string(), "t");
    }

    #[test]
    fn test_statement_kind_names() {
        let statement: Statement = InsertStatement::new("person").into();
        assert_eq!(statement.kind_name(), "insert");
        let statement: Statement = RawSqlStatement::new("SELECT 1").into();
        assert_eq!(statement.kind_name(), "sql");
    }
}
