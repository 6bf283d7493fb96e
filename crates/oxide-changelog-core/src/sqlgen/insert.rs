//! Single-row INSERT generation.

use tracing::trace;

use super::{append_value, GeneratorChain, RowPosition, Sql, SqlGenerator, ValidationErrors};
use crate::dialect::Dialect;
use crate::statement::InsertStatement;

/// Generates `INSERT INTO t (a, b) VALUES (1, 'x')`.
///
/// Also used row by row by the insert-set generator, which is why the header
/// and value parts are exposed separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertGenerator;

impl InsertGenerator {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Writes `INSERT INTO <table> (<columns>) VALUES `.
    pub fn generate_header(&self, sql: &mut String, statement: &InsertStatement, dialect: &dyn Dialect) {
        sql.push_str("INSERT INTO ");
        sql.push_str(&dialect.escape_table_name(
            statement.catalog_name(),
            statement.schema_name(),
            statement.table_name().unwrap_or_default(),
        ));
        sql.push_str(" (");
        let columns: Vec<String> = statement
            .columns()
            .names()
            .map(|name| dialect.escape_column_name(name))
            .collect();
        sql.push_str(&columns.join(", "));
        sql.push_str(") VALUES ");
    }

    /// Writes `(<values>)`.
    pub fn generate_values(&self, sql: &mut String, statement: &InsertStatement, dialect: &dyn Dialect) {
        sql.push('(');
        for (i, value) in statement.columns().values().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            append_value(sql, dialect, value);
        }
        sql.push(')');
    }

    /// Generates one row, opening a new INSERT or continuing a VALUES list.
    #[must_use]
    pub fn generate_row(
        &self,
        statement: &InsertStatement,
        dialect: &dyn Dialect,
        position: RowPosition,
    ) -> Sql {
        let mut sql = String::new();
        match position {
            RowPosition::First => self.generate_header(&mut sql, statement, dialect),
            RowPosition::Continuation => sql.push(','),
        }
        self.generate_values(&mut sql, statement, dialect);
        trace!(table = ?statement.table_name(), ?position, "generated insert row");
        Sql::new(sql).affecting(statement.table())
    }
}

impl SqlGenerator<InsertStatement> for InsertGenerator {
    fn name(&self) -> &'static str {
        "insert"
    }

    fn validate(
        &self,
        statement: &InsertStatement,
        _dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, InsertStatement>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", statement.table_name());
        errors.check_required_collection("columns", statement.columns().is_empty());
        errors
    }

    fn generate_sql(
        &self,
        statement: &InsertStatement,
        dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, InsertStatement>,
    ) -> Vec<Sql> {
        vec![self.generate_row(statement, dialect, RowPosition::First)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{GenericDialect, PostgresDialect};
    use crate::function::DatabaseFunction;
    use crate::sqlgen::AffectedObject;
    use crate::statement::TableRef;

    fn chain() -> GeneratorChain<'static, InsertStatement> {
        GeneratorChain::new(&[])
    }

    #[test]
    fn test_first_and_continuation_rows() {
        let dialect = PostgresDialect::new();
        let first = InsertStatement::new("t").column("id", 1).column("name", "Alice");
        let second = InsertStatement::new("t").column("id", 2).column("name", "Bob");

        let sql = InsertGenerator.generate_row(&first, &dialect, RowPosition::First);
        assert_eq!(sql.text(), "INSERT INTO t (id, name) VALUES (1, 'Alice')");
        assert_eq!(sql.end_delimiter(), ";");
        assert_eq!(sql.affected(), [AffectedObject::Table(TableRef::new("t"))]);

        let sql = InsertGenerator.generate_row(&second, &dialect, RowPosition::Continuation);
        assert_eq!(sql.text(), ",(2, 'Bob')");
    }

    #[test]
    fn test_validation_accumulates() {
        let statement = InsertStatement::default();
        let errors = InsertGenerator.validate(&statement, &GenericDialect::new(), &chain());
        assert_eq!(errors.errors(), ["tableName is required", "No columns defined"]);
    }

    #[test]
    fn test_qualified_table_and_function_value() {
        let statement = InsertStatement::qualified(None, Some("app"), "person")
            .column("created", DatabaseFunction::new("now()"));
        let sql = InsertGenerator.generate_sql(&statement, &PostgresDialect::new(), &chain());
        assert_eq!(sql.len(), 1);
        assert_eq!(sql[0].text(), "INSERT INTO app.person (created) VALUES (now())");
    }
}
