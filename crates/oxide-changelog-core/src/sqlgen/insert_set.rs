//! Batched INSERT generation.

use tracing::debug;

use super::{GeneratorChain, InsertGenerator, RowPosition, Sql, SqlGenerator, ValidationErrors};
use crate::dialect::Dialect;
use crate::statement::InsertSetStatement;

/// Emits one multi-row INSERT per batch, or one INSERT per row on databases
/// without multi-row VALUES lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsertSetGenerator {
    rows: InsertGenerator,
}

impl InsertSetGenerator {
    /// Creates the generator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            rows: InsertGenerator::new(),
        }
    }
}

impl SqlGenerator<InsertSetStatement> for InsertSetGenerator {
    fn name(&self) -> &'static str {
        "insertSet"
    }

    fn validate(
        &self,
        statement: &InsertSetStatement,
        _dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, InsertSetStatement>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", statement.table_name());
        errors.check_required_collection("rows", statement.rows().is_empty());

        let Some(first) = statement.rows().first() else {
            return errors;
        };
        let header: Vec<&str> = first.columns().names().collect();
        for (index, row) in statement.rows().iter().enumerate() {
            if row.columns().is_empty() {
                errors.add_error(format!("Row {} has no columns", index + 1));
            } else if !row.columns().names().eq(header.iter().copied()) {
                errors.add_error(format!(
                    "Row {} columns do not match the first row",
                    index + 1
                ));
            }
        }
        errors
    }

    fn generate_sql(
        &self,
        statement: &InsertSetStatement,
        dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, InsertSetStatement>,
    ) -> Vec<Sql> {
        let rows: Vec<_> = statement
            .rows()
            .iter()
            .map(|row| statement.row_for_table(row))
            .collect();

        if !dialect.supports_multi_row_insert() {
            debug!(dialect = dialect.name(), rows = rows.len(), "one insert per row");
            return rows
                .iter()
                .map(|row| self.rows.generate_row(row, dialect, RowPosition::First))
                .collect();
        }

        rows.chunks(statement.rows_per_batch())
            .map(|batch| {
                let mut text = String::new();
                for (index, row) in batch.iter().enumerate() {
                    let position = if index == 0 {
                        RowPosition::First
                    } else {
                        RowPosition::Continuation
                    };
                    text.push_str(self.rows.generate_row(row, dialect, position).text());
                }
                Sql::new(text).affecting(statement.table())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{OracleDialect, PostgresDialect};
    use crate::statement::InsertStatement;

    fn chain() -> GeneratorChain<'static, InsertSetStatement> {
        GeneratorChain::new(&[])
    }

    fn people(batch_size: usize) -> InsertSetStatement {
        InsertSetStatement::new("person")
            .batch_size(batch_size)
            .row(InsertStatement::new("person").column("id", 1))
            .row(InsertStatement::new("person").column("id", 2))
            .row(InsertStatement::new("person").column("id", 3))
    }

    #[test]
    fn test_rows_are_batched() {
        let sql = InsertSetGenerator::new().generate_sql(&people(2), &PostgresDialect::new(), &chain());
        let texts: Vec<&str> = sql.iter().map(Sql::text).collect();
        assert_eq!(
            texts,
            [
                "INSERT INTO person (id) VALUES (1),(2)",
                "INSERT INTO person (id) VALUES (3)",
            ]
        );
    }

    #[test]
    fn test_single_row_inserts_without_multi_row_support() {
        let sql = InsertSetGenerator::new().generate_sql(&people(50), &OracleDialect::new(), &chain());
        assert_eq!(sql.len(), 3);
        assert_eq!(sql[2].text(), "INSERT INTO person (id) VALUES (3)");
    }

    #[test]
    fn test_validation_reports_mismatched_rows() {
        let statement = InsertSetStatement::new("person")
            .row(InsertStatement::new("person").column("id", 1))
            .row(InsertStatement::new("person").column("name", "x"))
            .row(InsertStatement::new("person"));
        let errors = InsertSetGenerator::new().validate(&statement, &PostgresDialect::new(), &chain());
        assert_eq!(
            errors.errors(),
            ["Row 2 columns do not match the first row", "Row 3 has no columns"]
        );

        let empty = InsertSetStatement::default();
        let errors = InsertSetGenerator::new().validate(&empty, &PostgresDialect::new(), &chain());
        assert_eq!(errors.errors(), ["tableName is required", "No rows defined"]);
    }
}
