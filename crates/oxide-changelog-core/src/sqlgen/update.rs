//! UPDATE generation.

use super::{append_value, GeneratorChain, Sql, SqlGenerator, ValidationErrors};
use crate::dialect::Dialect;
use crate::statement::UpdateStatement;

/// Generates `UPDATE t SET a = 1 WHERE <condition>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateGenerator;

impl SqlGenerator<UpdateStatement> for UpdateGenerator {
    fn name(&self) -> &'static str {
        "update"
    }

    fn validate(
        &self,
        statement: &UpdateStatement,
        _dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, UpdateStatement>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", statement.table_name());
        errors.check_required_collection("columns", statement.new_values().is_empty());
        errors
    }

    fn generate_sql(
        &self,
        statement: &UpdateStatement,
        dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, UpdateStatement>,
    ) -> Vec<Sql> {
        let table = statement.table();
        let mut sql = format!(
            "UPDATE {} SET ",
            dialect.escape_table_name(table.catalog.as_deref(), table.schema.as_deref(), &table.name)
        );
        for (i, (column, value)) in statement.new_values().iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&dialect.escape_column_name(column));
            sql.push_str(" = ");
            append_value(&mut sql, dialect, value);
        }
        if let Some(condition) = statement.condition().filter(|c| !c.trim().is_empty()) {
            sql.push_str(" WHERE ");
            sql.push_str(condition.trim());
        }
        vec![Sql::new(sql).affecting(table)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::MySqlDialect;

    #[test]
    fn test_update_with_condition() {
        let statement = UpdateStatement::new("person")
            .set("name", "O'Hara")
            .set("active", false)
            .where_clause("id = 7");
        let sql = UpdateGenerator.generate_sql(&statement, &MySqlDialect::new(), &GeneratorChain::new(&[]));
        assert_eq!(
            sql[0].text(),
            "UPDATE person SET name = 'O''Hara', active = 0 WHERE id = 7"
        );
    }

    #[test]
    fn test_update_requires_values() {
        let statement = UpdateStatement::new("person");
        let errors = UpdateGenerator.validate(&statement, &MySqlDialect::new(), &GeneratorChain::new(&[]));
        assert_eq!(errors.errors(), ["No columns defined"]);
    }
}
