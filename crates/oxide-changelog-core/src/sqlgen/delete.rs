//! DELETE generation.

use super::{GeneratorChain, Sql, SqlGenerator, ValidationErrors};
use crate::dialect::Dialect;
use crate::statement::DeleteStatement;

/// Generates `DELETE FROM t WHERE <condition>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteGenerator;

impl SqlGenerator<DeleteStatement> for DeleteGenerator {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn validate(
        &self,
        statement: &DeleteStatement,
        _dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, DeleteStatement>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("tableName", statement.table_name());
        errors
    }

    fn generate_sql(
        &self,
        statement: &DeleteStatement,
        dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, DeleteStatement>,
    ) -> Vec<Sql> {
        let table = statement.table();
        let mut sql = format!(
            "DELETE FROM {}",
            dialect.escape_table_name(table.catalog.as_deref(), table.schema.as_deref(), &table.name)
        );
        if let Some(condition) = statement.condition().filter(|c| !c.trim().is_empty()) {
            sql.push_str(" WHERE ");
            sql.push_str(condition.trim());
        }
        vec![Sql::new(sql).affecting(table)]
    }
}
