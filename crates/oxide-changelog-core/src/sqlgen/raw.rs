//! Literal SQL pass-through.

use super::{GeneratorChain, Sql, SqlGenerator, ValidationErrors};
use crate::dialect::Dialect;
use crate::statement::RawSqlStatement;

/// Emits the statement text unchanged with its own end delimiter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSqlGenerator;

impl SqlGenerator<RawSqlStatement> for RawSqlGenerator {
    fn name(&self) -> &'static str {
        "sql"
    }

    fn validate(
        &self,
        statement: &RawSqlStatement,
        _dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, RawSqlStatement>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check_required_field("sql", Some(statement.sql()));
        errors
    }

    fn generate_sql(
        &self,
        statement: &RawSqlStatement,
        _dialect: &dyn Dialect,
        _chain: &GeneratorChain<'_, RawSqlStatement>,
    ) -> Vec<Sql> {
        vec![Sql::new(statement.sql().trim()).with_end_delimiter(statement.delimiter())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::GenericDialect;

    #[test]
    fn test_raw_sql_keeps_delimiter() {
        let statement = RawSqlStatement::new("  CREATE VIEW v AS SELECT 1\n").end_delimiter("GO");
        let sql = RawSqlGenerator.generate_sql(&statement, &GenericDialect::new(), &GeneratorChain::new(&[]));
        assert_eq!(sql[0].text(), "CREATE VIEW v AS SELECT 1");
        assert_eq!(sql[0].to_string(), "CREATE VIEW v AS SELECT 1GO");

        let blank = RawSqlStatement::new("   ");
        let errors = RawSqlGenerator.validate(&blank, &GenericDialect::new(), &GeneratorChain::new(&[]));
        assert_eq!(errors.errors(), ["sql is required"]);
    }
}
