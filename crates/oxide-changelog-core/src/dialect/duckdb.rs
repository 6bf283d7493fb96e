//! DuckDB dialect.

use super::{Dialect, ObjectQuotingStrategy};

dialect_type! {
    /// DuckDB dialect.
    DuckDbDialect, "DuckDB"
}

impl Dialect for DuckDbDialect {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting
    }

    fn current_date_time_function(&self) -> &'static str {
        "NOW()"
    }

    fn sequence_next_value_template(&self) -> Option<&'static str> {
        Some("nextval('{}')")
    }

    fn sequence_current_value_template(&self) -> Option<&'static str> {
        Some("currval('{}')")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duckdb_dialect() {
        let dialect = DuckDbDialect::new();
        assert_eq!(dialect.name(), "duckdb");
        assert_eq!(dialect.current_date_time_function(), "NOW()");
        assert_eq!(dialect.false_literal(), "FALSE");
    }
}
