//! PostgreSQL dialect.

use super::{Dialect, ObjectQuotingStrategy};

const RESERVED: &[&str] = &[
    "ANALYSE", "ANALYZE", "ARRAY", "ASYMMETRIC", "BOTH", "CAST", "COLLATE", "CURRENT_DATE",
    "CURRENT_ROLE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER", "DEFERRABLE", "DO",
    "FETCH", "INITIALLY", "LATERAL", "LEADING", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP",
    "OFFSET", "ONLY", "PLACING", "RETURNING", "SESSION_USER", "SOME", "SYMMETRIC",
    "TRAILING", "VARIADIC", "WINDOW",
];

dialect_type! {
    /// PostgreSQL dialect.
    PostgresDialect, "PostgreSQL"
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn requires_quoting(&self, name: &str) -> bool {
        // Unquoted names fold to lower case, so mixed case must be quoted to survive.
        let mixed_case = name.chars().any(char::is_uppercase) && name.chars().any(char::is_lowercase);
        mixed_case || !super::PLAIN_IDENTIFIER.is_match(name) || self.is_reserved_word(name)
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
    use crate::function::DatabaseFunction;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "postgresql");
        assert_eq!(dialect.escape_object_name("person"), "person");
        assert_eq!(dialect.escape_object_name("firstName"), "\"firstName\"");
        assert_eq!(dialect.escape_object_name("LIMIT"), "\"LIMIT\"");
    }

    #[test]
    fn test_postgres_sequences() {
        let dialect = PostgresDialect::new();
        let next = DatabaseFunction::sequence_next_value("order_seq").with_schema("sales");
        assert_eq!(
            dialect.generate_database_function_value(&next),
            "nextval('sales.order_seq')"
        );
        let current = DatabaseFunction::sequence_current_value("order_seq");
        assert_eq!(
            dialect.generate_database_function_value(&current),
            "currval('order_seq')"
        );
    }
}
