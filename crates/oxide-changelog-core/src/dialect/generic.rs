//! Generic SQL dialect.

use super::{Dialect, ObjectQuotingStrategy};

dialect_type! {
    /// A generic SQL dialect using ANSI SQL standards.
    GenericDialect, "generic"
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::DatabaseFunction;

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quote(), '"');
        assert_eq!(dialect.true_literal(), "TRUE");
        assert!(dialect.supports_multi_row_insert());
        assert!(!dialect.rewrites_sequence_next_value_in_insert());
    }

    #[test]
    fn test_sequence_markers_render_verbatim() {
        let dialect = GenericDialect::new();
        let next = DatabaseFunction::sequence_next_value("seq_id");
        assert_eq!(dialect.generate_database_function_value(&next), "seq_id");
        let now = DatabaseFunction::new("current_timestamp()");
        assert_eq!(
            dialect.generate_database_function_value(&now),
            "CURRENT_TIMESTAMP"
        );
    }
}
