//! HyperSQL dialect.

use super::{Dialect, ObjectQuotingStrategy};

dialect_type! {
    /// HyperSQL dialect.
    HsqlDialect, "HyperSQL"
}

impl Dialect for HsqlDialect {
    fn name(&self) -> &'static str {
        "hsqldb"
    }

    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting
    }

    fn current_date_time_function(&self) -> &'static str {
        "NOW"
    }

    fn sequence_next_value_template(&self) -> Option<&'static str> {
        Some("NEXT VALUE FOR {}")
    }

    fn sequence_current_value_template(&self) -> Option<&'static str> {
        Some("CURRENT VALUE FOR {}")
    }

    fn rewrites_sequence_next_value_in_insert(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsql_dialect() {
        let dialect = HsqlDialect::new();
        assert_eq!(dialect.name(), "hsqldb");
        assert!(dialect.rewrites_sequence_next_value_in_insert());
        assert!(dialect.looks_like_function_call("now"));
    }
}
