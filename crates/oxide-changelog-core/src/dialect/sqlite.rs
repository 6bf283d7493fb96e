//! SQLite dialect.

use super::{Dialect, ObjectQuotingStrategy};

dialect_type! {
    /// SQLite dialect.
    SqliteDialect, "SQLite"
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting
    }

    // SQLite stores booleans as integers.
    fn true_literal(&self) -> &'static str {
        "1"
    }

    fn false_literal(&self) -> &'static str {
        "0"
    }
}
