//! MySQL dialect.

use super::{Dialect, ObjectQuotingStrategy};

const RESERVED: &[&str] = &[
    "ACCESSIBLE", "CHANGE", "DATABASE", "DATABASES", "DIV", "DUAL", "FULLTEXT", "IGNORE",
    "INTERVAL", "KEY", "KEYS", "KILL", "LIMIT", "LOCK", "MOD", "RANGE", "READ", "REGEXP",
    "RENAME", "REPLACE", "RLIKE", "SCHEMA", "SHOW", "SPATIAL", "STRAIGHT_JOIN", "USAGE",
    "XOR", "ZEROFILL",
];

dialect_type! {
    /// MySQL dialect. MariaDB shares it.
    MySqlDialect, "MySQL"
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    // MySQL databases play the role of catalogs.
    fn supports_catalogs(&self) -> bool {
        true
    }

    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn true_literal(&self) -> &'static str {
        "1"
    }

    fn false_literal(&self) -> &'static str {
        "0"
    }

    fn current_date_time_function(&self) -> &'static str {
        "NOW()"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.escape_object_name("key"), "`key`");
        assert_eq!(
            dialect.escape_table_name(Some("shop"), None, "orders"),
            "shop.orders"
        );
        assert_eq!(dialect.string_literal(r"C:\tmp"), r"'C:\\tmp'");
    }
}
