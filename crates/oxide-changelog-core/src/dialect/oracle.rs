//! Oracle dialect.

use super::{Dialect, ObjectQuotingStrategy};
use crate::iso;
use crate::value::Value;

const RESERVED: &[&str] = &[
    "ACCESS", "AUDIT", "CLUSTER", "COMMENT", "COMPRESS", "CONNECT", "EXCLUSIVE", "FILE",
    "IDENTIFIED", "LEVEL", "LOCK", "MINUS", "MODE", "NOCOMPRESS", "NOWAIT", "NUMBER",
    "OFFLINE", "ONLINE", "PCTFREE", "PRIOR", "RAW", "RESOURCE", "ROW", "ROWID", "ROWNUM",
    "ROWS", "SESSION", "SIZE", "START", "SYNONYM", "SYSDATE", "UID", "VALIDATE", "VARCHAR2",
    "VIEW",
];

dialect_type! {
    /// Oracle dialect.
    OracleDialect, "Oracle"
}

impl Dialect for OracleDialect {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        self.quoting
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn date_literal(&self, value: &Value) -> String {
        match value {
            Value::Date(date) => format!("TO_DATE('{}', 'YYYY-MM-DD')", iso::format_date(date)),
            Value::Time(time) => format!("TO_DATE('{}', 'HH24:MI:SS')", iso::format_time(time)),
            Value::DateTime(date_time) => format!(
                "TO_TIMESTAMP('{}', 'YYYY-MM-DD HH24:MI:SS.FF')",
                iso::format_date_time(date_time).replace('T', " ")
            ),
            other => self.string_literal(&other.to_string()),
        }
    }

    fn true_literal(&self) -> &'static str {
        "1"
    }

    fn false_literal(&self) -> &'static str {
        "0"
    }

    fn current_date_time_function(&self) -> &'static str {
        "SYSTIMESTAMP"
    }

    fn sequence_next_value_template(&self) -> Option<&'static str> {
        Some("{}.nextval")
    }

    fn sequence_current_value_template(&self) -> Option<&'static str> {
        Some("{}.currval")
    }

    // INSERT ALL exists but is not a VALUES list.
    fn supports_multi_row_insert(&self) -> bool {
        false
    }
}
