//! SQL dialect support.
//!
//! Different databases quote names, spell literals and advance sequences
//! differently. Generators only talk to the [`Dialect`] trait; each database
//! overrides the defaults that differ from ANSI SQL.

/// Declares a dialect type that carries its object quoting strategy.
macro_rules! dialect_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $name {
            quoting: $crate::dialect::ObjectQuotingStrategy,
        }

        impl $name {
            #[doc = concat!("Creates a new ", $label, " dialect.")]
            #[must_use]
            pub const fn new() -> Self {
                Self {
                    quoting: $crate::dialect::ObjectQuotingStrategy::Legacy,
                }
            }

            /// Sets the quoting strategy.
            #[must_use]
            pub const fn with_quoting(
                mut self,
                quoting: $crate::dialect::ObjectQuotingStrategy,
            ) -> Self {
                self.quoting = quoting;
                self
            }
        }
    };
}

mod duckdb;
mod generic;
mod hsql;
mod mysql;
mod oracle;
mod postgres;
mod sqlite;

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub use duckdb::DuckDbDialect;
pub use generic::GenericDialect;
pub use hsql::HsqlDialect;
pub use mysql::MySqlDialect;
pub use oracle::OracleDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::function::{DatabaseFunction, FunctionKind};
use crate::iso;
use crate::value::Value;

crate::named_enum! {
    /// How database object names are quoted.
    pub enum ObjectQuotingStrategy {
        /// Quote only names that are not plain identifiers or are reserved words.
        Legacy => "LEGACY",
        /// Quote every object name.
        QuoteAllObjects => "QUOTE_ALL_OBJECTS",
        /// Quote reserved words only.
        QuoteOnlyReservedWords => "QUOTE_ONLY_RESERVED_WORDS",
    }
}

impl Default for ObjectQuotingStrategy {
    fn default() -> Self {
        Self::Legacy
    }
}

static PLAIN_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("Invalid identifier regex")
});

/// Words reserved by every supported database.
pub const COMMON_RESERVED_WORDS: &[&str] = &[
    "ALL", "ALTER", "AND", "AS", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN", "CONSTRAINT",
    "CREATE", "DEFAULT", "DELETE", "DISTINCT", "DROP", "ELSE", "END", "EXISTS", "FOR",
    "FOREIGN", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INDEX", "INSERT", "INTO", "IS",
    "JOIN", "LIKE", "NOT", "NULL", "ON", "OR", "ORDER", "PRIMARY", "REFERENCES", "SELECT",
    "SET", "TABLE", "THEN", "TO", "UNION", "UNIQUE", "UPDATE", "USER", "VALUES", "WHEN",
    "WHERE", "WITH",
];

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns how object names are quoted.
    fn quoting_strategy(&self) -> ObjectQuotingStrategy {
        ObjectQuotingStrategy::Legacy
    }

    /// Returns the identifier quote character (e.g., `"` for standard SQL, `` ` `` for MySQL).
    fn identifier_quote(&self) -> char {
        '"'
    }

    /// Returns the words this database reserves, beyond the common ones.
    fn reserved_words(&self) -> &'static [&'static str] {
        &[]
    }

    /// Returns whether `name` is a reserved word, ignoring case.
    fn is_reserved_word(&self, name: &str) -> bool {
        COMMON_RESERVED_WORDS
            .iter()
            .chain(self.reserved_words())
            .any(|word| word.eq_ignore_ascii_case(name))
    }

    /// Returns whether an unquoted `name` would be misread under legacy quoting.
    fn requires_quoting(&self, name: &str) -> bool {
        !PLAIN_IDENTIFIER.is_match(name) || self.is_reserved_word(name)
    }

    /// Quotes an identifier unconditionally, doubling embedded quotes.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        let doubled = format!("{quote}{quote}");
        format!("{quote}{}{quote}", name.replace(quote, &doubled))
    }

    /// Escapes one object name according to the quoting strategy.
    fn escape_object_name(&self, name: &str) -> String {
        let quote = match self.quoting_strategy() {
            ObjectQuotingStrategy::QuoteAllObjects => true,
            ObjectQuotingStrategy::QuoteOnlyReservedWords => self.is_reserved_word(name),
            ObjectQuotingStrategy::Legacy => self.requires_quoting(name),
        };
        if quote {
            self.quote_identifier(name)
        } else {
            name.to_string()
        }
    }

    /// Returns whether table names may be qualified with a catalog.
    fn supports_catalogs(&self) -> bool {
        false
    }

    /// Escapes a possibly qualified table name.
    fn escape_table_name(&self, catalog: Option<&str>, schema: Option<&str>, table: &str) -> String {
        let catalog = catalog.filter(|_| self.supports_catalogs());
        [catalog, schema, Some(table)]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .map(|part| self.escape_object_name(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Escapes a column name. Computed expressions are kept as written.
    fn escape_column_name(&self, name: &str) -> String {
        if name.contains('(') {
            name.to_string()
        } else {
            self.escape_object_name(name)
        }
    }

    /// Renders a string literal.
    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Renders a date, time or date-time literal. Other values are rendered
    /// as string literals of their text form.
    fn date_literal(&self, value: &Value) -> String {
        match value {
            Value::Date(date) => format!("'{}'", iso::format_date(date)),
            Value::Time(time) => format!("'{}'", iso::format_time(time)),
            Value::DateTime(date_time) => {
                format!("'{}'", iso::format_date_time(date_time).replace('T', " "))
            }
            other => self.string_literal(&other.to_string()),
        }
    }

    /// Literal for boolean true.
    fn true_literal(&self) -> &'static str {
        "TRUE"
    }

    /// Literal for boolean false.
    fn false_literal(&self) -> &'static str {
        "FALSE"
    }

    /// Expression returning the current date and time.
    fn current_date_time_function(&self) -> &'static str {
        "CURRENT_TIMESTAMP"
    }

    /// Template advancing a sequence, `{}` standing for the escaped sequence name.
    fn sequence_next_value_template(&self) -> Option<&'static str> {
        None
    }

    /// Template reading a sequence, `{}` standing for the escaped sequence name.
    fn sequence_current_value_template(&self) -> Option<&'static str> {
        None
    }

    /// Returns whether `value` names the current date-time.
    fn is_current_time_function(&self, value: &str) -> bool {
        let lower = value.to_lowercase();
        lower.starts_with("current_timestamp")
            || lower.starts_with("current_datetime")
            || value.eq_ignore_ascii_case(self.current_date_time_function())
    }

    /// Renders a database function for this dialect.
    fn generate_database_function_value(&self, function: &DatabaseFunction) -> String {
        let template = match function.kind() {
            FunctionKind::Plain => {
                return if self.is_current_time_function(function.value()) {
                    self.current_date_time_function().to_string()
                } else {
                    function.value().to_string()
                };
            }
            FunctionKind::SequenceNextValue => self.sequence_next_value_template(),
            FunctionKind::SequenceCurrentValue => self.sequence_current_value_template(),
        };
        match template {
            Some(template) => template.replace("{}", &self.escape_sequence_name(function)),
            None => function.value().to_string(),
        }
    }

    /// Escapes the (schema qualified) sequence of a sequence marker.
    fn escape_sequence_name(&self, function: &DatabaseFunction) -> String {
        self.escape_table_name(None, function.schema_name(), function.value())
    }

    /// Returns whether a string value is really a function call to be emitted as is.
    fn looks_like_function_call(&self, value: &str) -> bool {
        value.starts_with("\"SYSIBM\"")
            || value.starts_with("to_date(")
            || value.eq_ignore_ascii_case(self.current_date_time_function())
    }

    /// Returns whether one INSERT may carry several VALUES rows.
    fn supports_multi_row_insert(&self) -> bool {
        true
    }

    /// Returns whether sequence markers in INSERT values are written as
    /// `NEXT VALUE FOR <sequence>`.
    fn rewrites_sequence_next_value_in_insert(&self) -> bool {
        false
    }
}

/// The supported databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectKind {
    /// ANSI SQL.
    Generic,
    /// PostgreSQL.
    Postgres,
    /// SQLite.
    Sqlite,
    /// MySQL and MariaDB.
    MySql,
    /// HyperSQL.
    Hsql,
    /// Oracle.
    Oracle,
    /// DuckDB.
    DuckDb,
}

impl DialectKind {
    /// Resolves a dialect name or alias, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "generic" | "ansi" => Some(Self::Generic),
            "postgresql" | "postgres" | "pg" => Some(Self::Postgres),
            "sqlite" | "sqlite3" => Some(Self::Sqlite),
            "mysql" | "mariadb" => Some(Self::MySql),
            "hsqldb" | "hsql" => Some(Self::Hsql),
            "oracle" => Some(Self::Oracle),
            "duckdb" => Some(Self::DuckDb),
            _ => None,
        }
    }

    /// Builds the dialect with the given quoting strategy.
    #[must_use]
    pub fn build(self, quoting: ObjectQuotingStrategy) -> Box<dyn Dialect> {
        match self {
            Self::Generic => Box::new(GenericDialect::new().with_quoting(quoting)),
            Self::Postgres => Box::new(PostgresDialect::new().with_quoting(quoting)),
            Self::Sqlite => Box::new(SqliteDialect::new().with_quoting(quoting)),
            Self::MySql => Box::new(MySqlDialect::new().with_quoting(quoting)),
            Self::Hsql => Box::new(HsqlDialect::new().with_quoting(quoting)),
            Self::Oracle => Box::new(OracleDialect::new().with_quoting(quoting)),
            Self::DuckDb => Box::new(DuckDbDialect::new().with_quoting(quoting)),
        }
    }
}

/// Resolves a dialect by name or alias with legacy quoting.
#[must_use]
pub fn dialect_by_name(name: &str) -> Option<Box<dyn Dialect>> {
    DialectKind::from_name(name).map(|kind| kind.build(ObjectQuotingStrategy::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(DialectKind::from_name("PG"), Some(DialectKind::Postgres));
        assert_eq!(DialectKind::from_name("mariadb"), Some(DialectKind::MySql));
        assert_eq!(DialectKind::from_name("db2"), None);
        assert_eq!(dialect_by_name("hsql").unwrap().name(), "hsqldb");
    }

    #[test]
    fn test_legacy_quoting_only_when_needed() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.escape_object_name("person"), "person");
        assert_eq!(dialect.escape_object_name("order"), "\"order\"");
        assert_eq!(dialect.escape_object_name("first name"), "\"first name\"");
        assert_eq!(dialect.escape_object_name("1st"), "\"1st\"");
    }

    #[test]
    fn test_quote_all_and_reserved_only() {
        let all = GenericDialect::new().with_quoting(ObjectQuotingStrategy::QuoteAllObjects);
        assert_eq!(all.escape_object_name("person"), "\"person\"");
        let reserved =
            GenericDialect::new().with_quoting(ObjectQuotingStrategy::QuoteOnlyReservedWords);
        assert_eq!(reserved.escape_object_name("first name"), "first name");
        assert_eq!(reserved.escape_object_name("user"), "\"user\"");
    }

    #[test]
    fn test_table_name_qualification() {
        let dialect = GenericDialect::new();
        assert_eq!(
            dialect.escape_table_name(Some("main"), Some("public"), "person"),
            "public.person"
        );
        assert_eq!(dialect.escape_table_name(None, None, "person"), "person");
    }

    #[test]
    fn test_function_call_detection() {
        let dialect = GenericDialect::new();
        assert!(dialect.looks_like_function_call("to_date('2020-01-01')"));
        assert!(dialect.looks_like_function_call("current_timestamp"));
        assert!(dialect.looks_like_function_call("\"SYSIBM\".NEXTVAL"));
        assert!(!dialect.looks_like_function_call("Alice"));
    }

    #[test]
    fn test_string_literal_escaping() {
        assert_eq!(GenericDialect::new().string_literal("O'Brien"), "'O''Brien'");
    }
}
