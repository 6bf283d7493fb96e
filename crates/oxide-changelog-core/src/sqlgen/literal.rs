//! Rendering of column values as SQL literals.

use crate::dialect::Dialect;
use crate::function::FunctionKind;
use crate::value::Value;

/// Appends `value` to `sql` as a literal for `dialect`.
///
/// Rules apply in order: null and the text `NULL`, plain strings, temporal
/// values, booleans, database functions, then the value's text as is.
pub fn append_value(sql: &mut String, dialect: &dyn Dialect, value: &Value) {
    match value {
        Value::Null => sql.push_str("NULL"),
        v if v.to_string().eq_ignore_ascii_case("NULL") => sql.push_str("NULL"),
        Value::String(text) if !dialect.looks_like_function_call(text) => {
            sql.push_str(&dialect.string_literal(text));
        }
        v if v.is_temporal() => sql.push_str(&dialect.date_literal(v)),
        Value::Bool(true) => sql.push_str(dialect.true_literal()),
        Value::Bool(false) => sql.push_str(dialect.false_literal()),
        Value::Function(function)
            if function.kind() == FunctionKind::SequenceNextValue
                && dialect.rewrites_sequence_next_value_in_insert() =>
        {
            sql.push_str("NEXT VALUE FOR ");
            sql.push_str(function.value());
        }
        Value::Function(function) => {
            sql.push_str(&dialect.generate_database_function_value(function));
        }
        other => sql.push_str(&other.to_string()),
    }
}

/// Renders `value` as a literal for `dialect`.
#[must_use]
pub fn value_literal(dialect: &dyn Dialect, value: &Value) -> String {
    let mut sql = String::new();
    append_value(&mut sql, dialect, value);
    sql
}
