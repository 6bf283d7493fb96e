//! Column value carrier materialized from `column` nodes.

use rust_decimal::Decimal;

use crate::accessor::{PropertyTable, PropertyTarget, PropertyVeto};
use crate::function::{DatabaseFunction, FunctionKind, SequenceNextValue};
use crate::iso;
use crate::value::{IntoValue, Value};

/// One column of a change, with its value in whichever typed form was given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnConfig {
    name: Option<String>,
    column_type: Option<String>,
    value: Option<String>,
    value_numeric: Option<Decimal>,
    value_boolean: Option<bool>,
    value_date: Option<Value>,
    value_computed: Option<DatabaseFunction>,
    value_sequence_next: Option<SequenceNextValue>,
    remarks: Option<String>,
}

impl ColumnConfig {
    /// Creates a column config for `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the string value.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Sets the numeric value.
    #[must_use]
    pub const fn value_numeric(mut self, value: Decimal) -> Self {
        self.value_numeric = Some(value);
        self
    }

    /// Sets the boolean value.
    #[must_use]
    pub const fn value_boolean(mut self, value: bool) -> Self {
        self.value_boolean = Some(value);
        self
    }

    /// Sets a computed value.
    #[must_use]
    pub fn value_computed(mut self, function: DatabaseFunction) -> Self {
        self.value_computed = Some(function);
        self
    }

    /// A column holding `value` in the typed slot that matches it.
    ///
    /// Numbers that do not fit a decimal and unknown shapes fall back to the
    /// string value.
    #[must_use]
    pub fn from_value(name: impl Into<String>, value: &Value) -> Self {
        let mut column = Self::new(name);
        match value {
            Value::Null => {}
            Value::Function(function) if function.kind() == FunctionKind::SequenceNextValue => {
                column.value_sequence_next = Some(SequenceNextValue::from_function(function.clone()));
            }
            Value::Function(function) => column.value_computed = Some(function.clone()),
            Value::Date(_) | Value::Time(_) | Value::DateTime(_) => {
                column.value_date = Some(value.clone());
            }
            Value::Bool(flag) => column.value_boolean = Some(*flag),
            Value::Byte(_)
            | Value::Short(_)
            | Value::Int(_)
            | Value::Long(_)
            | Value::Float(_)
            | Value::Double(_)
            | Value::BigInteger(_)
            | Value::BigDecimal(_) => match value.to_string().parse::<Decimal>() {
                Ok(number) => column.value_numeric = Some(number),
                Err(_) => column.value = Some(value.to_string()),
            },
            other => column.value = Some(other.to_string()),
        }
        column
    }

    /// Sets the date value from its ISO text form.
    ///
    /// # Errors
    ///
    /// Vetoes text that is not an ISO date, time or date-time.
    pub fn set_value_date(&mut self, text: &str) -> Result<(), PropertyVeto> {
        let parsed = iso::parse_date_time(text)
            .map(Value::DateTime)
            .or_else(|_| iso::parse_date(text).map(Value::Date))
            .or_else(|_| iso::parse_time(text).map(Value::Time))
            .map_err(|_| PropertyVeto::new(format!("Invalid date value '{text}'")))?;
        self.value_date = Some(parsed);
        Ok(())
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared column type.
    #[must_use]
    pub fn column_type(&self) -> Option<&str> {
        self.column_type.as_deref()
    }

    /// Parsed date value.
    #[must_use]
    pub const fn date_value(&self) -> Option<&Value> {
        self.value_date.as_ref()
    }

    /// Computed value.
    #[must_use]
    pub const fn computed_value(&self) -> Option<&DatabaseFunction> {
        self.value_computed.as_ref()
    }

    /// Column remarks.
    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// The effective value: the first one set among computed, sequence,
    /// date, boolean, numeric and string values.
    #[must_use]
    pub fn value_object(&self) -> Value {
        if let Some(function) = &self.value_computed {
            return Value::Function(function.clone());
        }
        if let Some(sequence) = &self.value_sequence_next {
            return sequence.clone().into_value();
        }
        if let Some(date) = &self.value_date {
            return date.clone();
        }
        if let Some(flag) = self.value_boolean {
            return Value::Bool(flag);
        }
        if let Some(number) = self.value_numeric {
            return Value::BigDecimal(number);
        }
        self.value.clone().into_value()
    }
}

impl PropertyTarget for ColumnConfig {
    fn type_path() -> &'static str {
        "oxide_changelog_core::statement::ColumnConfig"
    }

    fn describe(table: &mut PropertyTable<Self>) {
        table
            .property("name", |c: &Self| c.name.clone(), |c: &mut Self, v| c.name = v)
            .property(
                "type",
                |c: &Self| c.column_type.clone(),
                |c: &mut Self, v| c.column_type = v,
            )
            .property("value", |c: &Self| c.value.clone(), |c: &mut Self, v| c.value = v)
            .property(
                "valueNumeric",
                |c: &Self| c.value_numeric,
                |c: &mut Self, v| c.value_numeric = v,
            )
            .property(
                "valueBoolean",
                |c: &Self| c.value_boolean,
                |c: &mut Self, v| c.value_boolean = v,
            )
            .property(
                "valueSequenceNext",
                |c: &Self| c.value_sequence_next.clone(),
                |c: &mut Self, v| c.value_sequence_next = v,
            )
            .getter("remarks", |c: &Self| c.remarks.clone())
            .getter("valueComputed", |c: &Self| c.value_computed.clone())
            .getter("valueDate", |c: &Self| {
                c.value_date.as_ref().map(ToString::to_string)
            })
            .setter("remarks", |c: &mut Self, v: Option<String>| c.remarks = v)
            .setter("valueComputed", |c: &mut Self, v: DatabaseFunction| {
                c.value_computed = Some(v);
            })
            .checked_setter("valueDate", |c: &mut Self, v: String| c.set_value_date(&v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_object_precedence() {
        let column = ColumnConfig::new("id")
            .value("7")
            .value_numeric(Decimal::new(7, 0));
        assert_eq!(column.value_object(), Value::BigDecimal(Decimal::new(7, 0)));

        let column = column.value_computed(DatabaseFunction::new("now()"));
        assert_eq!(
            column.value_object(),
            Value::Function(DatabaseFunction::new("now()"))
        );
        assert_eq!(ColumnConfig::new("empty").value_object(), Value::Null);
    }

    #[test]
    fn test_from_value_picks_typed_slot() {
        let column = ColumnConfig::from_value("id", &Value::Int(42));
        assert_eq!(column.value_object(), Value::BigDecimal(Decimal::new(42, 0)));

        let next = DatabaseFunction::sequence_next_value("person_seq");
        let column = ColumnConfig::from_value("id", &Value::Function(next.clone()));
        assert_eq!(column.value_object(), Value::Function(next));
        assert!(column.computed_value().is_none());

        let column = ColumnConfig::from_value("flag", &Value::Bool(true));
        assert_eq!(column.value_object(), Value::Bool(true));
        assert_eq!(ColumnConfig::from_value("n", &Value::Null), ColumnConfig::new("n"));
        assert_eq!(
            ColumnConfig::from_value("ratio", &Value::Double(f64::NAN)).value_object(),
            Value::String(String::from("NaN"))
        );
    }

    #[test]
    fn test_value_date_vetoes_garbage() {
        let mut column = ColumnConfig::new("created");
        assert!(column.set_value_date("2024-01-02T03:04:05").is_ok());
        assert!(matches!(column.date_value(), Some(Value::DateTime(_))));
        assert!(column.set_value_date("2024-01-02").is_ok());
        assert!(matches!(column.date_value(), Some(Value::Date(_))));
        assert!(column.set_value_date("soon").is_err());
    }
}
