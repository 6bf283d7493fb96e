//! Conversion of dynamic values to a declared kind.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::MaterializeContext;
use crate::accessor::AccessorCache;
use crate::clauses::StringClauses;
use crate::error::ConversionError;
use crate::iso;
use crate::value::{EnumInfo, EnumValue, Value, ValueKind};

const TRUTHY: [&str; 7] = ["true", "t", "1", "1.0", "yes", "y", "on"];
const FALSY: [&str; 7] = ["false", "f", "0", "0.0", "no", "n", "off"];

static ZERO_FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.0+$").expect("Invalid zero fraction regex"));

#[derive(Debug, thiserror::Error)]
#[error("sign after radix prefix")]
struct MisplacedSign;

/// Converts `value` to `kind` using the process-wide accessor cache.
///
/// `name` is the argument being converted and only shows up in error messages.
///
/// # Errors
///
/// Returns a [`ConversionError`] when the value cannot represent the kind.
pub fn convert(
    value: Value,
    kind: ValueKind,
    name: Option<&str>,
    context: &MaterializeContext,
) -> Result<Value, ConversionError> {
    convert_with(AccessorCache::global(), value, kind, name, context)
}

pub(crate) fn convert_with(
    cache: &AccessorCache,
    value: Value,
    kind: ValueKind,
    name: Option<&str>,
    context: &MaterializeContext,
) -> Result<Value, ConversionError> {
    if value.is_null() || kind.accepts(&value) {
        return Ok(value);
    }

    match kind {
        ValueKind::Enum(info) => to_enum(info, &value, name),
        kind if kind.is_numeric() => to_number(value, kind),
        ValueKind::Bool => to_bool(&value, context),
        ValueKind::String => Ok(Value::String(value.to_string())),
        ValueKind::List => Ok(match value {
            Value::List(items) => Value::List(items),
            single => Value::List(vec![single]),
        }),
        ValueKind::Clauses => Ok(Value::Clauses(
            StringClauses::new().append(value.to_string()),
        )),
        ValueKind::TypeRef => {
            let type_name = value.to_string();
            cache
                .resolve_type(&type_name)
                .map(Value::TypeRef)
                .ok_or(ConversionError::UnknownType(type_name))
        }
        ValueKind::Path => Ok(Value::Path(PathBuf::from(value.to_string()))),
        ValueKind::Uuid => {
            let text = value.to_string();
            Uuid::parse_str(&text)
                .map(Value::Uuid)
                .map_err(|source| ConversionError::InvalidUuid {
                    value: text,
                    source,
                })
        }
        ValueKind::Date | ValueKind::Time | ValueKind::DateTime => to_temporal(&value, kind),
        ValueKind::Level => {
            let text = value.to_string();
            text.to_uppercase()
                .parse::<tracing::Level>()
                .map(Value::Level)
                .map_err(|_| ConversionError::InvalidLevel(text))
        }
        _ => Ok(value),
    }
}

fn to_enum(
    info: &'static EnumInfo,
    value: &Value,
    name: Option<&str>,
) -> Result<Value, ConversionError> {
    let text = value.to_string();
    match info.find(&text.to_uppercase()) {
        Some(constant) => Ok(Value::Enum(EnumValue {
            info,
            name: constant,
        })),
        None => Err(ConversionError::InvalidEnum {
            value: text,
            context: name.filter(|n| !n.is_empty()).map(str::to_string),
            allowed: info.sorted_constants(),
        }),
    }
}

fn strip_zero_fraction(text: &str) -> String {
    ZERO_FRACTION.replace(text, "").into_owned()
}

pub(super) fn invalid_number(
    text: &str,
    target: ValueKind,
    source: impl std::error::Error + Send + Sync + 'static,
) -> ConversionError {
    ConversionError::InvalidNumber {
        value: text.to_string(),
        target,
        source: Box::new(source),
    }
}

fn to_number(value: Value, kind: ValueKind) -> Result<Value, ConversionError> {
    match value {
        Value::String(text) => text_to_number(&text, kind),
        numeric if numeric.is_numeric() => numeric_to_number(&numeric, kind),
        other => Err(ConversionError::UnknownConversion {
            value: other.to_string(),
            source_type: other.type_name(),
            target: kind,
        }),
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Byte(n) => Some(f64::from(*n)),
        Value::Short(n) => Some(f64::from(*n)),
        Value::Int(n) => Some(f64::from(*n)),
        Value::Long(n) => n.to_f64(),
        Value::Float(n) => Some(f64::from(*n)),
        Value::Double(n) => Some(*n),
        Value::BigInteger(n) => n.to_f64(),
        Value::BigDecimal(n) => n.to_f64(),
        _ => None,
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, rust_decimal::Error> {
    Decimal::from_str(text).or_else(|_| Decimal::from_scientific(text))
}

fn numeric_to_number(value: &Value, kind: ValueKind) -> Result<Value, ConversionError> {
    let text = strip_zero_fraction(&value.to_string());
    let overflow = || ConversionError::Overflow {
        value: value.to_string(),
        source_type: value.type_name(),
        target: kind,
    };
    let parse_long = || text.parse::<i64>().map_err(|e| invalid_number(&text, kind, e));

    match kind {
        ValueKind::Byte => i8::try_from(parse_long()?)
            .map(Value::Byte)
            .map_err(|_| overflow()),
        ValueKind::Short => i16::try_from(parse_long()?)
            .map(Value::Short)
            .map_err(|_| overflow()),
        ValueKind::Int => i32::try_from(parse_long()?)
            .map(Value::Int)
            .map_err(|_| overflow()),
        ValueKind::Long => parse_long().map(Value::Long),
        #[allow(clippy::cast_possible_truncation)]
        ValueKind::Float => Ok(Value::Float(as_f64(value).unwrap_or_default() as f32)),
        ValueKind::Double => Ok(Value::Double(as_f64(value).unwrap_or_default())),
        ValueKind::BigInteger => text
            .parse::<i128>()
            .map(Value::BigInteger)
            .map_err(|e| invalid_number(&text, kind, e)),
        ValueKind::BigDecimal => parse_decimal(&text)
            .map(Value::BigDecimal)
            .map_err(|e| invalid_number(&text, kind, e)),
        _ => Err(ConversionError::UnknownConversion {
            value: value.to_string(),
            source_type: value.type_name(),
            target: kind,
        }),
    }
}

/// Integer literal with optional sign and `0x`, `0X`, `#` or leading-zero octal prefix.
fn decode_integer(text: &str) -> Result<i128, Box<dyn std::error::Error + Send + Sync>> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .or_else(|| unsigned.strip_prefix('#'))
    {
        (16, hex)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (8, &unsigned[1..])
    } else {
        (10, unsigned)
    };
    if digits.starts_with(['-', '+']) {
        return Err(Box::new(MisplacedSign));
    }
    let magnitude = i128::from_str_radix(digits, radix)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn text_to_number(text: &str, kind: ValueKind) -> Result<Value, ConversionError> {
    let mut text = if text.contains('.') {
        strip_zero_fraction(text)
    } else {
        text.to_string()
    };
    if text.is_empty() {
        text.push('0');
    }
    let overflow = || ConversionError::Overflow {
        value: text.clone(),
        source_type: "String",
        target: kind,
    };
    let decode = || {
        decode_integer(&text).map_err(|source| ConversionError::InvalidNumber {
            value: text.clone(),
            target: kind,
            source,
        })
    };

    match kind {
        ValueKind::Byte => i8::try_from(decode()?)
            .map(Value::Byte)
            .map_err(|_| overflow()),
        ValueKind::Short => i16::try_from(decode()?)
            .map(Value::Short)
            .map_err(|_| overflow()),
        ValueKind::Int => i32::try_from(decode()?)
            .map(Value::Int)
            .map_err(|_| overflow()),
        ValueKind::Long => {
            i64::try_from(decode()?)
                .map(Value::Long)
                .map_err(|e| invalid_number(&text, kind, e))
        }
        ValueKind::Float => text
            .parse::<f32>()
            .map(Value::Float)
            .map_err(|e| invalid_number(&text, kind, e)),
        ValueKind::Double => text
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|e| invalid_number(&text, kind, e)),
        ValueKind::BigInteger => text
            .parse::<i128>()
            .map(Value::BigInteger)
            .map_err(|e| invalid_number(&text, kind, e)),
        ValueKind::BigDecimal => parse_decimal(&text)
            .map(Value::BigDecimal)
            .map_err(|e| invalid_number(&text, kind, e)),
        _ => Err(ConversionError::UnknownConversion {
            value: text.clone(),
            source_type: "String",
            target: kind,
        }),
    }
}

fn to_bool(value: &Value, context: &MaterializeContext) -> Result<Value, ConversionError> {
    let text = value.to_string();
    let lower = text.to_lowercase();
    if TRUTHY.contains(&lower.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSY.contains(&lower.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(ConversionError::InvalidBoolean {
            value: text,
            key: context.argument_key.clone(),
        })
    }
}

fn to_temporal(value: &Value, kind: ValueKind) -> Result<Value, ConversionError> {
    let text = value.to_string();
    let parsed = match kind {
        ValueKind::Date => iso::parse_date(&text).map(Value::Date),
        ValueKind::Time => iso::parse_time(&text).map(Value::Time),
        _ => iso::parse_date_time(&text)
            .or_else(|err| {
                iso::parse_date(&text)
                    .map(|date| date.and_time(chrono::NaiveTime::MIN))
                    .map_err(|_| err)
            })
            .map(Value::DateTime),
    };
    parsed.map_err(|source| ConversionError::InvalidDate {
        value: text,
        target: kind,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> MaterializeContext {
        MaterializeContext::default()
    }

    fn text(s: &str) -> Value {
        Value::String(s.to_string())
    }

    #[test]
    fn test_zero_fraction_is_stripped_once() {
        assert_eq!(strip_zero_fraction("12.000"), "12");
        assert_eq!(strip_zero_fraction("12.50"), "12.50");
        assert_eq!(strip_zero_fraction("1200"), "1200");
    }

    #[test]
    fn test_decode_prefixes() {
        assert_eq!(decode_integer("0x1F").unwrap(), 31);
        assert_eq!(decode_integer("#ff").unwrap(), 255);
        assert_eq!(decode_integer("-010").unwrap(), -8);
        assert_eq!(decode_integer("0").unwrap(), 0);
        assert!(decode_integer("0x-1").is_err());
        assert!(decode_integer("09").is_err());
    }

    #[test]
    fn test_numeric_sources_are_range_checked() {
        assert_eq!(
            convert(Value::Long(127), ValueKind::Byte, None, &ctx()).unwrap(),
            Value::Byte(127)
        );
        assert!(matches!(
            convert(Value::Long(128), ValueKind::Byte, None, &ctx()),
            Err(ConversionError::Overflow { .. })
        ));
        assert_eq!(
            convert(Value::Double(3.0), ValueKind::Int, None, &ctx()).unwrap(),
            Value::Int(3)
        );
        assert!(matches!(
            convert(Value::Double(3.5), ValueKind::Int, None, &ctx()),
            Err(ConversionError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_wide_integers_skip_overflow_check() {
        assert_eq!(
            convert(Value::BigInteger(1 << 70), ValueKind::BigInteger, None, &ctx()).unwrap(),
            Value::BigInteger(1 << 70)
        );
        assert!(matches!(
            convert(text("99999999999999999999"), ValueKind::Long, None, &ctx()),
            Err(ConversionError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_text_numbers() {
        assert_eq!(
            convert(text(""), ValueKind::Int, None, &ctx()).unwrap(),
            Value::Int(0)
        );
        assert_eq!(
            convert(text("5.00"), ValueKind::Long, None, &ctx()).unwrap(),
            Value::Long(5)
        );
        assert_eq!(
            convert(text("2.5"), ValueKind::Double, None, &ctx()).unwrap(),
            Value::Double(2.5)
        );
        assert_eq!(
            convert(text("10.25"), ValueKind::BigDecimal, None, &ctx()).unwrap(),
            Value::BigDecimal(Decimal::new(1025, 2))
        );
    }

    #[test]
    fn test_list_and_clauses() {
        assert_eq!(
            convert(Value::Int(1), ValueKind::List, None, &ctx()).unwrap(),
            Value::List(vec![Value::Int(1)])
        );
        let clauses = convert(text("ORDER BY id"), ValueKind::Clauses, None, &ctx()).unwrap();
        assert_eq!(clauses.to_string(), "ORDER BY id");
    }

    #[test]
    fn test_date_time_from_plain_date() {
        let converted = convert(text("2024-05-01"), ValueKind::DateTime, None, &ctx()).unwrap();
        assert_eq!(converted.to_string(), "2024-05-01T00:00:00");
    }

    #[test]
    fn test_level_and_path() {
        assert_eq!(
            convert(text("warn"), ValueKind::Level, None, &ctx()).unwrap(),
            Value::Level(tracing::Level::WARN)
        );
        assert!(matches!(
            convert(text("loud"), ValueKind::Level, None, &ctx()),
            Err(ConversionError::InvalidLevel(_))
        ));
        assert_eq!(
            convert(text("db/changelog.xml"), ValueKind::Path, None, &ctx()).unwrap(),
            Value::Path(PathBuf::from("db/changelog.xml"))
        );
    }
}
