//! Dynamic values and the closed set of property kinds.
//!
//! Every value that flows from a parsed change log into a typed target object,
//! or from a statement into a SQL generator, is a [`Value`]. Every property a
//! target object exposes declares the [`ValueKind`] it reads or writes, which is
//! what the materializer dispatches on when coercing raw input.

use std::fmt;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::clauses::StringClauses;
use crate::function::{DatabaseFunction, FunctionKind, SequenceNextValue};
use crate::iso;

/// Name and constant list of an enum that can be materialized from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumInfo {
    /// Rust type name of the enum.
    pub type_name: &'static str,
    /// Constant names in declaration order.
    pub constants: &'static [&'static str],
}

impl EnumInfo {
    /// Looks up a constant by its exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&'static str> {
        self.constants.iter().copied().find(|c| *c == name)
    }

    /// Returns the constant names in lexical order.
    #[must_use]
    pub fn sorted_constants(&self) -> Vec<&'static str> {
        let mut constants = self.constants.to_vec();
        constants.sort_unstable();
        constants
    }
}

/// One constant of a materializable enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumValue {
    /// The enum the constant belongs to.
    pub info: &'static EnumInfo,
    /// The constant name.
    pub name: &'static str,
}

/// A reference to a type registered with an accessor cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    /// Name the type was registered under, see `PropertyTarget::type_path`.
    pub name: String,
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// 8-bit integer.
    Byte(i8),
    /// 16-bit integer.
    Short(i16),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// Single precision float.
    Float(f32),
    /// Double precision float.
    Double(f64),
    /// Arbitrary width integer (bounded to 128 bits).
    BigInteger(i128),
    /// Exact decimal.
    BigDecimal(Decimal),
    /// Text.
    String(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date and time without zone.
    DateTime(NaiveDateTime),
    /// UUID.
    Uuid(Uuid),
    /// Filesystem path.
    Path(PathBuf),
    /// Enum constant.
    Enum(EnumValue),
    /// Ordered collection.
    List(Vec<Value>),
    /// Clause list.
    Clauses(StringClauses),
    /// Database function or sequence marker.
    Function(DatabaseFunction),
    /// Logging level.
    Level(tracing::Level),
    /// Registered type reference.
    TypeRef(TypeRef),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for every numeric variant.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Byte(_)
                | Self::Short(_)
                | Self::Int(_)
                | Self::Long(_)
                | Self::Float(_)
                | Self::Double(_)
                | Self::BigInteger(_)
                | Self::BigDecimal(_)
        )
    }

    /// Returns true for date, time and date-time values.
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date(_) | Self::Time(_) | Self::DateTime(_))
    }

    /// Returns the text of a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the runtime type, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Byte(_) => "i8",
            Self::Short(_) => "i16",
            Self::Int(_) => "i32",
            Self::Long(_) => "i64",
            Self::Float(_) => "f32",
            Self::Double(_) => "f64",
            Self::BigInteger(_) => "i128",
            Self::BigDecimal(_) => "Decimal",
            Self::String(_) => "String",
            Self::Date(_) => "NaiveDate",
            Self::Time(_) => "NaiveTime",
            Self::DateTime(_) => "NaiveDateTime",
            Self::Uuid(_) => "Uuid",
            Self::Path(_) => "PathBuf",
            Self::Enum(e) => e.info.type_name,
            Self::List(_) => "Vec",
            Self::Clauses(_) => "StringClauses",
            Self::Function(f) => f.kind().type_name(),
            Self::Level(_) => "Level",
            Self::TypeRef(_) => "TypeRef",
        }
    }
}

// Whole numbers keep one decimal place, so 1.0 stays "1.0".
macro_rules! write_float {
    ($f:expr, $value:expr) => {{
        let value = $value;
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
            write!($f, "{value:.1}")
        } else {
            write!($f, "{value}")
        }
    }};
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Byte(n) => write!(f, "{n}"),
            Self::Short(n) => write!(f, "{n}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Long(n) => write!(f, "{n}"),
            Self::Float(n) => write_float!(f, *n),
            Self::Double(n) => write_float!(f, *n),
            Self::BigInteger(n) => write!(f, "{n}"),
            Self::BigDecimal(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
            Self::Date(d) => f.write_str(&iso::format_date(d)),
            Self::Time(t) => f.write_str(&iso::format_time(t)),
            Self::DateTime(dt) => f.write_str(&iso::format_date_time(dt)),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Enum(e) => f.write_str(e.name),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Clauses(c) => write!(f, "{c}"),
            Self::Function(func) => f.write_str(func.value()),
            Self::Level(level) => write!(f, "{level}"),
            Self::TypeRef(t) => f.write_str(&t.name),
        }
    }
}

/// The declared type of a property's read result or write argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Accepts every value unchanged.
    Any,
    /// `bool`.
    Bool,
    /// `i8`.
    Byte,
    /// `i16`.
    Short,
    /// `i32`.
    Int,
    /// `i64`.
    Long,
    /// `f32`.
    Float,
    /// `f64`.
    Double,
    /// `i128`.
    BigInteger,
    /// `Decimal`.
    BigDecimal,
    /// `String`.
    String,
    /// `NaiveDate`.
    Date,
    /// `NaiveTime`.
    Time,
    /// `NaiveDateTime`.
    DateTime,
    /// `Uuid`.
    Uuid,
    /// `PathBuf`.
    Path,
    /// A materializable enum.
    Enum(&'static EnumInfo),
    /// Ordered collection.
    List,
    /// Clause list.
    Clauses,
    /// Database function of the given kind.
    Function(FunctionKind),
    /// Logging level.
    Level,
    /// Registered type reference.
    TypeRef,
}

impl ValueKind {
    /// Returns whether `value` can be handed to a property of this kind as is.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _) => true,
            (_, Value::Null) => false,
            (Self::Enum(info), Value::Enum(e)) => e.info.type_name == info.type_name,
            (Self::Function(FunctionKind::Plain), Value::Function(_)) => true,
            (Self::Function(kind), Value::Function(f)) => f.kind() == *kind,
            (Self::Bool, Value::Bool(_))
            | (Self::Byte, Value::Byte(_))
            | (Self::Short, Value::Short(_))
            | (Self::Int, Value::Int(_))
            | (Self::Long, Value::Long(_))
            | (Self::Float, Value::Float(_))
            | (Self::Double, Value::Double(_))
            | (Self::BigInteger, Value::BigInteger(_))
            | (Self::BigDecimal, Value::BigDecimal(_))
            | (Self::String, Value::String(_))
            | (Self::Date, Value::Date(_))
            | (Self::Time, Value::Time(_))
            | (Self::DateTime, Value::DateTime(_))
            | (Self::Uuid, Value::Uuid(_))
            | (Self::Path, Value::Path(_))
            | (Self::List, Value::List(_))
            | (Self::Clauses, Value::Clauses(_))
            | (Self::Level, Value::Level(_))
            | (Self::TypeRef, Value::TypeRef(_)) => true,
            _ => false,
        }
    }

    /// Returns whether a string can be assigned to this kind without conversion.
    #[must_use]
    pub const fn accepts_string(&self) -> bool {
        matches!(self, Self::Any | Self::String)
    }

    /// Returns true for the numeric kinds.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
                | Self::BigInteger
                | Self::BigDecimal
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "Value",
            Self::Bool => "bool",
            Self::Byte => "i8",
            Self::Short => "i16",
            Self::Int => "i32",
            Self::Long => "i64",
            Self::Float => "f32",
            Self::Double => "f64",
            Self::BigInteger => "i128",
            Self::BigDecimal => "Decimal",
            Self::String => "String",
            Self::Date => "NaiveDate",
            Self::Time => "NaiveTime",
            Self::DateTime => "NaiveDateTime",
            Self::Uuid => "Uuid",
            Self::Path => "PathBuf",
            Self::Enum(info) => info.type_name,
            Self::List => "Vec",
            Self::Clauses => "StringClauses",
            Self::Function(kind) => kind.type_name(),
            Self::Level => "Level",
            Self::TypeRef => "TypeRef",
        };
        f.write_str(name)
    }
}

/// Types that declare a [`ValueKind`].
pub trait ValueType {
    /// The kind a property of this type reads or writes.
    fn value_kind() -> ValueKind;
}

/// Types that can be turned into a [`Value`].
pub trait IntoValue {
    /// Converts into a `Value`.
    fn into_value(self) -> Value;
}

/// Types that can be taken out of a [`Value`] without coercion.
pub trait FromValue: Sized {
    /// Extracts `Self`, handing the value back if it has the wrong shape.
    ///
    /// # Errors
    ///
    /// Returns the rejected value when its variant does not match.
    fn from_value(value: Value) -> Result<Self, Value>;
}

macro_rules! impl_value_for {
    ($ty:ty, $variant:ident) => {
        impl ValueType for $ty {
            fn value_kind() -> ValueKind {
                ValueKind::$variant
            }
        }

        impl IntoValue for $ty {
            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }

        impl FromValue for $ty {
            fn from_value(value: Value) -> Result<Self, Value> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

impl_value_for!(bool, Bool);
impl_value_for!(i8, Byte);
impl_value_for!(i16, Short);
impl_value_for!(i32, Int);
impl_value_for!(i64, Long);
impl_value_for!(f32, Float);
impl_value_for!(f64, Double);
impl_value_for!(i128, BigInteger);
impl_value_for!(Decimal, BigDecimal);
impl_value_for!(String, String);
impl_value_for!(NaiveDate, Date);
impl_value_for!(NaiveTime, Time);
impl_value_for!(NaiveDateTime, DateTime);
impl_value_for!(Uuid, Uuid);
impl_value_for!(PathBuf, Path);
impl_value_for!(StringClauses, Clauses);
impl_value_for!(tracing::Level, Level);
impl_value_for!(TypeRef, TypeRef);

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(String::from(self))
    }
}

impl ValueType for Value {
    fn value_kind() -> ValueKind {
        ValueKind::Any
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl ValueType for DatabaseFunction {
    fn value_kind() -> ValueKind {
        ValueKind::Function(FunctionKind::Plain)
    }
}

impl IntoValue for DatabaseFunction {
    fn into_value(self) -> Value {
        Value::Function(self)
    }
}

impl FromValue for DatabaseFunction {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Function(f) => Ok(f),
            other => Err(other),
        }
    }
}

impl ValueType for SequenceNextValue {
    fn value_kind() -> ValueKind {
        ValueKind::Function(FunctionKind::SequenceNextValue)
    }
}

impl IntoValue for SequenceNextValue {
    fn into_value(self) -> Value {
        Value::Function(self.into_function())
    }
}

impl FromValue for SequenceNextValue {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Function(f) if f.kind() == FunctionKind::SequenceNextValue => {
                Ok(Self::from_function(f))
            }
            other => Err(other),
        }
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn value_kind() -> ValueKind {
        T::value_kind()
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T> ValueType for Vec<T> {
    fn value_kind() -> ValueKind {
        ValueKind::List
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(other),
        }
    }
}

/// Declares an enum whose constants can be materialized from their names.
///
/// ```rust
/// oxide_changelog_core::named_enum! {
///     /// How rows are locked.
///     pub enum LockMode {
///         Shared => "SHARED",
///         Exclusive => "EXCLUSIVE",
///     }
/// }
///
/// assert_eq!(LockMode::from_constant("SHARED"), Some(LockMode::Shared));
/// assert_eq!(LockMode::Exclusive.constant_name(), "EXCLUSIVE");
/// ```
#[macro_export]
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $constant:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Name and constants of this enum.
            #[must_use]
            pub fn enum_info() -> &'static $crate::value::EnumInfo {
                static INFO: $crate::value::EnumInfo = $crate::value::EnumInfo {
                    type_name: stringify!($name),
                    constants: &[$($constant),+],
                };
                &INFO
            }

            /// The constant name of this variant.
            #[must_use]
            pub const fn constant_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $constant),+
                }
            }

            /// Finds the variant with exactly this constant name.
            #[must_use]
            pub fn from_constant(name: &str) -> Option<Self> {
                match name {
                    $($constant => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::value::ValueType for $name {
            fn value_kind() -> $crate::value::ValueKind {
                $crate::value::ValueKind::Enum(Self::enum_info())
            }
        }

        impl $crate::value::IntoValue for $name {
            fn into_value(self) -> $crate::value::Value {
                $crate::value::Value::Enum($crate::value::EnumValue {
                    info: Self::enum_info(),
                    name: self.constant_name(),
                })
            }
        }

        impl $crate::value::FromValue for $name {
            fn from_value(value: $crate::value::Value) -> Result<Self, $crate::value::Value> {
                match value {
                    $crate::value::Value::Enum(e) if e.info.type_name == Self::enum_info().type_name => {
                        Self::from_constant(e.name).ok_or($crate::value::Value::Enum(e))
                    }
                    other => Err(other),
                }
            }
        }
    };
}
