//! Assigning raw node values onto typed target objects.
//!
//! The [`PropertyMaterializer`] resolves a property through the
//! [`AccessorCache`], coerces the raw value to the declared [`ValueKind`] and
//! invokes the accessor. [`convert`] is the standalone conversion routine.

mod convert;

pub use convert::convert;

use convert::invalid_number;

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::accessor::{AccessorCache, Materializable, WriteAccessor};
use crate::error::{ConversionError, MaterializeError, Result};
use crate::function::{DatabaseFunction, FunctionKind};
use crate::node::ParsedNode;
use crate::value::{EnumValue, Value, ValueKind};

/// Caller-owned settings that change how values are materialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeContext {
    /// Skip string values aimed at properties that cannot take a string.
    pub ignore_missing_references: bool,
    /// Name of the argument currently being converted, for error messages.
    pub argument_key: Option<String>,
}

impl MaterializeContext {
    /// Creates a default context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ignore-missing-references flag.
    #[must_use]
    pub const fn ignore_missing_references(mut self, enabled: bool) -> Self {
        self.ignore_missing_references = enabled;
        self
    }

    /// Sets the current argument key.
    #[must_use]
    pub fn argument_key(mut self, key: impl Into<String>) -> Self {
        self.argument_key = Some(key.into());
        self
    }
}

/// Reads and writes properties of [`Materializable`] objects.
#[derive(Debug, Clone)]
pub struct PropertyMaterializer<'a> {
    cache: &'a AccessorCache,
    context: MaterializeContext,
}

impl Default for PropertyMaterializer<'static> {
    fn default() -> Self {
        Self::new(AccessorCache::global(), MaterializeContext::default())
    }
}

impl<'a> PropertyMaterializer<'a> {
    /// Creates a materializer over `cache`.
    #[must_use]
    pub const fn new(cache: &'a AccessorCache, context: MaterializeContext) -> Self {
        Self { cache, context }
    }

    /// The context this materializer applies.
    #[must_use]
    pub const fn context(&self) -> &MaterializeContext {
        &self.context
    }

    /// Reads a property.
    ///
    /// # Errors
    ///
    /// [`MaterializeError::NotFound`] if the type has no reader for `name`,
    /// [`MaterializeError::Internal`] if the reader fails.
    pub fn get_property<T>(&self, target: &T, name: &str) -> Result<Value>
    where
        T: Materializable + ?Sized,
    {
        let map = target.accessor_map(self.cache);
        let reader = map.reader(name).ok_or_else(|| not_found(target, name))?;
        reader
            .invoke(target.as_any())
            .map_err(|cause| MaterializeError::Internal {
                accessor: reader.name().to_string(),
                value_type: None,
                cause,
            })
    }

    /// Writes a property from its text form.
    ///
    /// # Errors
    ///
    /// [`MaterializeError::NotFound`] if the type has no writer for `name`,
    /// [`MaterializeError::Conversion`] if the text does not parse as the
    /// property kind, [`MaterializeError::Internal`] if the writer fails.
    pub fn set_property<T>(&self, target: &mut T, name: &str, text: &str) -> Result<()>
    where
        T: Materializable + ?Sized,
    {
        let map = target.accessor_map(self.cache);
        let writer = map.writer(name).ok_or_else(|| not_found(target, name))?;
        let value = coerce_text(text, writer.kind())?;
        trace!(property = name, kind = %writer.kind(), "setting property from text");
        invoke_writer(writer, target, value)
    }

    /// Writes a property from a typed value.
    ///
    /// # Errors
    ///
    /// Same as [`PropertyMaterializer::set_property`].
    pub fn set_property_value<T>(&self, target: &mut T, name: &str, value: Value) -> Result<()>
    where
        T: Materializable + ?Sized,
    {
        let map = target.accessor_map(self.cache);
        let writer = map.writer(name).ok_or_else(|| not_found(target, name))?;

        if self.context.ignore_missing_references
            && matches!(value, Value::String(_))
            && !writer.kind().accepts_string()
        {
            debug!(
                property = name,
                kind = %writer.kind(),
                "skipping unresolved reference"
            );
            return Ok(());
        }
        if value.is_null() || writer.kind().accepts(&value) {
            return invoke_writer(writer, target, value);
        }
        self.set_property(target, name, &value.to_string())
    }

    /// Applies every attribute-like child of `node` to `target`.
    ///
    /// Element children are left to the caller.
    ///
    /// # Errors
    ///
    /// Stops at the first property that fails to materialize.
    pub fn load_node<T>(&self, node: &ParsedNode, target: &mut T) -> Result<()>
    where
        T: Materializable + ?Sized,
    {
        for child in node.children().iter().filter(|c| c.is_attribute_like()) {
            if let Some(value) = child.value() {
                self.set_property_value(target, child.name(), value.to_value())?;
            }
        }
        Ok(())
    }

    /// Builds a node named `name` with every non-null readable property of
    /// `target` as an attribute-like child, in property name order.
    ///
    /// This is the reverse of [`PropertyMaterializer::load_node`].
    ///
    /// # Errors
    ///
    /// [`MaterializeError::Internal`] if a reader fails.
    pub fn create_node<T>(&self, name: &str, target: &T) -> Result<ParsedNode>
    where
        T: Materializable + ?Sized,
    {
        let map = target.accessor_map(self.cache);
        let mut node = ParsedNode::new(name);
        for property in map.property_names().filter(|p| map.reader(p).is_some()) {
            let value = self.get_property(target, property)?;
            if !value.is_null() {
                node.add_child(ParsedNode::with_value(property, value.to_string()));
            }
        }
        trace!(node = name, attributes = node.children().len(), "created node");
        Ok(node)
    }

    /// Converts `value` to `kind`, resolving type references through this
    /// materializer's cache.
    ///
    /// # Errors
    ///
    /// Returns a [`ConversionError`] when the value cannot represent the kind.
    pub fn convert(
        &self,
        value: Value,
        kind: ValueKind,
        name: Option<&str>,
    ) -> std::result::Result<Value, ConversionError> {
        convert::convert_with(self.cache, value, kind, name, &self.context)
    }
}

fn not_found<T: Materializable + ?Sized>(target: &T, property: &str) -> MaterializeError {
    MaterializeError::NotFound {
        property: property.to_string(),
        type_name: target.target_type_name(),
    }
}

fn invoke_writer<T>(writer: &WriteAccessor, target: &mut T, value: Value) -> Result<()>
where
    T: Materializable + ?Sized,
{
    let value_type = value.type_name();
    writer
        .invoke(target.as_any_mut(), value)
        .map_err(|cause| MaterializeError::Internal {
            accessor: writer.name().to_string(),
            value_type: Some(value_type),
            cause,
        })
}

/// Fixed text coercion of the string write path. Kinds without a rule get
/// the text unchanged.
fn coerce_text(text: &str, kind: ValueKind) -> std::result::Result<Value, ConversionError> {
    let value = match kind {
        ValueKind::Bool => Value::Bool(text.eq_ignore_ascii_case("true")),
        ValueKind::Int => Value::Int(
            text.parse::<i32>()
                .map_err(|e| invalid_number(text, kind, e))?,
        ),
        ValueKind::Long => Value::Long(
            text.parse::<i64>()
                .map_err(|e| invalid_number(text, kind, e))?,
        ),
        ValueKind::BigInteger => Value::BigInteger(
            text.parse::<i128>()
                .map_err(|e| invalid_number(text, kind, e))?,
        ),
        ValueKind::BigDecimal => Value::BigDecimal(
            text.parse::<Decimal>()
                .map_err(|e| invalid_number(text, kind, e))?,
        ),
        ValueKind::Function(FunctionKind::Plain) => Value::Function(DatabaseFunction::new(text)),
        ValueKind::Function(FunctionKind::SequenceNextValue) => {
            Value::Function(DatabaseFunction::sequence_next_value(text))
        }
        ValueKind::Function(FunctionKind::SequenceCurrentValue) => {
            Value::Function(DatabaseFunction::sequence_current_value(text))
        }
        ValueKind::Enum(info) => match info.find(text) {
            Some(name) => Value::Enum(EnumValue { info, name }),
            None => {
                return Err(ConversionError::InvalidEnum {
                    value: text.to_string(),
                    context: None,
                    allowed: info.sorted_constants(),
                })
            }
        },
        _ => Value::String(text.to_string()),
    };
    Ok(value)
}
