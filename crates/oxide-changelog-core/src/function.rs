//! Database function markers.
//!
//! A [`DatabaseFunction`] is an opaque SQL expression that must be emitted
//! verbatim (or translated per dialect) instead of being quoted as a literal.

/// What a [`DatabaseFunction`] stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// An arbitrary expression such as `now()`.
    Plain,
    /// Advance a sequence and return the new value.
    SequenceNextValue,
    /// Read the current value of a sequence.
    SequenceCurrentValue,
}

impl FunctionKind {
    /// Name of the marker type, used in error messages.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Plain => "DatabaseFunction",
            Self::SequenceNextValue => "SequenceNextValueFunction",
            Self::SequenceCurrentValue => "SequenceCurrentValueFunction",
        }
    }
}

/// An expression evaluated by the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseFunction {
    kind: FunctionKind,
    value: String,
    schema_name: Option<String>,
}

impl DatabaseFunction {
    /// Creates a plain function expression.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            kind: FunctionKind::Plain,
            value: value.into(),
            schema_name: None,
        }
    }

    /// Creates a "next value" marker for the named sequence.
    #[must_use]
    pub fn sequence_next_value(sequence_name: impl Into<String>) -> Self {
        Self {
            kind: FunctionKind::SequenceNextValue,
            value: sequence_name.into(),
            schema_name: None,
        }
    }

    /// Creates a "current value" marker for the named sequence.
    #[must_use]
    pub fn sequence_current_value(sequence_name: impl Into<String>) -> Self {
        Self {
            kind: FunctionKind::SequenceCurrentValue,
            value: sequence_name.into(),
            schema_name: None,
        }
    }

    /// Qualifies the sequence with a schema.
    #[must_use]
    pub fn with_schema(mut self, schema_name: impl Into<String>) -> Self {
        self.schema_name = Some(schema_name.into());
        self
    }

    /// The marker kind.
    #[must_use]
    pub const fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// The expression, or the sequence name for sequence markers.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Schema of the sequence, if any.
    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema_name.as_deref()
    }
}

/// A property argument that only accepts "next value" sequence markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceNextValue(DatabaseFunction);

impl SequenceNextValue {
    /// Creates a marker for the named sequence.
    #[must_use]
    pub fn new(sequence_name: impl Into<String>) -> Self {
        Self(DatabaseFunction::sequence_next_value(sequence_name))
    }

    pub(crate) const fn from_function(function: DatabaseFunction) -> Self {
        Self(function)
    }

    /// Unwraps the underlying marker.
    #[must_use]
    pub fn into_function(self) -> DatabaseFunction {
        self.0
    }

    /// Borrows the underlying marker.
    #[must_use]
    pub const fn function(&self) -> &DatabaseFunction {
        &self.0
    }
}
