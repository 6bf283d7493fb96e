//! Error types for materialization, conversion, SQL generation and configuration.

use std::path::PathBuf;

use crate::accessor::AccessFailure;
use crate::sqlgen::ValidationErrors;
use crate::value::ValueKind;

/// Errors raised while converting a value to a declared kind.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The text does not name a constant of the target enum.
    #[error("{}", enum_message(.value, .context.as_deref(), .allowed))]
    InvalidEnum {
        /// The rejected input.
        value: String,
        /// Name of the argument being converted, if known.
        context: Option<String>,
        /// Valid constant names in lexical order.
        allowed: Vec<&'static str>,
    },

    /// A number does not fit the target width.
    #[error("Could not convert '{value}' of type {source_type} to target type {target}: overflow")]
    Overflow {
        /// The rejected input.
        value: String,
        /// Runtime type of the input.
        source_type: &'static str,
        /// The requested width.
        target: ValueKind,
    },

    /// The text is neither a truthy nor a falsy token.
    #[error("{}", boolean_message(.value, .key.as_deref()))]
    InvalidBoolean {
        /// The rejected input.
        value: String,
        /// Current argument key, if one is set.
        key: Option<String>,
    },

    /// The text is not a number of the target kind.
    #[error("Could not parse '{value}' as {target}: {source}")]
    InvalidNumber {
        /// The rejected input.
        value: String,
        /// The requested kind.
        target: ValueKind,
        /// The underlying parse failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The text is not an ISO date, time or date-time.
    #[error("Could not parse '{value}' as {target}: {source}")]
    InvalidDate {
        /// The rejected input.
        value: String,
        /// The requested kind.
        target: ValueKind,
        /// The underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// The text is not a canonical UUID.
    #[error("Could not parse '{value}' as a UUID: {source}")]
    InvalidUuid {
        /// The rejected input.
        value: String,
        /// The underlying parse failure.
        #[source]
        source: uuid::Error,
    },

    /// The text is not a logging level.
    #[error("Unknown logging level '{0}'")]
    InvalidLevel(String),

    /// No type with this name is registered.
    #[error("Type '{0}' is not registered")]
    UnknownType(String),

    /// The input cannot be converted to the requested kind at all.
    #[error("Could not convert '{value}' of type {source_type} to unknown target type {target}")]
    UnknownConversion {
        /// The rejected input.
        value: String,
        /// Runtime type of the input.
        source_type: &'static str,
        /// The requested kind.
        target: ValueKind,
    },
}

fn enum_message(value: &str, context: Option<&str>, allowed: &[&'static str]) -> String {
    let prefix = match context {
        Some(name) if !name.is_empty() => {
            format!("The {} value '{value}' is not valid.", name.to_lowercase())
        }
        _ => format!("Invalid value '{value}'."),
    };
    format!("{prefix} Acceptable values are '{}'", allowed.join("', '"))
}

fn boolean_message(value: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!(
            "The input for '{key}' is '{value}', which is not valid. Options: 'true' or 'false'."
        ),
        None => format!("The input '{value}' is not valid. Options: 'true' or 'false'."),
    }
}

/// Errors raised while reading or writing properties of a target object.
#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
    /// The target type has no accessor with this name.
    #[error("Property [{property}] was not found for object type [{type_name}]")]
    NotFound {
        /// The requested property.
        property: String,
        /// Full name of the target type.
        type_name: &'static str,
    },

    /// The raw value could not be coerced to the property kind.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The accessor itself failed.
    #[error("{}", internal_message(.accessor, .value_type))]
    Internal {
        /// Name of the failing accessor.
        accessor: String,
        /// Runtime type of the argument, `None` for reads.
        value_type: Option<&'static str>,
        /// Why the accessor failed.
        #[source]
        cause: AccessFailure,
    },
}

fn internal_message(accessor: &str, value_type: &Option<&'static str>) -> String {
    match value_type.as_deref() {
        Some("null") => format!("Cannot call {accessor} with a null argument"),
        Some(value_type) => format!("Cannot call {accessor} with value of type {value_type}"),
        None => format!("Cannot call {accessor}"),
    }
}

/// Result type for materialization.
pub type Result<T> = std::result::Result<T, MaterializeError>;

/// Errors raised by the SQL generator factory.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The statement failed validation; no SQL was produced.
    #[error("Statement failed validation: {0}")]
    Validation(ValidationErrors),

    /// No registered generator supports this statement on this dialect.
    #[error("No SQL generator supports {statement} on {dialect}")]
    NoGenerator {
        /// Statement kind.
        statement: &'static str,
        /// Dialect name.
        dialect: &'static str,
    },
}

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading the configuration file.
    #[error("IO error reading '{}': {source}", path.display())]
    Io {
        /// The configuration file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this configuration.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The dialect name is not known.
    #[error("Unknown dialect '{0}'")]
    UnknownDialect(String),

    /// A configuration value failed conversion.
    #[error("Invalid configuration value: {0}")]
    Conversion(#[from] ConversionError),

    /// Batch sizes must be positive.
    #[error("Insert batch size must be positive, got {0}")]
    InvalidBatchSize(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_message_variants() {
        let plain = ConversionError::InvalidEnum {
            value: String::from("purple"),
            context: None,
            allowed: vec!["BLUE", "RED"],
        };
        assert_eq!(
            plain.to_string(),
            "Invalid value 'purple'. Acceptable values are 'BLUE', 'RED'"
        );

        let named = ConversionError::InvalidEnum {
            value: String::from("purple"),
            context: Some(String::from("Color")),
            allowed: vec!["BLUE", "RED"],
        };
        assert_eq!(
            named.to_string(),
            "The color value 'purple' is not valid. Acceptable values are 'BLUE', 'RED'"
        );
    }

    #[test]
    fn test_boolean_message_names_key() {
        let err = ConversionError::InvalidBoolean {
            value: String::from("maybe"),
            key: Some(String::from("dropFirst")),
        };
        let message = err.to_string();
        assert!(message.contains("'dropFirst'"));
        assert!(message.contains("'true' or 'false'"));
    }

    #[test]
    fn test_not_found_message() {
        let err = MaterializeError::NotFound {
            property: String::from("tableName"),
            type_name: "ColumnConfig",
        };
        assert_eq!(
            err.to_string(),
            "Property [tableName] was not found for object type [ColumnConfig]"
        );
    }
}
