//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! dialect = "postgres"
//! quoting = "QUOTE_ALL_OBJECTS"
//! ignore_missing_references = true
//! insert_batch_size = 100
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::dialect::{Dialect, DialectKind, ObjectQuotingStrategy};
use crate::error::{ConfigError, ConversionError};
use crate::materialize::{convert, MaterializeContext};
use crate::statement::{InsertSetStatement, DEFAULT_BATCH_SIZE};
use crate::value::{FromValue, Value, ValueType};

/// Settings shared by readers, the materializer and the generators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Target database name or alias.
    pub dialect: String,
    /// Object quoting strategy constant.
    pub quoting: String,
    /// Skip unresolved references instead of failing.
    pub ignore_missing_references: bool,
    /// Argument name reported in conversion errors.
    pub argument_key: Option<String>,
    /// Rows per generated multi-row INSERT.
    pub insert_batch_size: usize,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            dialect: String::from("generic"),
            quoting: String::from(ObjectQuotingStrategy::Legacy.constant_name()),
            ignore_missing_references: false,
            argument_key: None,
            insert_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl ChangelogConfig {
    /// Parses configuration from a TOML string. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Toml`] on malformed input, [`ConfigError::InvalidBatchSize`]
    /// for a zero batch size.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        if config.insert_batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(config.insert_batch_size));
        }
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`ChangelogConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading changelog configuration");
        Self::from_toml_str(&contents)
    }

    /// The materialization context these settings describe.
    #[must_use]
    pub fn context(&self) -> MaterializeContext {
        let context = MaterializeContext::new().ignore_missing_references(self.ignore_missing_references);
        match &self.argument_key {
            Some(key) => context.argument_key(key.as_str()),
            None => context,
        }
    }

    /// An empty insert set for `table_name` batched by `insert_batch_size`.
    ///
    /// A `batchSize` materialized onto the set later still takes precedence.
    #[must_use]
    pub fn insert_set(&self, table_name: impl Into<String>) -> InsertSetStatement {
        InsertSetStatement::new(table_name).batch_size(self.insert_batch_size)
    }

    /// The configured quoting strategy.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Conversion`] if `quoting` names no strategy.
    pub fn quoting_strategy(&self) -> Result<ObjectQuotingStrategy, ConfigError> {
        let kind = ObjectQuotingStrategy::value_kind();
        let value = convert(
            Value::String(self.quoting.clone()),
            kind,
            Some("quoting"),
            &self.context(),
        )?;
        ObjectQuotingStrategy::from_value(value).map_err(|value| {
            ConfigError::Conversion(ConversionError::UnknownConversion {
                value: value.to_string(),
                source_type: value.type_name(),
                target: kind,
            })
        })
    }

    /// Builds the configured dialect.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownDialect`] for an unknown name, or an invalid
    /// quoting strategy.
    pub fn dialect(&self) -> Result<Box<dyn Dialect>, ConfigError> {
        let kind = DialectKind::from_name(&self.dialect)
            .ok_or_else(|| ConfigError::UnknownDialect(self.dialect.clone()))?;
        Ok(kind.build(self.quoting_strategy()?))
    }
}
