//! SQL generation.
//!
//! A [`SqlGenerator`] turns one statement type into SQL for a dialect.
//! Generators are ordered by priority; the highest-priority generator that
//! supports a statement runs first and may delegate to the rest through the
//! [`GeneratorChain`]. The [`SqlGeneratorFactory`] owns the registered
//! generators and is the usual entry point.
//!
//! ```rust
//! use oxide_changelog_core::dialect::PostgresDialect;
//! use oxide_changelog_core::sqlgen::SqlGeneratorFactory;
//! use oxide_changelog_core::statement::InsertStatement;
//!
//! let factory = SqlGeneratorFactory::new();
//! let insert = InsertStatement::new("person").column("id", 1).column("name", "Alice");
//! let sql = factory.generate_sql(&insert.into(), &PostgresDialect::new()).unwrap();
//! assert_eq!(sql[0].text(), "INSERT INTO person (id, name) VALUES (1, 'Alice')");
//! ```

mod delete;
mod factory;
mod insert;
mod insert_set;
mod literal;
mod raw;
mod sql;
mod update;
mod validation;

use std::sync::Arc;

pub use delete::DeleteGenerator;
pub use factory::{FactorySlot, GeneratorSet, SqlGeneratorFactory};
pub use insert::InsertGenerator;
pub use insert_set::InsertSetGenerator;
pub use literal::{append_value, value_literal};
pub use raw::RawSqlGenerator;
pub use sql::{AffectedObject, Sql, DEFAULT_END_DELIMITER};
pub use update::UpdateGenerator;
pub use validation::ValidationErrors;

use crate::dialect::Dialect;

/// Priority of the built-in, dialect-independent generators.
pub const PRIORITY_DEFAULT: i32 = 1;

/// Priority of generators written for one database.
pub const PRIORITY_DATABASE: i32 = 5;

/// Whether an insert row opens a new INSERT or continues a VALUES list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowPosition {
    /// Emit the `INSERT INTO ... VALUES ` header.
    #[default]
    First,
    /// Emit a leading comma instead of the header.
    Continuation,
}

/// Generates SQL for statements of type `S`.
pub trait SqlGenerator<S>: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Higher priorities run first.
    fn priority(&self) -> i32 {
        PRIORITY_DEFAULT
    }

    /// Returns whether this generator handles `statement` on `dialect`.
    fn supports(&self, _statement: &S, _dialect: &dyn Dialect) -> bool {
        true
    }

    /// Checks required fields. Violations are accumulated, not short-circuited.
    fn validate(
        &self,
        statement: &S,
        dialect: &dyn Dialect,
        chain: &GeneratorChain<'_, S>,
    ) -> ValidationErrors;

    /// Generates the SQL. Only meaningful for statements that validated.
    fn generate_sql(
        &self,
        statement: &S,
        dialect: &dyn Dialect,
        chain: &GeneratorChain<'_, S>,
    ) -> Vec<Sql>;
}

/// The generators after the current one, in priority order.
pub struct GeneratorChain<'a, S> {
    generators: &'a [Arc<dyn SqlGenerator<S>>],
}

impl<'a, S> GeneratorChain<'a, S> {
    /// Creates a chain over generators already sorted by priority.
    #[must_use]
    pub const fn new(generators: &'a [Arc<dyn SqlGenerator<S>>]) -> Self {
        Self { generators }
    }

    /// Returns true if no generator is left.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Validates with the next generator, or reports nothing if none is left.
    #[must_use]
    pub fn validate(&self, statement: &S, dialect: &dyn Dialect) -> ValidationErrors {
        match self.generators.split_first() {
            Some((next, rest)) => next.validate(statement, dialect, &GeneratorChain::new(rest)),
            None => ValidationErrors::new(),
        }
    }

    /// Generates with the next generator, or nothing if none is left.
    #[must_use]
    pub fn generate_sql(&self, statement: &S, dialect: &dyn Dialect) -> Vec<Sql> {
        match self.generators.split_first() {
            Some((next, rest)) => {
                next.generate_sql(statement, dialect, &GeneratorChain::new(rest))
            }
            None => Vec::new(),
        }
    }
}
