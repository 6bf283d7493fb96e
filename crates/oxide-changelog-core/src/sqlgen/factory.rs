//! Generator registry and statement dispatch.

use std::cmp::Reverse;
use std::sync::Arc;

use tracing::debug;

use super::{
    DeleteGenerator, GeneratorChain, InsertGenerator, InsertSetGenerator, RawSqlGenerator, Sql,
    SqlGenerator, UpdateGenerator, ValidationErrors,
};
use crate::dialect::Dialect;
use crate::error::GenerateError;
use crate::statement::{
    DeleteStatement, InsertSetStatement, InsertStatement, RawSqlStatement, Statement,
    UpdateStatement,
};

/// Generators for one statement type, highest priority first.
pub struct GeneratorSet<S> {
    generators: Vec<Arc<dyn SqlGenerator<S>>>,
}

impl<S> Default for GeneratorSet<S> {
    fn default() -> Self {
        Self {
            generators: Vec::new(),
        }
    }
}

impl<S> GeneratorSet<S> {
    /// Adds a generator. Equal priorities keep registration order.
    pub fn register(&mut self, generator: Arc<dyn SqlGenerator<S>>) {
        self.generators.push(generator);
        self.generators.sort_by_key(|g| Reverse(g.priority()));
    }

    /// Number of registered generators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generators supporting `statement` on `dialect`, in priority order.
    fn supporting(&self, statement: &S, dialect: &dyn Dialect) -> Vec<Arc<dyn SqlGenerator<S>>> {
        self.generators
            .iter()
            .filter(|g| g.supports(statement, dialect))
            .cloned()
            .collect()
    }
}

/// A statement type with its own generator set in the factory.
pub trait FactorySlot: Sized + 'static {
    /// Statement kind name, as in [`Statement::kind_name`].
    const KIND: &'static str;

    /// The generator set for this statement type.
    fn slot(factory: &SqlGeneratorFactory) -> &GeneratorSet<Self>;

    /// Mutable access to the generator set for this statement type.
    fn slot_mut(factory: &mut SqlGeneratorFactory) -> &mut GeneratorSet<Self>;
}

macro_rules! factory_slot {
    ($statement:ty, $kind:literal, $field:ident) => {
        impl FactorySlot for $statement {
            const KIND: &'static str = $kind;

            fn slot(factory: &SqlGeneratorFactory) -> &GeneratorSet<Self> {
                &factory.$field
            }

            fn slot_mut(factory: &mut SqlGeneratorFactory) -> &mut GeneratorSet<Self> {
                &mut factory.$field
            }
        }
    };
}

factory_slot!(InsertStatement, "insert", insert);
factory_slot!(InsertSetStatement, "insertSet", insert_set);
factory_slot!(UpdateStatement, "update", update);
factory_slot!(DeleteStatement, "delete", delete);
factory_slot!(RawSqlStatement, "sql", raw);

/// Dispatches statements to the highest-priority supporting generator.
#[derive(Default)]
pub struct SqlGeneratorFactory {
    insert: GeneratorSet<InsertStatement>,
    insert_set: GeneratorSet<InsertSetStatement>,
    update: GeneratorSet<UpdateStatement>,
    delete: GeneratorSet<DeleteStatement>,
    raw: GeneratorSet<RawSqlStatement>,
}

impl std::fmt::Debug for SqlGeneratorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlGeneratorFactory")
            .field("insert", &self.insert.len())
            .field("insert_set", &self.insert_set.len())
            .field("update", &self.update.len())
            .field("delete", &self.delete.len())
            .field("raw", &self.raw.len())
            .finish()
    }
}

impl SqlGeneratorFactory {
    /// Creates a factory with the built-in generators registered.
    #[must_use]
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register::<InsertStatement>(Arc::new(InsertGenerator::new()));
        factory.register::<InsertSetStatement>(Arc::new(InsertSetGenerator::new()));
        factory.register::<UpdateStatement>(Arc::new(UpdateGenerator));
        factory.register::<DeleteStatement>(Arc::new(DeleteGenerator));
        factory.register::<RawSqlStatement>(Arc::new(RawSqlGenerator));
        factory
    }

    /// Creates a factory with no generators.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registers a generator for statements of type `S`.
    pub fn register<S: FactorySlot>(&mut self, generator: Arc<dyn SqlGenerator<S>>) {
        debug!(
            statement = S::KIND,
            generator = generator.name(),
            priority = generator.priority(),
            "registering sql generator"
        );
        S::slot_mut(self).register(generator);
    }

    /// Validates a statement without generating SQL.
    #[must_use]
    pub fn validate(&self, statement: &Statement, dialect: &dyn Dialect) -> ValidationErrors {
        match statement {
            Statement::Insert(s) => self.validate_statement(s, dialect),
            Statement::InsertSet(s) => self.validate_statement(s, dialect),
            Statement::Update(s) => self.validate_statement(s, dialect),
            Statement::Delete(s) => self.validate_statement(s, dialect),
            Statement::RawSql(s) => self.validate_statement(s, dialect),
        }
    }

    /// Validates, then generates SQL for a statement.
    ///
    /// # Errors
    ///
    /// [`GenerateError::NoGenerator`] if no generator supports the statement,
    /// [`GenerateError::Validation`] if it has violations.
    pub fn generate_sql(
        &self,
        statement: &Statement,
        dialect: &dyn Dialect,
    ) -> Result<Vec<Sql>, GenerateError> {
        match statement {
            Statement::Insert(s) => self.generate_statement(s, dialect),
            Statement::InsertSet(s) => self.generate_statement(s, dialect),
            Statement::Update(s) => self.generate_statement(s, dialect),
            Statement::Delete(s) => self.generate_statement(s, dialect),
            Statement::RawSql(s) => self.generate_statement(s, dialect),
        }
    }

    /// Validates one typed statement.
    #[must_use]
    pub fn validate_statement<S: FactorySlot>(
        &self,
        statement: &S,
        dialect: &dyn Dialect,
    ) -> ValidationErrors {
        let generators = S::slot(self).supporting(statement, dialect);
        if generators.is_empty() {
            let mut errors = ValidationErrors::new();
            errors.add_error(format!(
                "No SQL generator supports {} on {}",
                S::KIND,
                dialect.name()
            ));
            return errors;
        }
        GeneratorChain::new(&generators).validate(statement, dialect)
    }

    /// Validates, then generates SQL for one typed statement.
    ///
    /// # Errors
    ///
    /// Same as [`SqlGeneratorFactory::generate_sql`].
    pub fn generate_statement<S: FactorySlot>(
        &self,
        statement: &S,
        dialect: &dyn Dialect,
    ) -> Result<Vec<Sql>, GenerateError> {
        let generators = S::slot(self).supporting(statement, dialect);
        if generators.is_empty() {
            return Err(GenerateError::NoGenerator {
                statement: S::KIND,
                dialect: dialect.name(),
            });
        }

        let chain = GeneratorChain::new(&generators);
        let errors = chain.validate(statement, dialect);
        if errors.has_errors() {
            debug!(statement = S::KIND, %errors, "statement failed validation");
            return Err(GenerateError::Validation(errors));
        }

        let sql = chain.generate_sql(statement, dialect);
        debug!(
            statement = S::KIND,
            dialect = dialect.name(),
            fragments = sql.len(),
            "generated sql"
        );
        Ok(sql)
    }
}
