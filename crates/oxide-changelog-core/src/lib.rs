//! # oxide-changelog-core
//!
//! Typed change materialization and dialect-aware SQL generation for
//! database change logs.
//!
//! This crate provides:
//! - A format-neutral node tree that change-log readers produce
//! - A cached, declared property accessor model and a materializer that
//!   assigns raw node values onto typed statements with coercion
//! - Database-independent statements and a prioritized SQL generator chain
//!   with per-database dialects
//!
//! ## Materializing a Node
//!
//! ```rust
//! use oxide_changelog_core::materialize::PropertyMaterializer;
//! use oxide_changelog_core::node::ParsedNode;
//! use oxide_changelog_core::statement::InsertStatement;
//!
//! let mut node = ParsedNode::new("insert");
//! node.add_child(ParsedNode::with_value("schemaName", "app"));
//! node.add_child(ParsedNode::with_value("tableName", "person"));
//!
//! let mut insert = InsertStatement::default();
//! PropertyMaterializer::default().load_node(&node, &mut insert).unwrap();
//! assert_eq!(insert.table().to_string(), "app.person");
//! ```
//!
//! ## Generating SQL
//!
//! ```rust
//! use oxide_changelog_core::dialect::dialect_by_name;
//! use oxide_changelog_core::sqlgen::SqlGeneratorFactory;
//! use oxide_changelog_core::statement::{InsertStatement, Statement};
//!
//! let dialect = dialect_by_name("mysql").unwrap();
//! let statement: Statement = InsertStatement::new("flag").column("enabled", true).into();
//! let sql = SqlGeneratorFactory::new().generate_sql(&statement, dialect.as_ref()).unwrap();
//! assert_eq!(sql[0].to_string(), "INSERT INTO flag (enabled) VALUES (1);");
//! ```

pub mod accessor;
pub mod clauses;
pub mod config;
pub mod dialect;
pub mod error;
pub mod function;
pub mod iso;
pub mod materialize;
pub mod node;
pub mod sqlgen;
pub mod statement;
pub mod value;

pub use accessor::{AccessorCache, AccessorMap, Materializable, PropertyTable, PropertyTarget};
pub use config::ChangelogConfig;
pub use dialect::{dialect_by_name, Dialect, DialectKind, ObjectQuotingStrategy};
pub use error::{ConfigError, ConversionError, GenerateError, MaterializeError, Result};
pub use materialize::{convert, MaterializeContext, PropertyMaterializer};
pub use node::{NodeValue, ParsedNode, ROOT_NODE_NAME};
pub use sqlgen::{GeneratorChain, RowPosition, Sql, SqlGenerator, SqlGeneratorFactory};
pub use statement::Statement;
pub use value::{Value, ValueKind};
