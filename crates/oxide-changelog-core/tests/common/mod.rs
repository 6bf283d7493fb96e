#![allow(dead_code)]

use oxide_changelog_core::dialect::Dialect;
use oxide_changelog_core::node::ParsedNode;
use oxide_changelog_core::sqlgen::SqlGeneratorFactory;
use oxide_changelog_core::statement::Statement;

/// Builds a node whose children are attribute-like `(name, value)` pairs.
pub fn node(name: &str, attributes: &[(&str, &str)]) -> ParsedNode {
    let mut node = ParsedNode::new(name);
    for (key, value) in attributes {
        node.add_child(ParsedNode::with_value(*key, *value));
    }
    node
}

/// Generates SQL with the default factory and returns the texts.
pub fn generate(statement: impl Into<Statement>, dialect: &dyn Dialect) -> Vec<String> {
    let statement = statement.into();
    SqlGeneratorFactory::new()
        .generate_sql(&statement, dialect)
        .unwrap_or_else(|e| panic!("Failed to generate {}: {e}", statement.kind_name()))
        .iter()
        .map(|sql| sql.text().to_string())
        .collect()
}
