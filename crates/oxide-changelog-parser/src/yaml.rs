//! YAML change-log reader.
//!
//! Mappings become named children, sequence items contribute their entries
//! (or an `item` child for scalars), and scalars keep their YAML type.

use std::io::BufRead;

use oxide_changelog_core::node::{NodeValue, ParsedNode, ROOT_NODE_NAME};
use serde_yaml::Value;
use tracing::debug;

use crate::builder::NodeTreeBuilder;
use crate::error::{ParseError, Result};
use crate::ChangeLogReader;

/// Name given to scalar sequence items.
pub const SEQUENCE_ITEM_NAME: &str = "item";

/// Reads YAML change logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlChangeLogReader;

impl YamlChangeLogReader {
    /// Creates the reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChangeLogReader for YamlChangeLogReader {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn read(&self, input: &mut dyn BufRead) -> Result<ParsedNode> {
        let document: Value = serde_yaml::from_reader(input)?;
        let mut builder = NodeTreeBuilder::new();
        match &document {
            Value::Null => {}
            Value::Mapping(entries) => {
                for (key, value) in entries {
                    entry(&mut builder, &key_name(key)?, value)?;
                }
            }
            other => {
                return Err(ParseError::RootMismatch {
                    expected: ROOT_NODE_NAME,
                    found: format!("<{}>", kind_name(other)),
                })
            }
        }
        let root = builder.finish()?;
        debug!(children = root.children().len(), "read yaml change log");
        Ok(root)
    }
}

fn entry(builder: &mut NodeTreeBuilder, name: &str, value: &Value) -> Result<()> {
    builder.start_element(name, std::iter::empty::<(String, NodeValue)>())?;
    content(builder, value)?;
    builder.end_element()
}

fn content(builder: &mut NodeTreeBuilder, value: &Value) -> Result<()> {
    match value {
        Value::Null => {}
        Value::Bool(b) => builder.scalar(*b)?,
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                builder.scalar(i)?;
            } else if let Some(f) = n.as_f64() {
                builder.scalar(f)?;
            }
        }
        Value::String(s) => builder.scalar(s.as_str())?,
        Value::Mapping(entries) => {
            for (key, value) in entries {
                entry(builder, &key_name(key)?, value)?;
            }
        }
        Value::Sequence(items) => {
            for item in items {
                match item {
                    Value::Mapping(entries) => {
                        for (key, value) in entries {
                            entry(builder, &key_name(key)?, value)?;
                        }
                    }
                    scalar => entry(builder, SEQUENCE_ITEM_NAME, scalar)?,
                }
            }
        }
        Value::Tagged(tagged) => content(builder, &tagged.value)?,
    }
    Ok(())
}

fn key_name(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ParseError::InvalidKey(kind_name(other))),
    }
}

const fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_entries_become_children() {
        let root = YamlChangeLogReader
            .read_str(
                "databaseChangeLog:\n\
                 - changeSet:\n\
                 \x20   id: 1\n\
                 \x20   author: ada\n\
                 \x20   runAlways: true\n\
                 \x20   labels: [a, b]\n",
            )
            .unwrap();
        let change_set = root.child("changeSet").unwrap();
        assert_eq!(change_set.child_value("id"), Some(&NodeValue::Integer(1)));
        assert_eq!(change_set.child_value("author"), Some(&NodeValue::from("ada")));
        assert_eq!(change_set.child_value("runAlways"), Some(&NodeValue::Bool(true)));
        let labels: Vec<_> = change_set
            .child("labels")
            .unwrap()
            .children_named(SEQUENCE_ITEM_NAME)
            .filter_map(ParsedNode::value)
            .collect();
        assert_eq!(labels, [&NodeValue::from("a"), &NodeValue::from("b")]);
    }

    #[test]
    fn test_root_key_is_enforced() {
        let err = YamlChangeLogReader.read_str("changeLog: []\n").unwrap_err();
        assert!(matches!(err, ParseError::RootMismatch { ref found, .. } if found == "changeLog"));

        let err = YamlChangeLogReader.read_str("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ParseError::RootMismatch { ref found, .. } if found == "<sequence>"));

        assert!(matches!(
            YamlChangeLogReader.read_str(""),
            Err(ParseError::EmptyDocument)
        ));
    }

    #[test]
    fn test_null_entries_have_no_value() {
        let root = YamlChangeLogReader
            .read_str("databaseChangeLog:\n  preconditions: ~\n")
            .unwrap();
        let preconditions = root.child("preconditions").unwrap();
        assert!(preconditions.value().is_none());
        assert!(!preconditions.is_attribute_like());
    }
}
