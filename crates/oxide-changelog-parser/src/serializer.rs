//! Writing statements back out as XML change logs.
//!
//! Statements are first turned into the same node tree the readers produce,
//! then written element by element. Attribute-like children become XML
//! attributes, a node's own value becomes its text content.

use std::io::Write;

use oxide_changelog_core::node::{ParsedNode, ROOT_NODE_NAME};
use oxide_changelog_core::statement::{ColumnConfig, ColumnValues, InsertStatement, Statement};
use oxide_changelog_core::{Materializable, PropertyMaterializer};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::debug;

use crate::error::SerializeError;

/// Spaces per nesting level in written documents.
pub const INDENT: usize = 4;

type Result<T> = std::result::Result<T, SerializeError>;

/// Serializes statements into XML change logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlChangeLogSerializer;

impl XmlChangeLogSerializer {
    /// Creates the serializer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the node of one statement.
    ///
    /// Column values become `column` children, insert-set rows become
    /// `insert` children.
    ///
    /// # Errors
    ///
    /// [`SerializeError::Property`] if a property cannot be read.
    pub fn create_node(
        &self,
        statement: &Statement,
        materializer: &PropertyMaterializer<'_>,
    ) -> Result<ParsedNode> {
        let kind = statement.kind_name();
        match statement {
            Statement::Insert(insert) => insert_node(insert, materializer),
            Statement::InsertSet(set) => {
                let mut node = properties(kind, set, materializer)?;
                for row in set.rows() {
                    node.add_child(insert_node(row, materializer)?);
                }
                Ok(node)
            }
            Statement::Update(update) => {
                let mut node = properties(kind, update, materializer)?;
                add_columns(&mut node, kind, update.new_values(), materializer)?;
                Ok(node)
            }
            Statement::Delete(delete) => properties(kind, delete, materializer),
            Statement::RawSql(raw) => properties(kind, raw, materializer),
        }
    }

    /// Builds a whole change log holding `statements` in order.
    ///
    /// # Errors
    ///
    /// Same as [`XmlChangeLogSerializer::create_node`].
    pub fn change_log(
        &self,
        statements: &[Statement],
        materializer: &PropertyMaterializer<'_>,
    ) -> Result<ParsedNode> {
        let mut root = ParsedNode::new(ROOT_NODE_NAME);
        for statement in statements {
            root.add_child(self.create_node(statement, materializer)?);
        }
        Ok(root)
    }

    /// Writes `root` as an indented XML document.
    ///
    /// # Errors
    ///
    /// [`SerializeError::Io`] or [`SerializeError::Xml`] if writing fails.
    pub fn write(&self, root: &ParsedNode, output: impl Write) -> Result<()> {
        let mut writer = Writer::new_with_indent(output, b' ', INDENT);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_node(&mut writer, root)?;
        debug!(root = root.name(), depth = root.depth(), "wrote change log");
        Ok(())
    }

    /// Writes `root` into a string.
    ///
    /// # Errors
    ///
    /// Same as [`XmlChangeLogSerializer::write`].
    pub fn write_string(&self, root: &ParsedNode) -> Result<String> {
        let mut buffer = Vec::new();
        self.write(root, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

fn properties<T>(
    kind: &'static str,
    target: &T,
    materializer: &PropertyMaterializer<'_>,
) -> Result<ParsedNode>
where
    T: Materializable + ?Sized,
{
    materializer
        .create_node(kind, target)
        .map_err(|source| SerializeError::Property {
            statement: kind,
            source,
        })
}

fn insert_node(insert: &InsertStatement, materializer: &PropertyMaterializer<'_>) -> Result<ParsedNode> {
    const KIND: &str = "insert";
    let mut node = properties(KIND, insert, materializer)?;
    add_columns(&mut node, KIND, insert.columns(), materializer)?;
    Ok(node)
}

fn add_columns(
    node: &mut ParsedNode,
    kind: &'static str,
    columns: &ColumnValues,
    materializer: &PropertyMaterializer<'_>,
) -> Result<()> {
    for (name, value) in columns.iter() {
        let column = ColumnConfig::from_value(name, value);
        let child = materializer
            .create_node("column", &column)
            .map_err(|source| SerializeError::Property {
                statement: kind,
                source,
            })?;
        node.add_child(child);
    }
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &ParsedNode) -> Result<()> {
    let mut start = BytesStart::new(node.name());
    let mut elements = Vec::new();
    for child in node.children() {
        match child.value() {
            Some(value) if child.is_attribute_like() => {
                start.push_attribute((child.name(), value.to_string().as_str()));
            }
            _ => elements.push(child),
        }
    }

    let text = node.value().map(ToString::to_string);
    if elements.is_empty() && text.is_none() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for element in elements {
        write_node(writer, element)?;
    }
    writer.write_event(Event::End(BytesEnd::new(node.name())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxide_changelog_core::statement::RawSqlStatement;

    #[test]
    fn test_attributes_and_elements() {
        let mut column = ParsedNode::new("column");
        column.add_child(ParsedNode::with_value("name", "note"));
        column.add_child(ParsedNode::with_value("value", "a < b & \"c\""));
        let mut insert = ParsedNode::new("insert");
        insert.add_child(ParsedNode::with_value("tableName", "person"));
        insert.add_child(column);
        let mut root = ParsedNode::new(ROOT_NODE_NAME);
        root.add_child(insert);

        let xml = XmlChangeLogSerializer::new().write_string(&root).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<insert tableName=\"person\">"));
        assert!(xml.contains("<column name=\"note\" value=\"a &lt; b &amp; &quot;c&quot;\"/>"));
        assert!(xml.trim_end().ends_with("</databaseChangeLog>"));
    }

    #[test]
    fn test_raw_sql_node() {
        let statement: Statement = RawSqlStatement::new("VACUUM").into();
        let node = XmlChangeLogSerializer::new()
            .create_node(&statement, &PropertyMaterializer::default())
            .unwrap();
        assert_eq!(node.name(), "sql");
        assert_eq!(node.child_value("sql").unwrap().to_string(), "VACUUM");
        assert_eq!(node.child_value("endDelimiter").unwrap().to_string(), ";");
    }

    #[test]
    fn test_empty_root_is_self_closing() {
        let xml = XmlChangeLogSerializer::new()
            .write_string(&ParsedNode::new(ROOT_NODE_NAME))
            .unwrap();
        assert!(xml.ends_with("<databaseChangeLog/>"));
    }
}
