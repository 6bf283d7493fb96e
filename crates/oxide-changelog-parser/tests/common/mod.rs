#![allow(dead_code)]

use oxide_changelog_core::node::ParsedNode;
use oxide_changelog_core::statement::{ColumnConfig, InsertStatement};
use oxide_changelog_core::PropertyMaterializer;
use oxide_changelog_parser::{ChangeLogReader, XmlChangeLogReader, YamlChangeLogReader};

pub fn read_xml(document: &str) -> ParsedNode {
    XmlChangeLogReader
        .read_str(document)
        .unwrap_or_else(|e| panic!("Failed to read XML: {e}\n{document}"))
}

pub fn read_yaml(document: &str) -> ParsedNode {
    YamlChangeLogReader
        .read_str(document)
        .unwrap_or_else(|e| panic!("Failed to read YAML: {e}\n{document}"))
}

/// Column children of a node, directly or under a `columns` list.
pub fn column_nodes(node: &ParsedNode) -> Vec<&ParsedNode> {
    match node.child("columns") {
        Some(list) => list.children_named("column").collect(),
        None => node.children_named("column").collect(),
    }
}

/// Materializes `column` nodes into name and value pairs.
pub fn columns_from(
    node: &ParsedNode,
    materializer: &PropertyMaterializer<'_>,
) -> Vec<(String, oxide_changelog_core::Value)> {
    column_nodes(node)
        .into_iter()
        .map(|column_node| {
            let mut column = ColumnConfig::default();
            materializer.load_node(column_node, &mut column).unwrap();
            (column.name().unwrap().to_string(), column.value_object())
        })
        .collect()
}

/// Materializes an `insert` node and its `column` children.
pub fn insert_from(node: &ParsedNode, materializer: &PropertyMaterializer<'_>) -> InsertStatement {
    let mut insert = InsertStatement::default();
    materializer.load_node(node, &mut insert).unwrap();
    for (name, value) in columns_from(node, materializer) {
        insert.add_column_value(name, value);
    }
    insert
}

/// Node names and nesting, without values, for comparing tree shapes.
pub fn shape(node: &ParsedNode) -> String {
    if node.children().is_empty() {
        return node.name().to_string();
    }
    let children: Vec<String> = node.children().iter().map(shape).collect();
    format!("{}({})", node.name(), children.join(" "))
}

pub const PEOPLE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<databaseChangeLog xmlns="http://www.liquibase.org/xml/ns/dbchangelog">
    <changeSet id="1" author="ada">
        <insert schemaName="app" tableName="person">
            <column name="id" valueNumeric="1"/>
            <column name="name" value="Alice"/>
            <column name="active" valueBoolean="true"/>
        </insert>
    </changeSet>
</databaseChangeLog>
"#;

pub const PEOPLE_YAML: &str = "\
databaseChangeLog:
  - changeSet:
      id: '1'
      author: ada
      insert:
        schemaName: app
        tableName: person
        columns:
          - column:
              name: id
              valueNumeric: '1'
          - column:
              name: name
              value: Alice
          - column:
              name: active
              valueBoolean: 'true'
";
