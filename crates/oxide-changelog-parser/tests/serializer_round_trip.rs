//! Tests for writing statements back out: parse, materialize, serialize and
//! parse again must give the same statements and the same SQL.

mod common;
use common::*;

use chrono::NaiveDate;
use oxide_changelog_core::dialect::PostgresDialect;
use oxide_changelog_core::function::DatabaseFunction;
use oxide_changelog_core::node::ParsedNode;
use oxide_changelog_core::sqlgen::SqlGeneratorFactory;
use oxide_changelog_core::statement::{
    DeleteStatement, InsertSetStatement, InsertStatement, RawSqlStatement, Statement,
    UpdateStatement,
};
use oxide_changelog_core::{PropertyMaterializer, Value};
use oxide_changelog_parser::XmlChangeLogSerializer;

fn to_xml(statements: &[Statement]) -> String {
    let serializer = XmlChangeLogSerializer::new();
    let root = serializer
        .change_log(statements, &PropertyMaterializer::default())
        .unwrap();
    serializer.write_string(&root).unwrap()
}

fn sql(statement: &Statement) -> Vec<String> {
    SqlGeneratorFactory::new()
        .generate_sql(statement, &PostgresDialect::new())
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn insert_set_from(node: &ParsedNode, materializer: &PropertyMaterializer<'_>) -> InsertSetStatement {
    let mut set = InsertSetStatement::default();
    materializer.load_node(node, &mut set).unwrap();
    for row in node.children_named("insert") {
        set.add_insert_statement(insert_from(row, materializer));
    }
    set
}

#[test]
fn parsed_insert_survives_a_round_trip() {
    let materializer = PropertyMaterializer::default();
    let root = read_xml(PEOPLE_XML);
    let insert = insert_from(
        root.child("changeSet").unwrap().child("insert").unwrap(),
        &materializer,
    );

    let xml = to_xml(&[insert.clone().into()]);
    assert!(xml.contains("<insert schemaName=\"app\" tableName=\"person\">"));
    assert!(xml.contains("<column name=\"id\" valueNumeric=\"1\"/>"));
    assert!(xml.contains("<column name=\"active\" valueBoolean=\"true\"/>"));

    let reparsed = read_xml(&xml);
    let again = insert_from(reparsed.child("insert").unwrap(), &materializer);
    assert_eq!(again, insert);
    assert_eq!(
        sql(&again.into()),
        ["INSERT INTO app.person (id, name, active) VALUES (1, 'Alice', TRUE);"]
    );
}

#[test]
fn yaml_source_serializes_to_the_same_xml() {
    let materializer = PropertyMaterializer::default();
    let from_xml = read_xml(PEOPLE_XML);
    let from_yaml = read_yaml(PEOPLE_YAML);
    let pick = |root: &ParsedNode| {
        let node = root.child("changeSet").unwrap().child("insert").unwrap();
        Statement::from(insert_from(node, &materializer))
    };
    assert_eq!(to_xml(&[pick(&from_yaml)]), to_xml(&[pick(&from_xml)]));
}

#[test]
fn typed_column_values_round_trip() {
    let materializer = PropertyMaterializer::default();
    let created = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let insert = InsertStatement::new("event")
        .column("created", created)
        .column("note", "x < y & z")
        .column("id", DatabaseFunction::sequence_next_value("event_seq"))
        .column("stamp", DatabaseFunction::new("now()"));

    let xml = to_xml(&[insert.clone().into()]);
    assert!(xml.contains("valueDate=\"2024-01-02\""));
    assert!(xml.contains("valueSequenceNext=\"event_seq\""));
    assert!(xml.contains("valueComputed=\"now()\""));

    let reparsed = read_xml(&xml);
    let again = insert_from(reparsed.child("insert").unwrap(), &materializer);
    assert_eq!(again.column_value("created"), Some(&Value::Date(created)));
    assert_eq!(
        again.column_value("note"),
        Some(&Value::String(String::from("x < y & z")))
    );
    assert_eq!(again, insert);
}

#[test]
fn statements_keep_their_order_and_properties() {
    let materializer = PropertyMaterializer::default();
    let update = UpdateStatement::new("person")
        .set("name", "Carol")
        .where_clause("id = 3");
    let delete = DeleteStatement::new("person").where_clause("id > 4");
    let raw = RawSqlStatement::new("VACUUM").end_delimiter("");
    let statements: Vec<Statement> = vec![update.clone().into(), delete.clone().into(), raw.into()];

    let reparsed = read_xml(&to_xml(&statements));
    let names: Vec<&str> = reparsed.children().iter().map(ParsedNode::name).collect();
    assert_eq!(names, ["update", "delete", "sql"]);

    let mut update_again = UpdateStatement::default();
    materializer
        .load_node(reparsed.child("update").unwrap(), &mut update_again)
        .unwrap();
    for (name, value) in columns_from(reparsed.child("update").unwrap(), &materializer) {
        update_again.add_new_column_value(name, value);
    }
    assert_eq!(update_again, update);

    let mut delete_again = DeleteStatement::default();
    materializer
        .load_node(reparsed.child("delete").unwrap(), &mut delete_again)
        .unwrap();
    assert_eq!(delete_again, delete);

    let raw_node = reparsed.child("sql").unwrap();
    assert_eq!(raw_node.child_value("sql").unwrap().to_string(), "VACUUM");
    assert!(raw_node.child("endDelimiter").is_some());
}

#[test]
fn insert_set_rows_and_batch_size_round_trip() {
    let materializer = PropertyMaterializer::default();
    let set = (1..=3).fold(InsertSetStatement::new("person").batch_size(2), |set, id| {
        set.row(InsertStatement::new("person").column("id", id))
    });

    let reparsed = read_xml(&to_xml(&[set.clone().into()]));
    let node = reparsed.child("insertSet").unwrap();
    assert_eq!(node.child_value("batchSize").unwrap().to_string(), "2");
    assert_eq!(node.children_named("insert").count(), 3);

    let again = insert_set_from(node, &materializer);
    assert_eq!(again.rows_per_batch(), 2);
    assert_eq!(sql(&again.into()), sql(&set.into()));
}
