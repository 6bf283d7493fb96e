//! Tests for INSERT generation: row continuation, validation, value
//! literals per dialect, sequence markers and quoting.

mod common;
use common::*;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use oxide_changelog_core::dialect::{
    Dialect, GenericDialect, HsqlDialect, ObjectQuotingStrategy, OracleDialect, PostgresDialect,
    SqliteDialect,
};
use oxide_changelog_core::function::DatabaseFunction;
use oxide_changelog_core::sqlgen::{
    AffectedObject, GeneratorChain, InsertGenerator, SqlGenerator, ValidationErrors,
};
use oxide_changelog_core::statement::{InsertStatement, TableRef};
use oxide_changelog_core::{RowPosition, Value};

fn validate(statement: &InsertStatement, dialect: &dyn Dialect) -> ValidationErrors {
    InsertGenerator::new().validate(statement, dialect, &GeneratorChain::new(&[]))
}

#[test]
fn rows_concatenate_into_one_insert() {
    let dialect = GenericDialect::new();
    let generator = InsertGenerator::new();
    let alice = InsertStatement::new("t").column("id", 1).column("name", "Alice");
    let bob = InsertStatement::new("t").column("id", 2).column("name", "Bob");

    let first = generator.generate_row(&alice, &dialect, RowPosition::First);
    let second = generator.generate_row(&bob, &dialect, RowPosition::Continuation);
    assert_eq!(first.text(), "INSERT INTO t (id, name) VALUES (1, 'Alice')");
    assert_eq!(second.text(), ",(2, 'Bob')");
    assert_eq!(
        format!("{}{}", first.text(), second.text()),
        "INSERT INTO t (id, name) VALUES (1, 'Alice'),(2, 'Bob')"
    );
}

#[test]
fn missing_table_and_columns_yield_two_violations() {
    let errors = validate(&InsertStatement::default(), &GenericDialect::new());
    assert_eq!(errors.errors().len(), 2);
    assert_eq!(errors.errors()[0], "tableName is required");
    assert_eq!(errors.errors()[1], "No columns defined");
}

#[test]
fn blank_table_name_is_missing() {
    let statement = InsertStatement::new("  ").column("id", 1);
    let errors = validate(&statement, &GenericDialect::new());
    assert_eq!(errors.errors(), ["tableName is required"]);
}

#[test]
fn null_values() {
    let statement = InsertStatement::new("t")
        .column("a", Value::Null)
        .column("b", "null")
        .column("c", Option::<String>::None);
    assert_eq!(
        generate(statement, &GenericDialect::new()),
        ["INSERT INTO t (a, b, c) VALUES (NULL, NULL, NULL)"]
    );
}

#[test]
fn literal_forms_by_dialect() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 6).unwrap();
    let statement = InsertStatement::new("event")
        .column("day", date)
        .column("ok", true)
        .column("amount", Decimal::new(1999, 2));

    assert_eq!(
        generate(statement.clone(), &PostgresDialect::new()),
        ["INSERT INTO event (day, ok, amount) VALUES ('2024-05-06', TRUE, 19.99)"]
    );
    assert_eq!(
        generate(statement.clone(), &SqliteDialect::new()),
        ["INSERT INTO event (day, ok, amount) VALUES ('2024-05-06', 1, 19.99)"]
    );
    assert_eq!(
        generate(statement, &OracleDialect::new()),
        ["INSERT INTO event (day, ok, amount) VALUES (TO_DATE('2024-05-06', 'YYYY-MM-DD'), 1, 19.99)"]
    );
}

#[test]
fn function_like_strings_are_not_quoted() {
    let statement = InsertStatement::new("t")
        .column("created", "NOW()")
        .column("note", "it's");
    assert_eq!(
        generate(statement, &PostgresDialect::new()),
        ["INSERT INTO t (created, note) VALUES (NOW(), 'it''s')"]
    );
}

#[test]
fn sequence_next_value_per_dialect() {
    let statement =
        InsertStatement::new("t").column("id", DatabaseFunction::sequence_next_value("seq_t"));

    assert_eq!(
        generate(statement.clone(), &HsqlDialect::new()),
        ["INSERT INTO t (id) VALUES (NEXT VALUE FOR seq_t)"]
    );
    assert_eq!(
        generate(statement.clone(), &PostgresDialect::new()),
        ["INSERT INTO t (id) VALUES (nextval('seq_t'))"]
    );
    assert_eq!(
        generate(statement, &GenericDialect::new()),
        ["INSERT INTO t (id) VALUES (seq_t)"]
    );
}

#[test]
fn quoting_strategies_apply_to_table_and_columns() {
    let statement = InsertStatement::qualified(None, Some("app"), "order").column("userId", 1);
    assert_eq!(
        generate(statement.clone(), &PostgresDialect::new()),
        [r#"INSERT INTO app."order" ("userId") VALUES (1)"#]
    );
    let all = PostgresDialect::new().with_quoting(ObjectQuotingStrategy::QuoteAllObjects);
    assert_eq!(
        generate(statement, &all),
        [r#"INSERT INTO "app"."order" ("userId") VALUES (1)"#]
    );
}

#[test]
fn affected_table_and_delimiter() {
    let statement = InsertStatement::qualified(Some("main"), Some("app"), "t").column("id", 1);
    let sql = InsertGenerator::new().generate_row(&statement, &GenericDialect::new(), RowPosition::First);
    assert_eq!(sql.end_delimiter(), ";");
    assert_eq!(
        sql.affected(),
        [AffectedObject::Table(TableRef {
            catalog: Some(String::from("main")),
            schema: Some(String::from("app")),
            name: String::from("t"),
        })]
    );
}
