//! End-to-end tests: change-log files on disk are read, materialized into
//! statements and rendered as SQL.

mod common;
use common::*;

use std::io::Write;

use oxide_changelog_core::dialect::PostgresDialect;
use oxide_changelog_core::sqlgen::SqlGeneratorFactory;
use oxide_changelog_core::statement::Statement;
use oxide_changelog_core::{ChangelogConfig, PropertyMaterializer};
use oxide_changelog_parser::{parse_file, reader_for, ParseError};
use tempfile::{Builder, NamedTempFile};

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

fn people_sql(path: &std::path::Path) -> Vec<String> {
    let root = parse_file(path).unwrap();
    let insert_node = root.child("changeSet").unwrap().child("insert").unwrap();
    let insert = insert_from(insert_node, &PropertyMaterializer::default());

    let statement: Statement = insert.into();
    SqlGeneratorFactory::new()
        .generate_sql(&statement, &PostgresDialect::new())
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[test]
fn xml_file_to_postgres_sql() {
    let file = write_temp(".xml", PEOPLE_XML);
    assert_eq!(
        people_sql(file.path()),
        ["INSERT INTO app.person (id, name, active) VALUES (1, 'Alice', TRUE);"]
    );
}

#[test]
fn yaml_file_gives_the_same_sql() {
    let xml = write_temp(".xml", PEOPLE_XML);
    let yaml = write_temp(".yml", PEOPLE_YAML);
    assert_eq!(people_sql(yaml.path()), people_sql(xml.path()));
}

#[test]
fn configuration_file_sets_up_the_pipeline() {
    let config = write_temp(
        ".toml",
        "dialect = \"hsqldb\"\nargument_key = \"changelog\"\n",
    );
    let config = ChangelogConfig::load(config.path()).unwrap();
    let dialect = config.dialect().unwrap();
    let context = config.context();
    let cache = oxide_changelog_core::AccessorCache::new();
    let materializer = PropertyMaterializer::new(&cache, context);

    let changelog = write_temp(
        ".xml",
        r#"<databaseChangeLog>
            <insert tableName="person">
                <column name="id" valueSequenceNext="person_seq"/>
            </insert>
        </databaseChangeLog>"#,
    );
    let root = parse_file(changelog.path()).unwrap();
    let insert = insert_from(root.child("insert").unwrap(), &materializer);
    let sql = SqlGeneratorFactory::new()
        .generate_sql(&insert.into(), dialect.as_ref())
        .unwrap();
    assert_eq!(sql[0].text(), "INSERT INTO person (id) VALUES (NEXT VALUE FOR person_seq)");
}

#[test]
fn unknown_extension_is_unsupported() {
    let file = write_temp(".json", "{}");
    assert!(reader_for(file.path()).is_none());
    assert!(matches!(
        parse_file(file.path()),
        Err(ParseError::UnsupportedFormat(_))
    ));
}

#[test]
fn extension_match_ignores_case() {
    let file = write_temp(".YAML", PEOPLE_YAML);
    assert_eq!(reader_for(file.path()).unwrap().name(), "yaml");
    assert_eq!(parse_file(file.path()).unwrap().name(), "databaseChangeLog");
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path().join("missing.xml")).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
}
