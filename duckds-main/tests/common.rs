#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

pub fn duckds() -> Command {
    Command::cargo_bin("duckds").unwrap()
}

pub fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Settings of an in-memory database seeded with a few rows
pub fn ducks_config() -> NamedTempFile {
    write_temp(
        r#"
uid: ducks
type: motherduck-duckdb-datasource
jsonData:
  path: ":memory:"
  initSql: |
    CREATE TABLE ducks (name VARCHAR, weight DOUBLE);
    INSERT INTO ducks VALUES ('mallard', 1.2), ('teal', 0.4);
"#,
    )
}
