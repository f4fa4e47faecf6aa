#![allow(dead_code)]

use duckds_connectors_native_duckdb::{
    DuckDbBackend, DuckDbConnection, DuckDbConnectionConfig, DuckDbConnector,
};

pub fn connect_to_duckdb() -> DuckDbConnection {
    duckds_logging::init_for_tests();
    DuckDbConnector::connect(DuckDbConnectionConfig::in_memory()).unwrap()
}

pub fn file_config(dir: &tempfile::TempDir) -> DuckDbConnectionConfig {
    DuckDbConnectionConfig {
        path: dir.path().join("ducks.db").to_string_lossy().into_owned(),
        ..Default::default()
    }
}

/// In-memory database seeded with a `ducks` table
pub fn ducks_config() -> DuckDbConnectionConfig {
    duckds_logging::init_for_tests();
    DuckDbConnectionConfig {
        init_sql: Some(
            "CREATE TABLE ducks (name VARCHAR, weight DOUBLE);
             INSERT INTO ducks VALUES ('mallard', 1.2), ('teal', 0.4), ('eider', 2.1);"
                .into(),
        ),
        ..DuckDbConnectionConfig::in_memory()
    }
}

pub fn ducks_backend() -> DuckDbBackend {
    DuckDbConnector::create_backend(ducks_config())
}
