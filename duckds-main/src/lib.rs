use std::{
    fs,
    path::{Path, PathBuf},
};

use duckds_connectors_native_duckdb::{
    apply_query_defaults, to_raw_sql, DuckDbBackend, DuckDbConnector, DuckDbDataSource,
    QueryDataRequest, QueryDefaults,
};
use duckds_core::{
    err::{Context, Result},
    sqlil::SqlQuery,
};
use duckds_logging::{debug, info};
use serde::Serialize;

pub mod args;
pub mod conf;

use args::{Args, Command, FieldsArgs, QueryArgs};
use conf::*;

/// Runs the command, returning its output
pub fn run(command: &Command) -> Result<String> {
    match command {
        Command::Check(args) => with_data_source(args, |ds| match ds.test_datasource() {
            Ok(res) => to_json(&res),
            Err(err) => {
                debug!("Health check failed: {}", to_json(&err)?);
                Err(err).context("Data source check failed")
            }
        }),
        Command::Tables(args) => with_data_source(args, |ds| to_json(&ds.tables()?)),
        Command::Fields(FieldsArgs { args, table }) => with_data_source(args, |ds| {
            to_json(&ds.fields(&SqlQuery {
                table: Some(table.clone()),
                ..SqlQuery::new("A")
            })?)
        }),
        Command::Query(QueryArgs { args, sql }) => with_data_source(args, |ds| {
            to_json(&ds.host().query_data(&QueryDataRequest {
                queries: vec![SqlQuery {
                    raw_sql: Some(sql.clone()),
                    ..SqlQuery::new("A")
                }],
            }))
        }),
        // builder queries are compiled without touching the database
        Command::RawSql(args) => compile_raw_sql(&args.query),
    }
}

/// Loads the settings file and hands a data source over them to `f`
fn with_data_source<F>(args: &Args, f: F) -> Result<String>
where
    F: FnOnce(&DuckDbDataSource<DuckDbBackend>) -> Result<String>,
{
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let settings = init_conf(&path)?;

    let options = DuckDbConnector::parse_options(settings)?;
    info!("Using duckdb database \"{}\"", options.database());

    f(&DuckDbConnector::create_data_source(options))
}

fn compile_raw_sql(path: &Path) -> Result<String> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read query file {}", path.display()))?;
    let query = SqlQuery::from_json(&json)?;

    Ok(to_raw_sql(&apply_query_defaults(
        Some(&query),
        &QueryDefaults::default(),
    )))
}

fn to_json<T: Serialize>(val: &T) -> Result<String> {
    serde_json::to_string_pretty(val).context("Failed to serialize output")
}
