use duckds_core::{config::DataSourceConfig, err::Result};

mod backend;
pub use backend::*;
mod completion;
pub use completion::*;
mod conf;
pub use conf::*;
mod connection;
pub use connection::*;
mod data;
pub use data::*;
mod datasource;
pub use datasource::*;
mod defaults;
pub use defaults::*;
mod entity_searcher;
pub use entity_searcher::*;
mod pool;
pub use pool::*;
mod query_compiler;
pub use query_compiler::*;
mod query_model;
pub use query_model::*;
mod response_parser;
pub use response_parser::*;
mod watcher;
pub use watcher::*;

/// The connector for DuckDB and MotherDuck built on duckdb-rs
#[derive(Default)]
pub struct DuckDbConnector;

impl DuckDbConnector {
    /// The plugin id the host registers this data source under
    pub const TYPE: &'static str = "motherduck-duckdb-datasource";

    pub fn parse_options(settings: &DataSourceConfig) -> Result<DuckDbConnectionConfig> {
        DuckDbConnectionConfig::parse(settings)
    }

    /// Connects a duckdb database
    pub fn connect(config: DuckDbConnectionConfig) -> Result<DuckDbConnection> {
        DuckDbConnectionUnpool::new(config).acquire()
    }

    pub fn create_backend(config: DuckDbConnectionConfig) -> DuckDbBackend {
        DuckDbBackend::new(config)
    }

    /// Creates the data source, backed by a duckdb backend in this process
    pub fn create_data_source(config: DuckDbConnectionConfig) -> DuckDbDataSource<DuckDbBackend> {
        DuckDbDataSource::new(Self::create_backend(config))
    }
}
