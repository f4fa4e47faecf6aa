use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard},
};

use duckds_connectors_base::interface::{HealthChecker, QueryRunner};
use duckds_core::{
    data::DataFrame,
    err::{Context, Error, Result},
    sqlil::SqlQuery,
    web::HealthCheckResult,
};
use duckds_logging::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{DuckDbConnection, DuckDbConnectionConfig, DuckDbConnectionUnpool, FileWatcher};

/// A batch of queries sent by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryDataRequest {
    pub queries: Vec<SqlQuery>,
}

/// The result of a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DataResponse {
    #[serde(default)]
    pub frames: Vec<DataFrame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DataResponse {
    pub fn frame(frame: DataFrame) -> Self {
        Self {
            frames: vec![frame],
            error: None,
        }
    }

    pub fn error(err: &Error) -> Self {
        Self {
            frames: vec![],
            error: Some(format!("{:#}", err)),
        }
    }
}

/// Results of a batch of queries keyed by ref id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryDataResponse {
    pub responses: BTreeMap<String, DataResponse>,
}

struct BackendState {
    pool: DuckDbConnectionUnpool,
    connection: Option<DuckDbConnection>,
    watcher: FileWatcher,
}

/// Executes queries against DuckDB on behalf of the host.
///
/// The connection is opened lazily and shared by all callers, requests are
/// serialized on it. When the database file is modified by another process
/// the connection is reopened before the next query.
pub struct DuckDbBackend {
    conf: DuckDbConnectionConfig,
    state: Mutex<BackendState>,
}

impl DuckDbBackend {
    pub fn new(conf: DuckDbConnectionConfig) -> Self {
        Self {
            state: Mutex::new(BackendState {
                pool: DuckDbConnectionUnpool::new(conf.clone()),
                connection: None,
                watcher: FileWatcher::new(&conf),
            }),
            conf,
        }
    }

    pub fn conf(&self) -> &DuckDbConnectionConfig {
        &self.conf
    }

    fn state(&self) -> Result<MutexGuard<'_, BackendState>> {
        self.state
            .lock()
            .map_err(|_| Error::msg("Failed to lock backend state"))
    }

    fn connection(state: &mut BackendState) -> Result<&mut DuckDbConnection> {
        if state.watcher.has_update() && state.connection.is_some() {
            info!("DuckDB file has been modified, reloading connection");
            state.connection = None;
        }

        if state.connection.is_none() {
            let con = state.pool.acquire()?;
            state.watcher.reset();
            state.connection = Some(con);
        }

        state
            .connection
            .as_mut()
            .context("Connection is not available")
    }

    /// Drops the current connection, the next query reconnects
    pub fn reset(&self) -> Result<()> {
        self.state()?.connection = None;
        Ok(())
    }

    /// Runs every (visible) query of the batch.
    /// Failures are reported against the query's ref id.
    pub fn query_data(&self, req: &QueryDataRequest) -> QueryDataResponse {
        let mut responses = BTreeMap::new();

        for query in req.queries.iter().filter(|q| q.hide != Some(true)) {
            let res = match query.raw_sql() {
                Some(sql) => self.run_sql(sql, &query.ref_id),
                None => Err(Error::msg("Query is empty")),
            };

            let res = match res {
                Ok(frame) => DataResponse::frame(frame),
                Err(err) => {
                    warn!("Query \"{}\" failed: {:?}", query.ref_id, err);
                    DataResponse::error(&err)
                }
            };

            responses.insert(query.ref_id.clone(), res);
        }

        QueryDataResponse { responses }
    }
}

impl QueryRunner for DuckDbBackend {
    fn run_sql(&self, sql: &str, ref_id: &str) -> Result<DataFrame> {
        debug!("Running query \"{}\"", ref_id);
        let mut state = self.state()?;
        let con = Self::connection(&mut state)?;

        Ok(con.execute(sql)?.with_ref_id(ref_id))
    }
}

impl HealthChecker for DuckDbBackend {
    fn check_health(&self) -> Result<HealthCheckResult> {
        if let Err(err) = self.conf.validate() {
            return Ok(HealthCheckResult::error(err.to_string()));
        }

        let mut state = self.state()?;
        let res = Self::connection(&mut state).and_then(|con| con.execute("SELECT 1"));

        Ok(match res {
            Ok(_) => HealthCheckResult::ok("Data source is working"),
            Err(err) => {
                warn!("Health check failed: {:?}", err);
                // a broken connection is reopened on the next request
                state.connection = None;
                HealthCheckResult::error(format!("{:#}", err))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use duckds_core::{data::DataValue, web::HealthStatus};
    use pretty_assertions::assert_eq;

    use super::*;

    fn query(ref_id: &str, sql: &str) -> SqlQuery {
        SqlQuery {
            raw_sql: Some(sql.into()),
            ..SqlQuery::new(ref_id)
        }
    }

    #[test]
    fn test_run_sql_tags_ref_id() {
        let backend = DuckDbBackend::new(DuckDbConnectionConfig::in_memory());

        let frame = backend.run_sql("SELECT 1 AS one", "tables").unwrap();

        assert_eq!(frame.ref_id, Some("tables".into()));
        assert_eq!(frame.field("one").unwrap().values, vec![DataValue::Int32(1)]);
    }

    #[test]
    fn test_connection_is_reused() {
        let backend = DuckDbBackend::new(DuckDbConnectionConfig::in_memory());

        backend.run_sql("CREATE TABLE t AS SELECT 1 AS x", "A").unwrap();
        let frame = backend.run_sql("SELECT x FROM t", "A").unwrap();

        assert_eq!(frame.field("x").unwrap().values, vec![DataValue::Int32(1)]);
    }

    #[test]
    fn test_reset_drops_connection() {
        let backend = DuckDbBackend::new(DuckDbConnectionConfig::in_memory());

        backend.run_sql("CREATE TABLE t AS SELECT 1 AS x", "A").unwrap();
        backend.reset().unwrap();

        assert!(backend.run_sql("SELECT x FROM t", "A").is_err());
    }

    #[test]
    fn test_query_data() {
        let backend = DuckDbBackend::new(DuckDbConnectionConfig::in_memory());
        let req = QueryDataRequest {
            queries: vec![
                query("A", "SELECT 'a' AS v"),
                query("B", "SELECT * FROM missing_table"),
                SqlQuery::new("C"),
                SqlQuery {
                    hide: Some(true),
                    ..query("D", "SELECT 1")
                },
            ],
        };

        let res = backend.query_data(&req);

        assert_eq!(
            res.responses.keys().collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            res.responses["A"].frames[0].field("v").unwrap().values,
            vec![DataValue::Utf8String("a".into())]
        );
        assert!(res.responses["B"].error.is_some());
        assert!(res.responses["B"].frames.is_empty());
        assert_eq!(res.responses["C"].error, Some("Query is empty".into()));
    }

    #[test]
    fn test_check_health() {
        let backend = DuckDbBackend::new(DuckDbConnectionConfig::in_memory());

        assert_eq!(
            backend.check_health().unwrap(),
            HealthCheckResult::ok("Data source is working")
        );
    }

    #[test]
    fn test_check_health_init_sql_failure() {
        let backend = DuckDbBackend::new(DuckDbConnectionConfig {
            init_sql: Some("SELEKT 1".into()),
            ..DuckDbConnectionConfig::in_memory()
        });

        let res = backend.check_health().unwrap();

        assert_eq!(res.status, HealthStatus::Error);
        assert!(res.message.starts_with("Failed to run init sql"));
    }
}
