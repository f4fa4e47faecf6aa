use duckds_connectors_base::interface::{HealthChecker, QueryRunner, ScopedVars, TemplateSrv};
use duckds_core::{
    err::Result,
    sqlil::SqlQuery,
    web::{HealthCheckError, HealthCheckResult, HealthStatus, TestDatasourceResult},
};
use duckds_logging::debug;
use serde::{Deserialize, Serialize};

use crate::{
    to_raw_sql, DuckDbEntitySearcher, DuckDbQueryModel, DuckDbResponseParser, SchemaFilter,
    SqlCompletionProvider, SqlSelectableValue,
};

/// A table offered by the query builder's table picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupItem {
    pub name: String,
    pub completion: String,
}

/// An aggregate function offered by the query builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregate {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Aggregate {
    fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResults {
    pub query: SqlQuery,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_sql: Option<String>,
    pub error: String,
    pub is_error: bool,
    pub is_valid: bool,
}

/// The DuckDB data source as seen by the host's SQL query builder.
///
/// Queries and health checks go through the host `H`.
pub struct DuckDbDataSource<H> {
    host: H,
    schema_filter: SchemaFilter,
}

impl<H: QueryRunner + HealthChecker> DuckDbDataSource<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            schema_filter: SchemaFilter::default(),
        }
    }

    pub fn with_schema_filter(mut self, filter: SchemaFilter) -> Self {
        self.schema_filter = filter;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn init(&self) -> bool {
        true
    }

    /// DuckDB has no notion of datasets, everything lives in "default"
    pub fn datasets(&self) -> Vec<String> {
        vec![]
    }

    pub fn tables(&self) -> Result<Vec<String>> {
        DuckDbEntitySearcher::discover_tables(&self.host, &self.schema_filter)
    }

    /// The columns of the query's table, none when no table is selected
    pub fn fields(&self, query: &SqlQuery) -> Result<Vec<SqlSelectableValue>> {
        let table = match query.table() {
            Some(t) => t,
            None => return Ok(vec![]),
        };

        DuckDbEntitySearcher::discover_fields(&self.host, table)
    }

    pub fn lookup(&self) -> Result<Vec<LookupItem>> {
        Ok(self
            .tables()?
            .into_iter()
            .map(|t| LookupItem {
                completion: t.clone(),
                name: t,
            })
            .collect())
    }

    pub fn to_raw_sql(&self, query: &SqlQuery) -> String {
        to_raw_sql(query)
    }

    /// Queries are validated by the database when they run
    pub fn validate_query(&self, query: &SqlQuery) -> ValidationResults {
        ValidationResults {
            raw_sql: query.raw_sql.clone(),
            query: query.clone(),
            error: String::new(),
            is_error: false,
            is_valid: true,
        }
    }

    pub fn functions(&self) -> Vec<Aggregate> {
        vec![
            Aggregate::new("1", "COUNT", "Counts the number of rows"),
            Aggregate::new("2", "SUM", "Calculates the sum"),
            Aggregate::new("3", "AVG", "Calculates the average"),
            Aggregate::new("4", "MIN", "Calculates the min"),
            Aggregate::new("5", "MAX", "Calculates the max"),
        ]
    }

    pub fn completion_provider(&self) -> SqlCompletionProvider<'_, H> {
        SqlCompletionProvider::new(self)
    }

    pub fn query_model<'a>(
        &self,
        target: Option<&SqlQuery>,
        template_srv: Option<&'a dyn TemplateSrv>,
        scoped_vars: Option<&'a ScopedVars>,
    ) -> DuckDbQueryModel<'a> {
        DuckDbQueryModel::new(target, template_srv, scoped_vars)
    }

    pub fn response_parser(&self) -> DuckDbResponseParser {
        DuckDbResponseParser::default()
    }

    /// Runs the host's health check, as used by "save & test"
    pub fn test_datasource(&self) -> Result<TestDatasourceResult, HealthCheckError> {
        let res = self
            .host
            .check_health()
            .unwrap_or_else(|err| HealthCheckResult::error(format!("{:#}", err)));

        debug!("Health check returned {:?}", res);

        match res.status {
            HealthStatus::Ok => Ok(TestDatasourceResult::success(res.message)),
            _ => Err(HealthCheckError::from(res)),
        }
    }
}
