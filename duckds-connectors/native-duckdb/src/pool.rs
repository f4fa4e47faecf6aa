use duckds_core::err::{Context, Result};
use duckds_logging::{debug, info};

use crate::{conf::DuckDbConnectionConfig, DuckDbConnection};

/// Postgres functions used by the schema introspection queries which duckdb
/// lacks. Defined as temporary macros so file databases are never modified.
/// The `string_to_array` table macro only shadows the scalar function of the
/// same name in a FROM clause, where it yields each element `s` with its
/// 1-based subscript `i`.
pub const PG_COMPAT_SQL: &str = r#"
CREATE OR REPLACE TEMP MACRO quote_ident(ident) AS
    CASE
        WHEN regexp_full_match(ident, '[a-z_][a-z0-9_$]*') THEN ident
        ELSE '"' || replace(ident, '"', '""') || '"'
    END;
CREATE OR REPLACE TEMP MACRO array_lower(arr, dim) AS
    CASE WHEN dim = 1 AND len(arr) > 0 THEN 1 END;
CREATE OR REPLACE TEMP MACRO array_upper(arr, dim) AS
    CASE WHEN dim = 1 AND len(arr) > 0 THEN len(arr) END;
CREATE OR REPLACE TEMP MACRO string_to_array(str_value, delim) AS TABLE
    SELECT
        string_split(str_value, delim) AS s,
        unnest(range(1, len(string_split(str_value, delim)) + 1)) AS i;
"#;

/// Search path used when none is configured, duckdb reports an empty one
pub const DEFAULT_SEARCH_PATH: &str = "main";

/// DuckDB connections are cheap to open so we do not pool them,
/// every acquire opens a fresh connection.
#[derive(Debug, Clone)]
pub struct DuckDbConnectionUnpool {
    pub(crate) conf: DuckDbConnectionConfig,
}

impl DuckDbConnectionUnpool {
    pub fn new(conf: DuckDbConnectionConfig) -> Self {
        Self { conf }
    }

    pub fn conf(&self) -> &DuckDbConnectionConfig {
        &self.conf
    }

    /// Opens a new connection and runs the configured init sql on it
    pub fn acquire(&mut self) -> Result<DuckDbConnection> {
        self.conf.validate()?;

        info!("Opening duckdb connection to \"{}\"", self.conf.database());

        let con = if self.conf.is_in_memory() {
            duckdb::Connection::open_in_memory()
        } else {
            // the motherduck token travels as a connection string parameter
            duckdb::Connection::open(self.conf.connection_string())
        }
        .context("Failed to connect to duckdb")?;

        let mut con = DuckDbConnection::new(con);

        if self.conf.is_motherduck() {
            con.execute_batch("INSTALL 'motherduck'; LOAD 'motherduck';")
                .context("Failed to load the motherduck extension")?;
        }

        con.execute_batch(PG_COMPAT_SQL)
            .context("Failed to define introspection macros")?;
        con.execute_batch(&format!("SET search_path = '{DEFAULT_SEARCH_PATH}';"))
            .context("Failed to set the search path")?;

        if let Some(init_sql) = self.conf.init_sql() {
            debug!("Running init sql on new connection");
            con.execute_batch(init_sql)
                .context("Failed to run init sql")?;
        }

        Ok(con)
    }
}
