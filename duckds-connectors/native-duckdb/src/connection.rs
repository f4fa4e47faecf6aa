use duckdb::types::Value;
use duckds_core::{
    data::DataFrame,
    err::{Context, Result},
};
use duckds_logging::{debug, MaxLogLength};

use crate::from_duckdb;

/// Connection to a duckdb database
pub struct DuckDbConnection {
    /// The inner connection
    con: duckdb::Connection,
}

impl DuckDbConnection {
    pub fn new(con: duckdb::Connection) -> Self {
        Self { con }
    }

    /// Executes the supplied sql and reads the results into a frame
    pub fn execute(&mut self, sql: &str) -> Result<DataFrame> {
        debug!("Executing query {}", MaxLogLength::new(Some(512), &sql));

        let mut stmt = self.con.prepare(sql).context("Failed to prepare query")?;
        let mut rows = stmt.query([]).context("Failed to execute query")?;
        let mut data = vec![];

        while let Some(row) = rows.next().context("Failed to read row")? {
            let cols = row.as_ref().column_count();
            data.push(
                (0..cols)
                    .map(|i| row.get::<_, Value>(i).map(from_duckdb))
                    .collect::<Result<Vec<_>, _>>()
                    .context("Failed to read column value")?,
            );
        }

        drop(rows);

        // column names are only available once the statement has executed
        let columns = stmt.column_names();

        DataFrame::from_rows(columns, data)
    }

    /// Executes one or more statements, discarding any results
    pub fn execute_batch(&mut self, sql: &str) -> Result<()> {
        debug!("Executing batch {}", MaxLogLength::new(Some(512), &sql));

        self.con
            .execute_batch(sql)
            .context("Failed to execute statements")
    }
}
