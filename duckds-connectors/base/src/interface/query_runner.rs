use duckds_core::{data::DataFrame, err::Result};

/// The host's query execution channel.
///
/// Schema lookups issued by the data source are sent through here rather
/// than executed directly, so the host controls transport and auth.
pub trait QueryRunner {
    /// Executes the supplied SQL, tagging the request with `ref_id`
    fn run_sql(&self, sql: &str, ref_id: &str) -> Result<DataFrame>;
}

impl<T: QueryRunner + ?Sized> QueryRunner for &T {
    fn run_sql(&self, sql: &str, ref_id: &str) -> Result<DataFrame> {
        (**self).run_sql(sql, ref_id)
    }
}
