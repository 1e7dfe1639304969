use serde_json::Value;
use tracing::debug;

use crate::client::{BulkResult, QueryResult};
use crate::error::Result;
use crate::statement::InsertStatement;

/// Cursor-style statement execution, the seam between callers and the wire.
///
/// [`crate::CrateClient`] implements it over HTTP; tests can supply an
/// in-memory implementation.
pub trait SqlExecutor {
    /// Run one statement with positional `?` parameters.
    fn execute(&mut self, sql: &str, args: &[Value]) -> Result<QueryResult>;

    /// Run one statement once per parameter row in a single request.
    fn execute_bulk(&mut self, sql: &str, bulk_args: &[Vec<Value>]) -> Result<BulkResult>;

    /// Rows per statement used by [`SqlExecutor::execute_many`].
    fn insert_page_size(&self) -> usize;

    /// Insert many rows, paging them into multi-row `VALUES` statements of
    /// at most [`SqlExecutor::insert_page_size`] rows each.
    ///
    /// Returns the number of rows the server reported as written.
    fn execute_many(&mut self, insert: &InsertStatement, rows: &[Vec<Value>]) -> Result<u64> {
        let page_size = self.insert_page_size().max(1);
        let mut written = 0u64;
        for (page_no, page) in rows.chunks(page_size).enumerate() {
            let sql = insert.values_sql(page.len());
            let args: Vec<Value> = page.iter().flatten().cloned().collect();
            debug!(page = page_no, rows = page.len(), "insert-many page");
            let result = self.execute(&sql, &args)?;
            written += result
                .rows_affected
                .unwrap_or(page.len() as i64)
                .max(0) as u64;
        }
        Ok(written)
    }
}
