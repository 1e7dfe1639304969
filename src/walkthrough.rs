//! A basic conversation with CrateDB: create a table, insert records including
//! timestamps, and read them back.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use cratedb_client::{QueryResult, SqlExecutor, ToParam};
use tracing::info;

use crate::error::WorkloadError;

pub const DEFAULT_HTTP_URL: &str = "http://localhost:4200";

/// Run the walkthrough with the current clock.
pub fn insert_basic(executor: &mut dyn SqlExecutor) -> Result<QueryResult, WorkloadError> {
    insert_basic_at(executor, Local::now().naive_local(), Utc::now())
}

/// Run the walkthrough with fixed timestamps for rows 43 and 44.
pub fn insert_basic_at(
    executor: &mut dyn SqlExecutor,
    naive: NaiveDateTime,
    aware: DateTime<Utc>,
) -> Result<QueryResult, WorkloadError> {
    executor.execute("DROP TABLE IF EXISTS testdrive.foo;", &[])?;
    executor.execute(
        "CREATE TABLE testdrive.foo (id INT, timestamp TIMESTAMP WITH TIME ZONE);",
        &[],
    )?;
    executor.execute(
        "INSERT INTO testdrive.foo (id, timestamp) VALUES (42, 23423434);",
        &[],
    )?;
    executor.execute(
        "INSERT INTO testdrive.foo (id, timestamp) VALUES (43, ?);",
        &[naive.to_param()],
    )?;
    executor.execute(
        "INSERT INTO testdrive.foo (id, timestamp) VALUES (44, ?);",
        &[aware.to_param()],
    )?;
    executor.execute("REFRESH TABLE testdrive.foo;", &[])?;
    let results = executor.execute("SELECT * FROM testdrive.foo;", &[])?;
    info!(rows = results.total_rows, "walkthrough finished");
    Ok(results)
}
