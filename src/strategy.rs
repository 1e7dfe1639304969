use std::time::{Duration, Instant};

use cratedb_client::{quote_ident, InsertStatement, SqlExecutor};
use tracing::{debug, info, warn};

use crate::error::WorkloadError;
use crate::frame::TimeFrame;
use crate::mode::{IfExists, InsertMode};

/// SQL type of every value column.
const VALUE_COLUMN_TYPE: &str = "DOUBLE PRECISION";

/// Summary of one insert run.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertReport {
    pub mode: InsertMode,
    pub rows_written: u64,
    pub failed_rows: usize,
    /// Statements or bulk requests sent for the data itself.
    pub requests: usize,
    pub elapsed: Duration,
}

impl InsertReport {
    pub fn records_per_second(&self) -> f64 {
        self.rows_written as f64 / self.elapsed.as_secs_f64().max(0.001)
    }
}

/// One way of writing a frame's rows into an existing table.
pub trait InsertStrategy {
    fn mode(&self) -> InsertMode;

    /// Write all rows; returns (rows written, failed rows, requests sent).
    fn write_rows(
        &self,
        executor: &mut dyn SqlExecutor,
        insert: &InsertStatement,
        frame: &TimeFrame,
    ) -> Result<(u64, usize, usize), WorkloadError>;
}

/// Rows go through the executor's insert-many path, which pages them.
#[derive(Debug, Clone, Copy)]
pub struct BasicInsert;

/// One multi-row `VALUES` statement per chunk.
#[derive(Debug, Clone, Copy)]
pub struct MultiRowInsert {
    pub chunk_size: usize,
}

/// One bulk-args request per chunk.
#[derive(Debug, Clone, Copy)]
pub struct BulkInsert {
    pub chunk_size: usize,
}

impl InsertStrategy for BasicInsert {
    fn mode(&self) -> InsertMode {
        InsertMode::Basic
    }

    fn write_rows(
        &self,
        executor: &mut dyn SqlExecutor,
        insert: &InsertStatement,
        frame: &TimeFrame,
    ) -> Result<(u64, usize, usize), WorkloadError> {
        let records = frame.records();
        let page_size = executor.insert_page_size().max(1);
        let written = executor.execute_many(insert, &records)?;
        Ok((written, 0, records.len().div_ceil(page_size)))
    }
}

impl InsertStrategy for MultiRowInsert {
    fn mode(&self) -> InsertMode {
        InsertMode::Multi
    }

    fn write_rows(
        &self,
        executor: &mut dyn SqlExecutor,
        insert: &InsertStatement,
        frame: &TimeFrame,
    ) -> Result<(u64, usize, usize), WorkloadError> {
        let records = frame.records();
        let mut written = 0u64;
        let mut requests = 0usize;
        for chunk in records.chunks(self.chunk_size.max(1)) {
            let sql = insert.values_sql(chunk.len());
            let args: Vec<_> = chunk.iter().flatten().cloned().collect();
            let result = executor.execute(&sql, &args)?;
            written += result
                .rows_affected
                .unwrap_or(chunk.len() as i64)
                .max(0) as u64;
            requests += 1;
            debug!(chunk = requests, rows = chunk.len(), "multi-row chunk written");
        }
        Ok((written, 0, requests))
    }
}

impl InsertStrategy for BulkInsert {
    fn mode(&self) -> InsertMode {
        InsertMode::Bulk
    }

    fn write_rows(
        &self,
        executor: &mut dyn SqlExecutor,
        insert: &InsertStatement,
        frame: &TimeFrame,
    ) -> Result<(u64, usize, usize), WorkloadError> {
        let records = frame.records();
        let sql = insert.single_row_sql();
        let mut written = 0u64;
        let mut failed = 0usize;
        let mut requests = 0usize;
        for chunk in records.chunks(self.chunk_size.max(1)) {
            let result = executor.execute_bulk(&sql, chunk)?;
            written += result.rows_written();
            failed += result.failed_rows();
            requests += 1;
            debug!(chunk = requests, rows = chunk.len(), "bulk chunk written");
        }
        if failed > 0 {
            warn!(failed, "bulk import reported failed rows");
        }
        Ok((written, failed, requests))
    }
}

impl InsertMode {
    /// Strategy for this mode. `bulk_size` is the chunk size for multi and bulk.
    pub fn strategy(&self, bulk_size: usize) -> Box<dyn InsertStrategy> {
        match self {
            InsertMode::Basic => Box::new(BasicInsert),
            InsertMode::Multi => Box::new(MultiRowInsert {
                chunk_size: bulk_size,
            }),
            InsertMode::Bulk => Box::new(BulkInsert {
                chunk_size: bulk_size,
            }),
        }
    }
}

/// `CREATE TABLE` statement for the frame's value columns.
pub fn create_table_sql(table: &str, frame: &TimeFrame, if_not_exists: bool) -> String {
    let columns = frame
        .column_names()
        .into_iter()
        .map(|name| format!("{} {VALUE_COLUMN_TYPE}", quote_ident(name)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE TABLE {}{} ({columns})",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        quote_ident(table)
    )
}

/// Drop-and-create for replace, create-if-missing for append.
pub fn prepare_table(
    executor: &mut dyn SqlExecutor,
    table: &str,
    frame: &TimeFrame,
    if_exists: IfExists,
) -> Result<(), WorkloadError> {
    match if_exists {
        IfExists::Replace => {
            executor.execute(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)), &[])?;
            executor.execute(&create_table_sql(table, frame, false), &[])?;
        }
        IfExists::Append => {
            executor.execute(&create_table_sql(table, frame, true), &[])?;
        }
    }
    Ok(())
}

/// Prepare `table` for the mode and write every row of `frame` into it.
pub fn write_frame(
    executor: &mut dyn SqlExecutor,
    table: &str,
    frame: &TimeFrame,
    mode: InsertMode,
    bulk_size: usize,
) -> Result<InsertReport, WorkloadError> {
    prepare_table(executor, table, frame, mode.if_exists())?;

    let strategy = mode.strategy(bulk_size);
    let insert = InsertStatement::new(table, frame.column_names());
    let start = Instant::now();
    let (rows_written, failed_rows, requests) = strategy.write_rows(executor, &insert, frame)?;
    let report = InsertReport {
        mode: strategy.mode(),
        rows_written,
        failed_rows,
        requests,
        elapsed: start.elapsed(),
    };

    info!(
        mode = %report.mode,
        rows = report.rows_written,
        requests = report.requests,
        "Inserted {} records in {:.3}s ({:.0} records/s)",
        report.rows_written,
        report.elapsed.as_secs_f64(),
        report.records_per_second()
    );
    Ok(report)
}
