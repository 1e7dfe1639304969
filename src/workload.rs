use cratedb_client::{quote_ident, ClientOptions, ConnectionUri, CrateClient, SqlExecutor};
use tracing::info;

use crate::config::WorkloadConfig;
use crate::error::WorkloadError;
use crate::frame::TimeFrame;
use crate::strategy::{write_frame, InsertReport};

/// Table written by the benchmark.
pub const TABLE_NAME: &str = "testdrive_pandas";

/// Exercise the insert modes against one database.
pub struct DatabaseWorkload {
    dburi: String,
    table_name: String,
}

impl DatabaseWorkload {
    pub fn new(dburi: &str) -> Self {
        Self {
            dburi: dburi.to_string(),
            table_name: TABLE_NAME.to_string(),
        }
    }

    pub fn with_table_name(mut self, table_name: &str) -> Self {
        self.table_name = table_name.to_string();
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Server address of `dburi` with credentials removed, safe to log.
    pub fn target(&self) -> Result<String, WorkloadError> {
        Ok(ConnectionUri::parse(&self.dburi)?.display_target())
    }

    pub fn connect(&self, options: ClientOptions) -> Result<CrateClient, WorkloadError> {
        info!("Connecting to {}", self.target()?);
        Ok(CrateClient::connect_with(&self.dburi, options)?)
    }

    /// Build the frame, connect with the configured page size and write it.
    ///
    /// The mode is validated before anything else happens.
    pub fn process(&self, config: &WorkloadConfig) -> Result<InsertReport, WorkloadError> {
        let mode = config.insert_mode()?;

        info!("Creating frame with {} records", config.num_records);
        let frame = TimeFrame::per_second(config.num_records, config.seed);
        println!("{frame}");

        info!(
            "Importing data with mode={}, bulk_size={}, insertmanyvalues_page_size={}",
            mode, config.bulk_size, config.insertmanyvalues_page_size
        );
        let options =
            ClientOptions::default().with_insert_page_size(config.insertmanyvalues_page_size);
        let mut client = self.connect(options)?;
        let report = write_frame(&mut client, &self.table_name, &frame, mode, config.bulk_size)?;
        client.close();
        Ok(report)
    }

    /// Display number of records in the table, on a fresh connection.
    pub fn show_table_stats(&self) -> Result<i64, WorkloadError> {
        let mut client = self.connect(ClientOptions::default())?;
        let table_size = self.table_size(&mut client)?;
        client.close();
        Ok(table_size)
    }

    /// Refresh the table and count its rows.
    pub fn table_size(&self, executor: &mut dyn SqlExecutor) -> Result<i64, WorkloadError> {
        let table = quote_ident(&self.table_name);
        executor.execute(&format!("REFRESH TABLE {table}"), &[])?;
        let result = executor.execute(&format!("SELECT COUNT(*) FROM {table}"), &[])?;
        let table_size = result.scalar_i64()?;
        info!("Table size: {table_size}");
        Ok(table_size)
    }
}
