//! Evaluate inserting a synthetic frame into CrateDB with different strategies.
//!
//! ```text
//! # Run CrateDB.
//! docker run --rm -it --publish=4200:4200 crate:latest
//!
//! # Default: bulk mode, 23_000 records.
//! insert-frame
//!
//! # "basic" mode with a bigger insert-many page.
//! insert-frame --mode=basic --insertmanyvalues-page-size=5000
//!
//! # "bulk" mode with a few more records.
//! insert-frame --mode=bulk --bulk-size=20000 --num-records=75000
//!
//! # CrateDB Cloud.
//! insert-frame --dburi='crate://admin:<PASSWORD>@example.aks1.westeurope.azure.cratedb.net:4200?ssl=true'
//! ```

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use cratedb_testdrive::logging::init_tracing;
use cratedb_testdrive::{DatabaseWorkload, InsertMode, Overrides, WorkloadConfig};
use tracing::info;

/// Insert a synthetic time-series frame into CrateDB
#[derive(Parser, Debug)]
#[command(name = "insert-frame")]
#[command(about = "Evaluate insert strategies against CrateDB over HTTP", long_about = None)]
struct Args {
    /// Database connection URI
    #[arg(long)]
    dburi: Option<String>,

    /// Insert mode
    #[arg(long, value_enum)]
    mode: Option<InsertMode>,

    /// Number of records to insert
    #[arg(long)]
    num_records: Option<u64>,

    /// Bulk size / chunk size
    #[arg(long)]
    bulk_size: Option<u64>,

    /// Rows per statement on the insert-many path
    #[arg(long)]
    insertmanyvalues_page_size: Option<u64>,

    /// Seed for the synthetic frame
    #[arg(long)]
    seed: Option<u64>,

    /// Log every statement sent to the server
    #[arg(long, overrides_with = "no_log_sql")]
    log_sql: bool,

    /// Do not log statements
    #[arg(long)]
    no_log_sql: bool,

    /// Log format: compact or json
    #[arg(long)]
    log_format: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        let log_statements = match (self.log_sql, self.no_log_sql) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        Overrides {
            dburi: self.dburi.clone(),
            mode: self.mode.map(|m| m.to_string()),
            num_records: self.num_records,
            bulk_size: self.bulk_size,
            insertmanyvalues_page_size: self.insertmanyvalues_page_size,
            log_statements,
            log_format: self.log_format.clone(),
            seed: self.seed,
        }
    }
}

fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("insert-frame failed: {err:?}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = WorkloadConfig::load(&args.overrides()).context("invalid configuration")?;
    init_tracing(&config.log_format, args.debug, config.log_statements);

    let workload = DatabaseWorkload::new(&config.dburi);
    let report = workload
        .process(&config)
        .with_context(|| format!("failed to import data with mode={}", config.mode))?;
    if report.failed_rows > 0 {
        info!(failed = report.failed_rows, "some rows were rejected by the server");
    }
    workload
        .show_table_stats()
        .context("failed to read table stats")?;
    Ok(())
}
