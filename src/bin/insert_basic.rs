//! Basic conversation with CrateDB over HTTP: create a table, insert records
//! including timestamps, read them back.
//!
//! ```text
//! docker run --rm -it --publish=4200:4200 crate
//! insert-basic
//! ```

use std::process;

use anyhow::{Context, Result};
use cratedb_client::CrateClient;
use cratedb_testdrive::display::result_table;
use cratedb_testdrive::logging::init_tracing;
use cratedb_testdrive::walkthrough::insert_basic;
use cratedb_testdrive::WalkthroughConfig;

fn main() {
    dotenvy::dotenv().ok();
    init_tracing("compact", false, false);

    if let Err(err) = run() {
        eprintln!("insert-basic failed: {err:?}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = WalkthroughConfig::load()?;
    let mut connection = CrateClient::connect(&config.http_url)
        .with_context(|| format!("failed to connect to {}", config.http_url))?;
    let results = insert_basic(&mut connection)?;
    connection.close();

    println!("{}", result_table(&results));
    Ok(())
}
