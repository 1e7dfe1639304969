//! Blocking client for the CrateDB HTTP SQL endpoint.
//!
//! Statements travel as JSON to `POST /_sql`, optionally with positional
//! parameters or with bulk args (one parameter row per statement execution,
//! applied in a single request).
//!
//! ## Example
//!
//! ```rust,no_run
//! use cratedb_client::{CrateClient, SqlExecutor};
//! use serde_json::json;
//!
//! let mut client = CrateClient::connect("crate://localhost:4200")?;
//! client.update("CREATE TABLE IF NOT EXISTS t (id INT)")?;
//! let bulk = client.execute_bulk(
//!     "INSERT INTO t (id) VALUES (?)",
//!     &[vec![json!(1)], vec![json!(2)]],
//! )?;
//! println!("Rows written: {}", bulk.rows_written());
//! # Ok::<(), cratedb_client::ClientError>(())
//! ```

pub mod client;
pub mod error;
pub mod executor;
mod protocol;
pub mod statement;
pub mod types;
pub mod uri;
pub mod value;

pub use client::{BulkResult, ClientOptions, CrateClient, QueryResult, UpdateResult};
pub use error::{ClientError, Result};
pub use executor::SqlExecutor;
pub use statement::{quote_ident, InsertStatement};
pub use types::DataType;
pub use uri::ConnectionUri;
pub use value::ToParam;
