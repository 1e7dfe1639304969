use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::executor::SqlExecutor;
use crate::protocol::{ErrorResponse, SqlRequest, SqlResponse};
use crate::statement::quote_ident;
use crate::types::DataType;
use crate::uri::ConnectionUri;
use crate::value::value_as_i64;

/// Connection options that are not part of the URI.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Rows per statement for [`SqlExecutor::execute_many`].
    pub insert_page_size: usize,
    pub user_agent: String,
}

impl ClientOptions {
    pub fn with_insert_page_size(mut self, insert_page_size: usize) -> Self {
        self.insert_page_size = insert_page_size;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.insert_page_size == 0 {
            return Err(ClientError::InvalidOption(
                "insert_page_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            insert_page_size: 1_000,
            user_agent: format!("cratedb-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// A blocking client for the CrateDB HTTP SQL endpoint.
///
/// Every call is one `POST /_sql` request. There is no pooling and no retry;
/// server and transport failures are returned as [`ClientError`].
///
/// # Example
///
/// ```rust,no_run
/// use cratedb_client::CrateClient;
///
/// let mut client = CrateClient::connect("crate://localhost:4200")?;
/// let result = client.query("SELECT 1 AS one")?;
/// println!("Rows: {}", result.total_rows);
/// # Ok::<(), cratedb_client::ClientError>(())
/// ```
pub struct CrateClient {
    http: Client,
    endpoint: Url,
    target: String,
    username: Option<String>,
    password: Option<String>,
    default_schema: Option<String>,
    options: ClientOptions,
}

/// Result of executing a statement.
///
/// Carries the rows returned by the server alongside column metadata.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub cols: Vec<String>,
    pub col_types: Vec<DataType>,
    pub rows: Vec<Vec<Value>>,
    /// Total number of rows returned.
    pub total_rows: usize,
    /// Rows affected reported by the server (if available).
    pub rows_affected: Option<i64>,
    /// Server-side duration in milliseconds.
    pub duration_ms: f64,
}

impl QueryResult {
    pub fn new(cols: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let total_rows = rows.len();
        Self {
            cols,
            rows,
            total_rows,
            ..Self::default()
        }
    }

    pub fn with_rows_affected(mut self, rows_affected: Option<i64>) -> Self {
        self.rows_affected = rows_affected;
        self
    }

    pub fn with_col_types(mut self, col_types: Vec<DataType>) -> Self {
        self.col_types = col_types;
        self
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.total_rows == 0
    }

    pub fn column_type(&self, idx: usize) -> Option<&DataType> {
        self.col_types.get(idx)
    }

    /// First column of the first row as i64, e.g. for `COUNT(*)`.
    pub fn scalar_i64(&self) -> Result<i64> {
        let value = self
            .rows
            .first()
            .and_then(|row| row.first())
            .ok_or_else(|| ClientError::Conversion("scalar query returned no rows".to_string()))?;
        value_as_i64(value)
    }

    fn from_response(response: SqlResponse) -> Self {
        let total_rows = response.rows.len();
        Self {
            cols: response.cols,
            col_types: response.col_types,
            rows: response.rows,
            total_rows,
            rows_affected: response.rowcount,
            duration_ms: response.duration,
        }
    }
}

/// Result of executing an update/DDL statement.
#[derive(Debug, Clone)]
pub struct UpdateResult {
    /// Number of rows affected (if available).
    pub rows_affected: Option<i64>,
}

/// Outcome of a bulk-args request: one row count per parameter row.
#[derive(Debug, Clone, Default)]
pub struct BulkResult {
    /// Per-row counts; `-2` marks a row the server failed to apply.
    pub rowcounts: Vec<i64>,
    /// Failed row index and server message, when one was reported.
    pub errors: Vec<(usize, String)>,
    pub duration_ms: f64,
}

impl BulkResult {
    pub const FAILED_ROW: i64 = -2;

    pub fn from_rowcounts(rowcounts: Vec<i64>) -> Self {
        Self {
            rowcounts,
            ..Self::default()
        }
    }

    pub fn rows_written(&self) -> u64 {
        self.rowcounts.iter().filter(|c| **c > 0).map(|c| *c as u64).sum()
    }

    pub fn failed_rows(&self) -> usize {
        self.rowcounts
            .iter()
            .filter(|c| **c == Self::FAILED_ROW)
            .count()
    }

    fn from_response(response: SqlResponse) -> Self {
        let mut rowcounts = Vec::with_capacity(response.results.len());
        let mut errors = Vec::new();
        for (idx, row) in response.results.iter().enumerate() {
            rowcounts.push(row.rowcount);
            if let Some(message) = row.message() {
                errors.push((idx, message));
            }
        }
        Self {
            rowcounts,
            errors,
            duration_ms: response.duration,
        }
    }
}

impl CrateClient {
    /// Connect with default options.
    pub fn connect(uri: &str) -> Result<Self> {
        Self::connect_with(uri, ClientOptions::default())
    }

    /// Connect to a CrateDB server.
    ///
    /// Builds the HTTP client and tests it with a simple query.
    pub fn connect_with(uri: &str, options: ClientOptions) -> Result<Self> {
        options.validate()?;
        let uri = ConnectionUri::parse(uri)?;
        let http = Client::builder()
            .user_agent(options.user_agent.clone())
            .danger_accept_invalid_certs(uri.tls && !uri.verify_ssl_cert)
            .build()?;

        let mut client = Self {
            http,
            endpoint: uri.sql_endpoint()?,
            target: uri.display_target(),
            username: uri.username,
            password: uri.password,
            default_schema: uri.schema,
            options,
        };
        client.execute("SELECT 1", &[])?;
        info!(server = %client.target, "connected to CrateDB");
        Ok(client)
    }

    /// Execute a query and return results. Use when you expect rows.
    pub fn query(&mut self, sql: &str) -> Result<QueryResult> {
        self.execute(sql, &[])
    }

    /// Execute a query with positional parameters.
    pub fn query_with_params(&mut self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.execute(sql, params)
    }

    /// Execute an update/DDL statement (INSERT, UPDATE, DELETE, CREATE, etc.).
    pub fn update(&mut self, sql: &str) -> Result<UpdateResult> {
        self.update_with_params(sql, &[])
    }

    /// Execute an update with positional parameters.
    pub fn update_with_params(&mut self, sql: &str, params: &[Value]) -> Result<UpdateResult> {
        let result = self.execute(sql, params)?;
        Ok(UpdateResult {
            rows_affected: result.rows_affected,
        })
    }

    /// Make recent writes to `table` visible to queries.
    pub fn refresh_table(&mut self, table: &str) -> Result<()> {
        self.update(&format!("REFRESH TABLE {}", quote_ident(table)))?;
        Ok(())
    }

    /// Drop the client. HTTP connections are released with it.
    pub fn close(self) {
        debug!(server = %self.target, "closing CrateDB client");
    }

    fn send(&self, request: &SqlRequest<'_>) -> Result<SqlResponse> {
        let mut builder = self.http.post(self.endpoint.clone()).json(request);
        if let Some(username) = &self.username {
            builder = builder.basic_auth(username, self.password.as_ref());
        }
        if let Some(schema) = &self.default_schema {
            builder = builder.header("Default-Schema", schema);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(payload) => ClientError::Server {
                    status: status.as_u16(),
                    code: payload.error.code,
                    message: payload.error.message,
                },
                Err(_) => ClientError::Server {
                    status: status.as_u16(),
                    code: None,
                    message: body,
                },
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl SqlExecutor for CrateClient {
    fn execute(&mut self, sql: &str, args: &[Value]) -> Result<QueryResult> {
        debug!(stmt = sql, args = args.len(), "executing statement");
        let response = self.send(&SqlRequest::statement(sql, args))?;
        Ok(QueryResult::from_response(response))
    }

    fn execute_bulk(&mut self, sql: &str, bulk_args: &[Vec<Value>]) -> Result<BulkResult> {
        debug!(stmt = sql, rows = bulk_args.len(), "executing bulk statement");
        let response = self.send(&SqlRequest::bulk(sql, bulk_args))?;
        let result = BulkResult::from_response(response);
        for (idx, message) in &result.errors {
            warn!(row = idx, %message, "bulk row failed");
        }
        Ok(result)
    }

    fn insert_page_size(&self) -> usize {
        self.options.insert_page_size
    }
}
