//! JSON payloads exchanged with the `/_sql` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::DataType;

#[derive(Debug, Serialize)]
pub(crate) struct SqlRequest<'a> {
    pub(crate) stmt: &'a str,
    #[serde(skip_serializing_if = "<[Value]>::is_empty")]
    pub(crate) args: &'a [Value],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) bulk_args: Option<&'a [Vec<Value>]>,
}

impl<'a> SqlRequest<'a> {
    pub(crate) fn statement(stmt: &'a str, args: &'a [Value]) -> Self {
        Self {
            stmt,
            args,
            bulk_args: None,
        }
    }

    pub(crate) fn bulk(stmt: &'a str, bulk_args: &'a [Vec<Value>]) -> Self {
        Self {
            stmt,
            args: &[],
            bulk_args: Some(bulk_args),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SqlResponse {
    #[serde(default)]
    pub(crate) cols: Vec<String>,
    #[serde(default)]
    pub(crate) col_types: Vec<DataType>,
    #[serde(default)]
    pub(crate) rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub(crate) rowcount: Option<i64>,
    #[serde(default)]
    pub(crate) duration: f64,
    #[serde(default)]
    pub(crate) results: Vec<BulkRowResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkRowResult {
    pub(crate) rowcount: i64,
    #[serde(default)]
    pub(crate) error: Option<ErrorDetail>,
    #[serde(default)]
    pub(crate) error_message: Option<String>,
}

impl BulkRowResult {
    pub(crate) fn message(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|e| e.message.clone())
            .or_else(|| self.error_message.clone())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) code: Option<i64>,
}
