//! In-memory stand-in for the CrateDB HTTP endpoint.
//!
//! Understands the handful of statements the testdrive programs send and
//! keeps inserted rows invisible until `REFRESH TABLE`, like the server.

#![allow(dead_code)]

use std::collections::HashMap;

use cratedb_client::{BulkResult, ClientError, QueryResult, SqlExecutor};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Execute { sql: String, args: Vec<Value> },
    Bulk { sql: String, rows: usize },
}

#[derive(Debug, Default)]
struct FakeTable {
    cols: Vec<String>,
    visible: Vec<Vec<Value>>,
    pending: Vec<Vec<Value>>,
}

pub struct FakeCrate {
    page_size: usize,
    pub recorded: Vec<Recorded>,
    tables: HashMap<String, FakeTable>,
}

impl FakeCrate {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            recorded: Vec::new(),
            tables: HashMap::new(),
        }
    }

    pub fn visible_rows(&self, table: &str) -> usize {
        self.tables.get(table).map_or(0, |t| t.visible.len())
    }

    pub fn statements(&self) -> Vec<&str> {
        self.recorded
            .iter()
            .map(|r| match r {
                Recorded::Execute { sql, .. } | Recorded::Bulk { sql, .. } => sql.as_str(),
            })
            .collect()
    }

    pub fn inserts(&self) -> usize {
        self.recorded
            .iter()
            .filter(|r| matches!(r, Recorded::Execute { sql, .. } if sql.starts_with("INSERT")))
            .count()
    }

    pub fn bulk_calls(&self) -> Vec<usize> {
        self.recorded
            .iter()
            .filter_map(|r| match r {
                Recorded::Bulk { rows, .. } => Some(*rows),
                _ => None,
            })
            .collect()
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut FakeTable, ClientError> {
        self.tables.get_mut(name).ok_or_else(|| ClientError::Server {
            status: 404,
            code: Some(4041),
            message: format!("RelationUnknown[Relation '{name}' unknown]"),
        })
    }

    fn run(&mut self, sql: &str, args: &[Value]) -> Result<QueryResult, ClientError> {
        let stmt = sql.trim().trim_end_matches(';').trim();

        if let Some(rest) = stmt.strip_prefix("DROP TABLE IF EXISTS ") {
            let existed = self.tables.remove(&table_name(rest)).is_some();
            return Ok(affected(i64::from(existed)));
        }
        if let Some(rest) = stmt.strip_prefix("CREATE TABLE IF NOT EXISTS ") {
            let name = table_name(rest);
            self.tables.entry(name).or_insert_with(|| FakeTable {
                cols: column_names(rest),
                ..FakeTable::default()
            });
            return Ok(affected(1));
        }
        if let Some(rest) = stmt.strip_prefix("CREATE TABLE ") {
            let name = table_name(rest);
            if self.tables.contains_key(&name) {
                return Err(ClientError::Server {
                    status: 409,
                    code: Some(4093),
                    message: format!("RelationAlreadyExists[Relation '{name}' already exists.]"),
                });
            }
            self.tables.insert(
                name,
                FakeTable {
                    cols: column_names(rest),
                    ..FakeTable::default()
                },
            );
            return Ok(affected(1));
        }
        if let Some(rest) = stmt.strip_prefix("INSERT INTO ") {
            let rows = value_rows(rest, args);
            let count = rows.len() as i64;
            self.table_mut(&table_name(rest))?.pending.extend(rows);
            return Ok(affected(count));
        }
        if let Some(rest) = stmt.strip_prefix("REFRESH TABLE ") {
            let table = self.table_mut(&table_name(rest))?;
            let pending = std::mem::take(&mut table.pending);
            table.visible.extend(pending);
            return Ok(affected(1));
        }
        if let Some(rest) = stmt.strip_prefix("SELECT COUNT(*) FROM ") {
            let count = self.table_mut(&table_name(rest))?.visible.len();
            return Ok(QueryResult::new(
                vec!["count(*)".to_string()],
                vec![vec![Value::from(count)]],
            ));
        }
        if let Some(rest) = stmt.strip_prefix("SELECT * FROM ") {
            let table = self.table_mut(&table_name(rest))?;
            return Ok(QueryResult::new(table.cols.clone(), table.visible.clone()));
        }
        if stmt == "SELECT 1" {
            return Ok(QueryResult::new(
                vec!["1".to_string()],
                vec![vec![Value::from(1)]],
            ));
        }
        Err(ClientError::Server {
            status: 400,
            code: Some(4000),
            message: format!("fake cannot handle: {stmt}"),
        })
    }
}

impl SqlExecutor for FakeCrate {
    fn execute(&mut self, sql: &str, args: &[Value]) -> Result<QueryResult, ClientError> {
        self.recorded.push(Recorded::Execute {
            sql: sql.to_string(),
            args: args.to_vec(),
        });
        self.run(sql, args)
    }

    fn execute_bulk(&mut self, sql: &str, bulk_args: &[Vec<Value>]) -> Result<BulkResult, ClientError> {
        self.recorded.push(Recorded::Bulk {
            sql: sql.to_string(),
            rows: bulk_args.len(),
        });
        let mut rowcounts = Vec::with_capacity(bulk_args.len());
        for row in bulk_args {
            let result = self.run(sql, row)?;
            rowcounts.push(result.rows_affected.unwrap_or(0));
        }
        Ok(BulkResult::from_rowcounts(rowcounts))
    }

    fn insert_page_size(&self) -> usize {
        self.page_size
    }
}

fn affected(count: i64) -> QueryResult {
    QueryResult::new(vec![], vec![]).with_rows_affected(Some(count))
}

fn table_name(rest: &str) -> String {
    rest.split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .replace('"', "")
}

fn column_names(rest: &str) -> Vec<String> {
    let Some(open) = rest.find('(') else {
        return Vec::new();
    };
    let close = rest.rfind(')').unwrap_or(rest.len());
    rest[open + 1..close]
        .split(',')
        .filter_map(|col| col.split_whitespace().next())
        .map(|col| col.replace('"', ""))
        .collect()
}

/// Rows of a `VALUES (…), (…)` clause with `?` bound from `args` in order.
fn value_rows(rest: &str, args: &[Value]) -> Vec<Vec<Value>> {
    let Some(pos) = rest.find("VALUES") else {
        return Vec::new();
    };
    let mut args = args.iter();
    rest[pos + "VALUES".len()..]
        .split(')')
        .filter_map(|group| group.split_once('(').map(|(_, inner)| inner))
        .map(|inner| {
            inner
                .split(',')
                .map(str::trim)
                .map(|token| match token {
                    "?" => args.next().cloned().unwrap_or(Value::Null),
                    literal => serde_json::from_str(literal)
                        .unwrap_or_else(|_| Value::String(literal.to_string())),
                })
                .collect()
        })
        .collect()
}
