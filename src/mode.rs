use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::WorkloadError;

/// How rows reach the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InsertMode {
    /// All rows through the client's insert-many path, paged by page size.
    Basic,
    /// One multi-row statement per chunk of `bulk_size` rows.
    Multi,
    /// One bulk-args request per chunk of `bulk_size` rows.
    Bulk,
}

/// What happens to an existing table before writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IfExists {
    Replace,
    Append,
}

impl InsertMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertMode::Basic => "basic",
            InsertMode::Multi => "multi",
            InsertMode::Bulk => "bulk",
        }
    }

    pub fn if_exists(&self) -> IfExists {
        match self {
            InsertMode::Basic | InsertMode::Multi => IfExists::Replace,
            InsertMode::Bulk => IfExists::Append,
        }
    }
}

impl fmt::Display for InsertMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsertMode {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(InsertMode::Basic),
            "multi" => Ok(InsertMode::Multi),
            "bulk" => Ok(InsertMode::Bulk),
            _ => Err(WorkloadError::UnknownMode(s.to_string())),
        }
    }
}
