use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::WorkloadError;
use crate::mode::InsertMode;
use crate::walkthrough::DEFAULT_HTTP_URL;

/// Settings of one benchmark run.
///
/// Layered as: built-in defaults, then `TESTDRIVE_*` environment variables,
/// then explicit command-line flags.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkloadConfig {
    /// Database connection URI.
    pub dburi: String,
    /// Insert mode: "basic", "multi" or "bulk".
    pub mode: String,
    /// Number of records to insert.
    pub num_records: usize,
    /// Chunk size for multi and bulk modes.
    pub bulk_size: usize,
    /// Rows per statement on the insert-many path (basic mode).
    pub insertmanyvalues_page_size: usize,
    /// Log every statement the client sends.
    pub log_statements: bool,
    /// Log format: "compact" or "json".
    pub log_format: String,
    /// Seed for the synthetic frame; random when unset.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            dburi: "crate://localhost:4200".to_string(),
            mode: "bulk".to_string(),
            num_records: 23_000,
            bulk_size: 5_000,
            insertmanyvalues_page_size: 1_000,
            log_statements: true,
            log_format: "compact".to_string(),
            seed: None,
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub dburi: Option<String>,
    pub mode: Option<String>,
    pub num_records: Option<u64>,
    pub bulk_size: Option<u64>,
    pub insertmanyvalues_page_size: Option<u64>,
    pub log_statements: Option<bool>,
    pub log_format: Option<String>,
    pub seed: Option<u64>,
}

impl WorkloadConfig {
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        let defaults_json = serde_json::to_string(&Self::default())
            .with_context(|| "failed to serialize defaults")?;
        let settings = config::Config::builder()
            .add_source(
                config::File::from_str(&defaults_json, config::FileFormat::Json).required(false),
            )
            .add_source(config::Environment::with_prefix("TESTDRIVE").try_parsing(true))
            .set_override_option("dburi", overrides.dburi.clone())?
            .set_override_option("mode", overrides.mode.clone())?
            .set_override_option("num_records", overrides.num_records)?
            .set_override_option("bulk_size", overrides.bulk_size)?
            .set_override_option(
                "insertmanyvalues_page_size",
                overrides.insertmanyvalues_page_size,
            )?
            .set_override_option("log_statements", overrides.log_statements)?
            .set_override_option("log_format", overrides.log_format.clone())?
            .set_override_option("seed", overrides.seed)?
            .build()
            .with_context(|| "failed to load configuration")?;
        let cfg: WorkloadConfig = settings
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn insert_mode(&self) -> Result<InsertMode, WorkloadError> {
        self.mode.parse()
    }

    /// Rejects settings that would fail later, before any work starts.
    pub fn validate(&self) -> Result<(), WorkloadError> {
        self.insert_mode()?;
        if self.bulk_size == 0 {
            return Err(WorkloadError::InvalidSetting {
                name: "bulk_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.insertmanyvalues_page_size == 0 {
            return Err(WorkloadError::InvalidSetting {
                name: "insertmanyvalues_page_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if !matches!(self.log_format.as_str(), "compact" | "json") {
            return Err(WorkloadError::InvalidSetting {
                name: "log_format",
                reason: format!("expected \"compact\" or \"json\", got {:?}", self.log_format),
            });
        }
        Ok(())
    }
}

/// Settings of the walkthrough program, read from `TESTDRIVE_*` variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalkthroughConfig {
    /// HTTP URL of the CrateDB node.
    pub http_url: String,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            http_url: DEFAULT_HTTP_URL.to_string(),
        }
    }
}

impl WalkthroughConfig {
    pub fn load() -> anyhow::Result<Self> {
        let defaults_json = serde_json::to_string(&Self::default())
            .with_context(|| "failed to serialize defaults")?;
        config::Config::builder()
            .add_source(
                config::File::from_str(&defaults_json, config::FileFormat::Json).required(false),
            )
            .add_source(config::Environment::with_prefix("TESTDRIVE"))
            .build()
            .with_context(|| "failed to load configuration")?
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")
    }
}
