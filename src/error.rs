use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    #[error("invalid setting {name}: {reason}")]
    InvalidSetting { name: &'static str, reason: String },
    #[error("client error: {0}")]
    Client(#[from] cratedb_client::ClientError),
}
