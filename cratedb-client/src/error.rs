use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid connection URI {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("invalid client option: {0}")]
    InvalidOption(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error {status} (code {code:?}): {message}")]
    Server {
        status: u16,
        code: Option<i64>,
        message: String,
    },
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected value: {0}")]
    Conversion(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
