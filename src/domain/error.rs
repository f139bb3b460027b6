use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced inline by a query panel.
///
/// The `Display` text is exactly what the panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum QueryError {
    #[error("Invalid Ethereum address format")]
    InvalidAddress,

    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decode(String),

    #[error("Failed to fetch token information")]
    TokenInfoUnavailable,
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            QueryError::Decode(e.to_string())
        } else {
            QueryError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self {
        QueryError::Decode(e.to_string())
    }
}
