//! Error types for the trust core
//!
//! Scorers are total functions and never fail. The only failure a caller
//! has to handle on the hot path is a lost-update conflict from the lockout
//! store, which is always retryable.

use thiserror::Error;

/// Errors that can occur in the trust core
#[derive(Error, Debug)]
pub enum TrustError {
    #[error("Lockout update conflict for account {account}: expected version {expected}, found {found}")]
    Conflict {
        account: String,
        expected: u64,
        found: u64,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse input: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrustError {
    /// Whether the operation can be retried against fresh state
    pub fn is_retryable(&self) -> bool {
        matches!(self, TrustError::Conflict { .. })
    }
}

impl From<serde_json::Error> for TrustError {
    fn from(err: serde_json::Error) -> Self {
        TrustError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for TrustError {
    fn from(err: toml::de::Error) -> Self {
        TrustError::Parse(err.to_string())
    }
}

pub type TrustResult<T> = Result<T, TrustError>;
