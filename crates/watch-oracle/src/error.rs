//! Oracle client errors

use thiserror::Error;

/// Errors from the status oracle client
#[derive(Debug, Error)]
pub enum OracleError {
    /// Transport-level failure (connect, timeout, TLS)
    #[error("Oracle request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The oracle answered with a non-success status
    #[error("Oracle returned status {0}")]
    Status(u16),

    /// The response body did not match the expected shape
    #[error("Unexpected oracle response: {0}")]
    InvalidResponse(String),

    /// Client construction failed
    #[error("Failed to build oracle client: {0}")]
    Build(String),
}
