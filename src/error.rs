//! Error types for the cache client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache client.
///
/// Non-2xx responses from the remote service are not errors: read paths
/// collapse them to "no value" and write paths to `false`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A batch write contained a positional or empty key
    #[error("Invalid batch keys: {0}")]
    InvalidBatchKeys(String),

    /// Host, port or HTTP client settings could not be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A key could not be placed into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The remote answered a read that must succeed with an error status
    #[error("Remote answered with status {0}")]
    RemoteStatus(reqwest::StatusCode),

    /// The request never produced a response (refused, timed out, ...)
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache client.
pub type Result<T> = std::result::Result<T, CacheError>;
