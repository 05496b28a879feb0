//! Error types for letterfeed.

use thiserror::Error;

/// Common error type for letterfeed.
#[derive(Error, Debug)]
pub enum LetterfeedError {
    /// Outbound transport failure (DNS, connection, timeout).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The archive request succeeded but the upstream returned a
    /// non-success status.
    #[error("upstream returned {0}")]
    Upstream(String),

    /// The archive response body could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// The extracted feed could not be serialized to RSS.
    #[error("serialization error: {0}")]
    Serialize(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for letterfeed operations.
pub type Result<T> = std::result::Result<T, LetterfeedError>;
