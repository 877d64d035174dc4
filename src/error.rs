//! Error types for crawl-sampler
//!
//! Network-facing operations are fail-soft: an unsuccessful HTTP status is not an
//! error here, it becomes an empty index result or an absent page. The variants
//! below cover what is left: misconfiguration, transport failures, malformed
//! index fields and malformed archive bytes.

use thiserror::Error;

/// Result type alias for crawl-sampler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for crawl-sampler
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "certificate_dir")
        key: Option<String>,
    },

    /// Transport-level HTTP failure (connect, TLS handshake, timeout, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An index record whose location fields cannot be turned into a byte range
    #[error("invalid index record {url_key}: {reason}")]
    InvalidRecord {
        /// URL key of the offending record
        url_key: String,
        /// Why the record was rejected
        reason: String,
    },

    /// The archive container could not be decoded
    #[error("archive container error: {0}")]
    Container(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a configuration error tied to a config key
    pub(crate) fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }

    /// Machine-readable error code, used as a structured log field
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Network(_) => "network_error",
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::InvalidRecord { .. } => "invalid_record",
            Error::Container(_) => "container_error",
            Error::Other(_) => "internal_error",
        }
    }
}
