//! Error types for reprise-core

use thiserror::Error;

/// Configuration validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting that must be non-negative was negative
    #[error("{field} must be non-negative (got {value})")]
    Negative {
        /// Name of the offending setting
        field: &'static str,
        /// Value as it was supplied
        value: i64,
    },

    /// A setting that must be positive was zero
    #[error("{field} must be greater than 0")]
    Zero {
        /// Name of the offending setting
        field: &'static str,
    },

    /// A setting exceeded its supported maximum
    #[error("{field} must be at most {max} (got {value})")]
    TooLarge {
        /// Name of the offending setting
        field: &'static str,
        /// Value as it was supplied
        value: i64,
        /// Largest accepted value
        max: usize,
    },
}

/// Error type for reprise-core operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid matcher configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The metadata preamble of a reference text is not a JSON object
    #[error("invalid metadata preamble: {0}")]
    Metadata(#[from] serde_json::Error),

    /// A configuration file could not be parsed
    #[error("invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reprise-core operations
pub type Result<T> = std::result::Result<T, Error>;
