//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The alias is required; without it no index can be addressed.
    #[error("alias must be defined for the search engine client")]
    MissingAlias,

    /// Underlying configuration source error (file, env, deserialization).
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was present but out of range or malformed.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
