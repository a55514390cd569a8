//! Engine error types.

use thiserror::Error;

use search_types::ConfigError;

/// Errors raised by lifecycle, bulk, and dispatch operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Fatal configuration error (missing alias, invalid counts).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The transport failed to reach the engine or the engine rejected the
    /// request.
    #[error("transport error: {0}")]
    Transport(String),

    /// A request or document body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
