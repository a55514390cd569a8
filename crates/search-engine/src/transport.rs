//! Search engine transport boundary.
//!
//! Abstracts the wire client so lifecycle and dispatch logic can be driven
//! against any backend (or an in-memory mock in tests). Implementations are
//! injected; this subsystem never constructs one. No operation retries on
//! failure; errors propagate to the caller.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::EngineError;

/// Wire operations the subsystem needs from the search engine.
#[async_trait]
pub trait EngineTransport: Send + Sync {
    /// Liveness probe.
    async fn ping(&self) -> Result<bool, EngineError>;

    /// Whether `index` (a physical index name or an alias) exists.
    async fn index_exists(&self, index: &str) -> Result<bool, EngineError>;

    /// Create a physical index with the given settings/mappings body.
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), EngineError>;

    /// Delete a physical index.
    async fn delete_index(&self, index: &str) -> Result<(), EngineError>;

    /// Refresh an index so recent writes become searchable.
    async fn refresh_index(&self, index: &str) -> Result<(), EngineError>;

    /// Close an index for settings updates.
    async fn close_index(&self, index: &str) -> Result<(), EngineError>;

    /// Reopen a closed index.
    async fn open_index(&self, index: &str) -> Result<(), EngineError>;

    /// Apply settings to an existing (closed) index.
    async fn put_settings(&self, index: &str, body: &Value) -> Result<(), EngineError>;

    /// Apply a type mapping to an existing index.
    async fn put_mapping(&self, index: &str, doc_type: &str, body: &Value)
        -> Result<(), EngineError>;

    /// Names of the physical indices `index` resolves to (the keys of the
    /// engine's get-mapping response; for an alias, every bound generation).
    async fn get_mapping(&self, index: &str) -> Result<Vec<String>, EngineError>;

    /// Bind `alias` to `index`. Existing bindings of the alias to other
    /// indices are left in place.
    async fn put_alias(&self, index: &str, alias: &str) -> Result<(), EngineError>;

    /// Submit a newline-delimited bulk payload. The raw engine response is
    /// returned; per-item results are not interpreted here.
    async fn bulk(&self, body: &str) -> Result<Value, EngineError>;

    /// Execute a search request against `index`.
    async fn search(&self, index: &str, body: &Value) -> Result<Value, EngineError>;

    /// Execute a suggest request against `index`.
    async fn suggest(&self, index: &str, body: &Value) -> Result<Value, EngineError>;
}
