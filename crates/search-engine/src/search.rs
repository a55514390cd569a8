//! Search dispatch.
//!
//! Query construction lives with the caller: a [`SearchQuery`] is told the
//! active index name and produces the full request body. Dispatch is gated
//! on the target existing; a missing target degrades to an empty result
//! instead of erroring.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::EngineError;
use crate::transport::EngineTransport;

/// A query object that can render itself against a concrete index.
pub trait SearchQuery: Send + Sync {
    /// Build the full request body; `index` is the active generation the
    /// request will run against.
    fn search_params(&self, index: &str) -> Value;
}

/// Dispatches search requests against the active alias target.
pub struct SearchDispatcher {
    transport: Arc<dyn EngineTransport>,
    index: String,
}

impl SearchDispatcher {
    pub fn new(transport: Arc<dyn EngineTransport>, index: impl Into<String>) -> Self {
        Self {
            transport,
            index: index.into(),
        }
    }

    /// Run a query. Returns the transport's raw response, or an empty
    /// result when the target does not exist.
    pub async fn search(&self, query: &dyn SearchQuery) -> Result<Value, EngineError> {
        if !self.transport.index_exists(&self.index).await? {
            debug!(index = %self.index, "Search target missing, returning empty result");
            return Ok(Value::Object(Default::default()));
        }
        let params = query.search_params(&self.index);
        self.transport.search(&self.index, &params).await
    }
}
