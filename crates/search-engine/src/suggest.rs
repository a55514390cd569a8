//! Autocomplete dispatch.
//!
//! Builds fuzzy completion-suggester requests against a store's suggestion
//! field and returns the raw suggester response.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use search_schema::suggest_field_name;
use search_types::StoreView;

use crate::error::EngineError;
use crate::transport::EngineTransport;

/// Edit distance allowed when matching completion inputs.
const SUGGEST_FUZZINESS: u32 = 1;

/// Dispatches autocomplete requests against the active alias target.
pub struct SuggestDispatcher {
    transport: Arc<dyn EngineTransport>,
    index: String,
}

impl SuggestDispatcher {
    pub fn new(transport: Arc<dyn EngineTransport>, index: impl Into<String>) -> Self {
        Self {
            transport,
            index: index.into(),
        }
    }

    /// Autocomplete `text` against the store's suggestion field. Returns
    /// the raw suggester response, or an empty result when the target does
    /// not exist.
    pub async fn autocomplete(
        &self,
        text: &str,
        store: &StoreView,
    ) -> Result<Value, EngineError> {
        if !self.transport.index_exists(&self.index).await? {
            debug!(index = %self.index, "Suggest target missing, returning empty result");
            return Ok(Value::Object(Default::default()));
        }

        let body = json!({
            "suggestions": {
                "text": text,
                "completion": {
                    "field": suggest_field_name(store),
                    "fuzzy": {
                        "fuzziness": SUGGEST_FUZZINESS,
                        "unicode_aware": true,
                    },
                },
            },
        });
        self.transport.suggest(&self.index, &body).await
    }
}
