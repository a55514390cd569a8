//! Bulk wire encoding.
//!
//! The engine's bulk format is newline-delimited JSON: an action header
//! naming the target index, document type, and id, then the document body,
//! repeating for each record, with a trailing blank line. A successful
//! transport call is treated as full success; per-item results are not
//! inspected.

use serde_json::{json, Value};

use crate::error::EngineError;

/// Document type records are indexed under unless the caller overrides it.
pub const DEFAULT_DOC_TYPE: &str = "product";

/// One document write: action header plus source body.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOperation {
    pub header: Value,
    pub body: Value,
}

/// Encodes records for bulk loading into one target generation.
#[derive(Debug, Clone)]
pub struct BulkEncoder {
    index: String,
}

impl BulkEncoder {
    pub fn new(index: impl Into<String>) -> Self {
        Self { index: index.into() }
    }

    /// The generation this encoder targets.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Encode one document write.
    pub fn encode(&self, id: &str, fields: Value, doc_type: &str) -> BulkOperation {
        BulkOperation {
            header: json!({
                "index": {
                    "_index": self.index,
                    "_type": doc_type,
                    "_id": id,
                }
            }),
            body: fields,
        }
    }

    /// Concatenate operations into the bulk payload, in caller order: one
    /// JSON object per line, header then body, terminated by a blank line.
    pub fn encode_batch(&self, operations: &[BulkOperation]) -> Result<String, EngineError> {
        if operations.is_empty() {
            return Ok(String::new());
        }
        let mut lines = Vec::with_capacity(operations.len() * 2 + 1);
        for operation in operations {
            lines.push(serde_json::to_string(&operation.header)?);
            lines.push(serde_json::to_string(&operation.body)?);
        }
        lines.push(String::new());
        Ok(lines.join("\n"))
    }
}
