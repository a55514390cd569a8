//! Index generation lifecycle.
//!
//! Drives the zero-downtime rebuild protocol: allocate a timestamped
//! generation, apply the derived schema to it, and after the caller has
//! bulk-loaded the records, swap the alias over and delete orphaned
//! generations.
//!
//! The caller sequences the protocol steps; the manager holds no lock, so
//! two overlapping rebuilds can race on the alias and the loser's
//! generation may survive as the target. A failed prepare likewise leaves
//! whatever the engine partially applied in place for operator cleanup.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, error, info};

use search_analysis::{build_analysis, AnalysisConfig};
use search_schema::build_mappings;
use search_types::{AttributeDescriptor, EngineConfig, StoreView};

use crate::bulk::{BulkEncoder, BulkOperation, DEFAULT_DOC_TYPE};
use crate::error::EngineError;
use crate::generation::expand_pattern;
use crate::transport::EngineTransport;

/// Orchestrates index generations behind a stable alias.
pub struct IndexLifecycleManager {
    transport: Arc<dyn EngineTransport>,
    config: EngineConfig,
    /// The index operations currently target: the alias until a rebuild is
    /// prepared, then the pending generation.
    current_index: String,
    pending_install: bool,
}

impl IndexLifecycleManager {
    /// Create a manager. Fails when the configuration carries no alias.
    pub fn new(
        config: EngineConfig,
        transport: Arc<dyn EngineTransport>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let current_index = config.alias.clone();
        Ok(Self {
            transport,
            config,
            current_index,
            pending_install: false,
        })
    }

    /// The stable alias clients query against.
    pub fn alias(&self) -> &str {
        &self.config.alias
    }

    /// The index operations currently target.
    pub fn current_index(&self) -> &str {
        &self.current_index
    }

    /// Whether a prepared generation awaits installation.
    pub fn has_pending_install(&self) -> bool {
        self.pending_install
    }

    /// Encoder producing bulk operations for the current target.
    pub fn bulk_encoder(&self) -> BulkEncoder {
        BulkEncoder::new(self.current_index.clone())
    }

    /// Liveness of the engine. Connectivity failures report as `false`.
    pub async fn status(&self) -> bool {
        self.transport.ping().await.unwrap_or(false)
    }

    /// Allocate a new generation and apply the derived schema to it.
    ///
    /// The generation is named `{alias}-{expanded pattern}` from the
    /// configured pattern and the current UTC time. An existing index of
    /// that name is updated in place (close, settings, mapping, reopen);
    /// otherwise a fresh index is created with shard/replica counts and the
    /// full mapping. Returns the generation name.
    pub async fn prepare_new_generation(
        &mut self,
        attributes: &[AttributeDescriptor],
        stores: &[StoreView],
    ) -> Result<String, EngineError> {
        let suffix = expand_pattern(&self.config.indices_pattern, Utc::now());
        let generation = format!("{}-{}", self.config.alias, suffix);
        info!(generation = %generation, "Preparing new index generation");

        self.current_index = generation.clone();
        self.pending_install = true;

        if let Err(e) = self.apply_schema(&generation, attributes, stores).await {
            error!(generation = %generation, error = %e, "Failed to prepare index generation");
            return Err(e);
        }

        Ok(generation)
    }

    async fn apply_schema(
        &self,
        generation: &str,
        attributes: &[AttributeDescriptor],
        stores: &[StoreView],
    ) -> Result<(), EngineError> {
        let analysis = build_analysis(stores, self.config.enable_icu_folding);
        let mappings = build_mappings(attributes, stores, &analysis);
        let properties = serde_json::to_value(&mappings)?;
        let settings = self.index_settings(&analysis)?;

        if self.transport.index_exists(generation).await? {
            debug!(generation = %generation, "Updating existing generation in place");
            self.transport.close_index(generation).await?;
            self.transport
                .put_settings(generation, &json!({ "settings": settings }))
                .await?;
            self.transport
                .put_mapping(
                    generation,
                    DEFAULT_DOC_TYPE,
                    &mapping_body(DEFAULT_DOC_TYPE, properties),
                )
                .await?;
            self.transport.open_index(generation).await?;
        } else {
            debug!(generation = %generation, "Creating generation");
            let mut settings = settings;
            settings["number_of_shards"] = json!(self.config.number_of_shards);
            let body = json!({
                "settings": settings,
                "mappings": mapping_body(DEFAULT_DOC_TYPE, properties),
            });
            self.transport.create_index(generation, &body).await?;
        }

        Ok(())
    }

    fn index_settings(&self, analysis: &AnalysisConfig) -> Result<Value, EngineError> {
        Ok(json!({
            "number_of_replicas": self.config.number_of_replicas,
            "analysis": serde_json::to_value(analysis)?,
        }))
    }

    /// Repoint the alias to the pending generation and delete every other
    /// generation bound to it. No-op when nothing is pending.
    pub async fn install_pending_generation(&mut self) -> Result<(), EngineError> {
        if !self.pending_install {
            debug!("No pending generation, install skipped");
            return Ok(());
        }

        let alias = self.config.alias.clone();
        info!(generation = %self.current_index, alias = %alias, "Installing generation");
        self.transport.put_alias(&self.current_index, &alias).await?;

        let generations = self.transport.get_mapping(&alias).await?;
        for index in generations {
            if index != self.current_index {
                info!(index = %index, "Deleting orphaned generation");
                self.transport.delete_index(&index).await?;
            }
        }

        self.pending_install = false;
        Ok(())
    }

    /// Bulk-load encoded operations into the current target.
    ///
    /// The engine's per-item results are not inspected; a successful
    /// transport call is treated as full success.
    pub async fn add_documents(&self, operations: &[BulkOperation]) -> Result<(), EngineError> {
        if operations.is_empty() {
            return Ok(());
        }
        let payload = self.bulk_encoder().encode_batch(operations)?;
        self.transport.bulk(&payload).await?;
        debug!(operations = operations.len(), "Bulk load dispatched");
        Ok(())
    }

    /// Delete the current target if it exists.
    pub async fn delete_index(&self) -> Result<(), EngineError> {
        if self.transport.index_exists(&self.current_index).await? {
            self.transport.delete_index(&self.current_index).await?;
        }
        Ok(())
    }

    /// Refresh the current target if it exists.
    pub async fn refresh_index(&self) -> Result<(), EngineError> {
        if self.transport.index_exists(&self.current_index).await? {
            self.transport.refresh_index(&self.current_index).await?;
        }
        Ok(())
    }
}

fn mapping_body(doc_type: &str, properties: Value) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(doc_type.to_string(), json!({ "properties": properties }));
    Value::Object(body)
}
