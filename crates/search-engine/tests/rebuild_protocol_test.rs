//! End-to-end rebuild protocol tests against an in-memory engine mock.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use search_engine::{
    EngineError, EngineTransport, IndexLifecycleManager, SearchDispatcher, SearchQuery,
    SuggestDispatcher, DEFAULT_DOC_TYPE,
};
use search_types::{AttributeDescriptor, BackendType, EngineConfig, StoreView};

#[derive(Default)]
struct EngineState {
    /// Physical index name -> creation body (or `null` for seeded indices).
    indices: BTreeMap<String, Value>,
    /// Alias name -> physical indices carrying it.
    aliases: BTreeMap<String, BTreeSet<String>>,
    /// Chronological log of state-changing calls.
    ops: Vec<String>,
    bulk_payloads: Vec<String>,
    searches: Vec<(String, Value)>,
    suggests: Vec<(String, Value)>,
    ping_ok: bool,
    fail_create: bool,
}

struct MockTransport {
    state: Mutex<EngineState>,
}

impl MockTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(EngineState {
                ping_ok: true,
                ..Default::default()
            }),
        })
    }

    fn seed_index(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .indices
            .insert(name.to_string(), Value::Null);
    }

    fn seed_alias(&self, alias: &str, index: &str) {
        self.state
            .lock()
            .unwrap()
            .aliases
            .entry(alias.to_string())
            .or_default()
            .insert(index.to_string());
    }

    fn set_ping_ok(&self, ok: bool) {
        self.state.lock().unwrap().ping_ok = ok;
    }

    fn set_fail_create(&self, fail: bool) {
        self.state.lock().unwrap().fail_create = fail;
    }

    fn index_names(&self) -> Vec<String> {
        self.state.lock().unwrap().indices.keys().cloned().collect()
    }

    fn alias_targets(&self, alias: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .aliases
            .get(alias)
            .map(|targets| targets.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn creation_body(&self, index: &str) -> Option<Value> {
        self.state.lock().unwrap().indices.get(index).cloned()
    }

    fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    fn bulk_payloads(&self) -> Vec<String> {
        self.state.lock().unwrap().bulk_payloads.clone()
    }

    fn recorded_searches(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().searches.clone()
    }

    fn recorded_suggests(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().suggests.clone()
    }
}

#[async_trait]
impl EngineTransport for MockTransport {
    async fn ping(&self) -> Result<bool, EngineError> {
        let state = self.state.lock().unwrap();
        if state.ping_ok {
            Ok(true)
        } else {
            Err(EngineError::Transport("connection refused".to_string()))
        }
    }

    async fn index_exists(&self, index: &str) -> Result<bool, EngineError> {
        let state = self.state.lock().unwrap();
        Ok(state.indices.contains_key(index)
            || state
                .aliases
                .get(index)
                .is_some_and(|targets| !targets.is_empty()))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), EngineError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_create {
            return Err(EngineError::Transport(
                "index creation rejected".to_string(),
            ));
        }
        state.ops.push(format!("create:{index}"));
        state.indices.insert(index.to_string(), body.clone());
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("delete:{index}"));
        state.indices.remove(index);
        for targets in state.aliases.values_mut() {
            targets.remove(index);
        }
        Ok(())
    }

    async fn refresh_index(&self, index: &str) -> Result<(), EngineError> {
        self.state.lock().unwrap().ops.push(format!("refresh:{index}"));
        Ok(())
    }

    async fn close_index(&self, index: &str) -> Result<(), EngineError> {
        self.state.lock().unwrap().ops.push(format!("close:{index}"));
        Ok(())
    }

    async fn open_index(&self, index: &str) -> Result<(), EngineError> {
        self.state.lock().unwrap().ops.push(format!("open:{index}"));
        Ok(())
    }

    async fn put_settings(&self, index: &str, _body: &Value) -> Result<(), EngineError> {
        self.state
            .lock()
            .unwrap()
            .ops
            .push(format!("put_settings:{index}"));
        Ok(())
    }

    async fn put_mapping(
        &self,
        index: &str,
        doc_type: &str,
        _body: &Value,
    ) -> Result<(), EngineError> {
        self.state
            .lock()
            .unwrap()
            .ops
            .push(format!("put_mapping:{index}:{doc_type}"));
        Ok(())
    }

    async fn get_mapping(&self, index: &str) -> Result<Vec<String>, EngineError> {
        let state = self.state.lock().unwrap();
        if let Some(targets) = state.aliases.get(index) {
            Ok(targets.iter().cloned().collect())
        } else if state.indices.contains_key(index) {
            Ok(vec![index.to_string()])
        } else {
            Err(EngineError::Transport(format!("no such index: {index}")))
        }
    }

    async fn put_alias(&self, index: &str, alias: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock().unwrap();
        state.ops.push(format!("put_alias:{index}:{alias}"));
        state
            .aliases
            .entry(alias.to_string())
            .or_default()
            .insert(index.to_string());
        Ok(())
    }

    async fn bulk(&self, body: &str) -> Result<Value, EngineError> {
        self.state.lock().unwrap().bulk_payloads.push(body.to_string());
        Ok(json!({ "errors": false }))
    }

    async fn search(&self, index: &str, body: &Value) -> Result<Value, EngineError> {
        self.state
            .lock()
            .unwrap()
            .searches
            .push((index.to_string(), body.clone()));
        Ok(json!({ "hits": { "total": 0, "hits": [] } }))
    }

    async fn suggest(&self, index: &str, body: &Value) -> Result<Value, EngineError> {
        self.state
            .lock()
            .unwrap()
            .suggests
            .push((index.to_string(), body.clone()));
        Ok(json!({ "suggestions": [] }))
    }
}

fn config(alias: &str) -> EngineConfig {
    EngineConfig::new(alias)
}

fn config_with_pattern(alias: &str, pattern: &str) -> EngineConfig {
    let mut config = EngineConfig::new(alias);
    config.indices_pattern = pattern.to_string();
    config
}

fn sample_stores() -> Vec<StoreView> {
    vec![StoreView::new(1, "uk", "en_GB")]
}

fn sample_attributes() -> Vec<AttributeDescriptor> {
    vec![
        AttributeDescriptor::new("color", BackendType::Varchar).with_search_weight(2.0),
        AttributeDescriptor::new("price", BackendType::Decimal).sortable(),
    ]
}

struct MatchAllQuery;

impl SearchQuery for MatchAllQuery {
    fn search_params(&self, index: &str) -> Value {
        json!({ "index": index, "body": { "query": { "match_all": {} } } })
    }
}

#[tokio::test]
async fn test_missing_alias_is_fatal_at_construction() {
    let transport = MockTransport::new();
    let result = IndexLifecycleManager::new(EngineConfig::default(), transport);
    assert!(matches!(result, Err(EngineError::Config(_))));
}

#[tokio::test]
async fn test_full_rebuild_leaves_single_generation() {
    let transport = MockTransport::new();
    transport.seed_index("catalog-20230101-000000");
    transport.seed_alias("catalog", "catalog-20230101-000000");

    let mut manager =
        IndexLifecycleManager::new(config("catalog"), transport.clone()).unwrap();
    assert_eq!(manager.current_index(), "catalog");
    assert!(!manager.has_pending_install());

    let generation = manager
        .prepare_new_generation(&sample_attributes(), &sample_stores())
        .await
        .unwrap();
    assert!(generation.starts_with("catalog-"));
    assert_eq!(manager.current_index(), generation);
    assert!(manager.has_pending_install());
    assert!(transport.index_names().contains(&generation));

    // Bulk loads target the pending generation.
    let encoder = manager.bulk_encoder();
    let operations = vec![
        encoder.encode("1", json!({"sku": "A", "store_id": 1}), DEFAULT_DOC_TYPE),
        encoder.encode("2", json!({"sku": "B", "store_id": 1}), DEFAULT_DOC_TYPE),
    ];
    manager.add_documents(&operations).await.unwrap();
    let payloads = transport.bulk_payloads();
    assert_eq!(payloads.len(), 1);
    assert!(payloads[0].contains(&generation));
    assert_eq!(payloads[0].split('\n').count(), 5);

    manager.install_pending_generation().await.unwrap();
    assert!(!manager.has_pending_install());

    // Exactly one generation remains under the alias, the freshly prepared
    // one; the orphan is gone entirely.
    assert_eq!(transport.alias_targets("catalog"), vec![generation.clone()]);
    assert_eq!(transport.index_names(), vec![generation]);
}

#[tokio::test]
async fn test_creation_body_carries_settings_and_mappings() {
    let transport = MockTransport::new();
    let mut manager = IndexLifecycleManager::new(
        config_with_pattern("catalog", "fixed"),
        transport.clone(),
    )
    .unwrap();

    let generation = manager
        .prepare_new_generation(&sample_attributes(), &sample_stores())
        .await
        .unwrap();
    assert_eq!(generation, "catalog-fixed");

    let body = transport.creation_body(&generation).unwrap();
    assert_eq!(body["settings"]["number_of_shards"], json!(1));
    assert_eq!(body["settings"]["number_of_replicas"], json!(0));
    assert!(body["settings"]["analysis"]["analyzer"]["analyzer_en"].is_object());

    let properties = &body["mappings"]["product"]["properties"];
    assert_eq!(properties["color_en_gb"]["type"], "multi_field");
    assert_eq!(
        properties["sort_by_price_en_gb"],
        json!({"type": "double", "index": "not_analyzed"})
    );
    assert_eq!(properties["store_id"], json!({"type": "integer"}));
    assert_eq!(properties["suggest_en_gb"]["type"], "completion");
}

#[tokio::test]
async fn test_existing_generation_updated_in_place() {
    let transport = MockTransport::new();
    transport.seed_index("catalog-fixed");

    let mut manager = IndexLifecycleManager::new(
        config_with_pattern("catalog", "fixed"),
        transport.clone(),
    )
    .unwrap();
    manager
        .prepare_new_generation(&sample_attributes(), &sample_stores())
        .await
        .unwrap();

    assert_eq!(
        transport.ops(),
        vec![
            "close:catalog-fixed",
            "put_settings:catalog-fixed",
            "put_mapping:catalog-fixed:product",
            "open:catalog-fixed",
        ]
    );
}

#[tokio::test]
async fn test_install_without_prepare_is_idempotent_noop() {
    let transport = MockTransport::new();
    transport.seed_index("catalog-20230101-000000");
    transport.seed_alias("catalog", "catalog-20230101-000000");

    let mut manager =
        IndexLifecycleManager::new(config("catalog"), transport.clone()).unwrap();
    manager.install_pending_generation().await.unwrap();
    manager.install_pending_generation().await.unwrap();

    assert!(transport.ops().is_empty());
    assert_eq!(
        transport.alias_targets("catalog"),
        vec!["catalog-20230101-000000".to_string()]
    );
}

#[tokio::test]
async fn test_second_rebuild_deletes_previous_generation() {
    let transport = MockTransport::new();

    let mut first = IndexLifecycleManager::new(
        config_with_pattern("catalog", "run1"),
        transport.clone(),
    )
    .unwrap();
    first
        .prepare_new_generation(&sample_attributes(), &sample_stores())
        .await
        .unwrap();
    first.install_pending_generation().await.unwrap();
    assert_eq!(
        transport.alias_targets("catalog"),
        vec!["catalog-run1".to_string()]
    );

    let mut second = IndexLifecycleManager::new(
        config_with_pattern("catalog", "run2"),
        transport.clone(),
    )
    .unwrap();
    second
        .prepare_new_generation(&sample_attributes(), &sample_stores())
        .await
        .unwrap();
    second.install_pending_generation().await.unwrap();

    assert_eq!(
        transport.alias_targets("catalog"),
        vec!["catalog-run2".to_string()]
    );
    assert_eq!(transport.index_names(), vec!["catalog-run2".to_string()]);
}

#[tokio::test]
async fn test_prepare_failure_propagates() {
    let transport = MockTransport::new();
    transport.set_fail_create(true);

    let mut manager =
        IndexLifecycleManager::new(config("catalog"), transport.clone()).unwrap();
    let result = manager
        .prepare_new_generation(&sample_attributes(), &sample_stores())
        .await;
    assert!(matches!(result, Err(EngineError::Transport(_))));
}

#[tokio::test]
async fn test_status_reports_probe_failure_as_false() {
    let transport = MockTransport::new();
    let manager = IndexLifecycleManager::new(config("catalog"), transport.clone()).unwrap();
    assert!(manager.status().await);

    transport.set_ping_ok(false);
    assert!(!manager.status().await);
}

#[tokio::test]
async fn test_delete_and_refresh_are_existence_gated() {
    let transport = MockTransport::new();
    let manager = IndexLifecycleManager::new(config("catalog"), transport.clone()).unwrap();

    // Nothing exists: both are no-ops.
    manager.delete_index().await.unwrap();
    manager.refresh_index().await.unwrap();
    assert!(transport.ops().is_empty());

    transport.seed_index("catalog");
    manager.refresh_index().await.unwrap();
    manager.delete_index().await.unwrap();
    assert_eq!(transport.ops(), vec!["refresh:catalog", "delete:catalog"]);
}

#[tokio::test]
async fn test_search_against_missing_target_returns_empty() {
    let transport = MockTransport::new();
    let dispatcher = SearchDispatcher::new(transport.clone(), "catalog");

    let response = dispatcher.search(&MatchAllQuery).await.unwrap();
    assert_eq!(response, json!({}));
    assert!(transport.recorded_searches().is_empty());
}

#[tokio::test]
async fn test_search_hands_active_index_to_query() {
    let transport = MockTransport::new();
    transport.seed_index("catalog-run1");
    transport.seed_alias("catalog", "catalog-run1");

    let dispatcher = SearchDispatcher::new(transport.clone(), "catalog");
    let response = dispatcher.search(&MatchAllQuery).await.unwrap();
    assert_eq!(response["hits"]["total"], 0);

    let searches = transport.recorded_searches();
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].0, "catalog");
    // The query object was told the active index name.
    assert_eq!(searches[0].1["index"], "catalog");
}

#[tokio::test]
async fn test_autocomplete_builds_fuzzy_completion_request() {
    let transport = MockTransport::new();
    transport.seed_index("catalog-run1");
    transport.seed_alias("catalog", "catalog-run1");

    let dispatcher = SuggestDispatcher::new(transport.clone(), "catalog");
    let store = StoreView::new(1, "uk", "en_GB");
    dispatcher.autocomplete("shrt", &store).await.unwrap();

    let suggests = transport.recorded_suggests();
    assert_eq!(suggests.len(), 1);
    let body = &suggests[0].1;
    assert_eq!(body["suggestions"]["text"], "shrt");
    assert_eq!(body["suggestions"]["completion"]["field"], "suggest_en_gb");
    assert_eq!(body["suggestions"]["completion"]["fuzzy"]["fuzziness"], 1);
    assert_eq!(
        body["suggestions"]["completion"]["fuzzy"]["unicode_aware"],
        true
    );
}

#[tokio::test]
async fn test_autocomplete_against_missing_target_returns_empty() {
    let transport = MockTransport::new();
    let dispatcher = SuggestDispatcher::new(transport.clone(), "catalog");
    let store = StoreView::new(1, "uk", "en_GB");

    let response = dispatcher.autocomplete("shrt", &store).await.unwrap();
    assert_eq!(response, json!({}));
    assert!(transport.recorded_suggests().is_empty());
}
