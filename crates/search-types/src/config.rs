//! Engine configuration.
//!
//! Layered loading: built-in defaults -> optional TOML file ->
//! `CATALOG_SEARCH_*` environment variables. The alias is mandatory; a
//! missing or empty alias aborts construction.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default generation-name pattern; tokens expand to UTC date/time parts.
pub const DEFAULT_INDICES_PATTERN: &str = "{{YYYYMMDD}}-{{HHmmss}}";

/// Configuration for the search engine subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine endpoints, host:port form.
    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,

    /// Logical index name clients query against. Required.
    #[serde(default)]
    pub alias: String,

    /// Pattern appended to the alias to name a generation.
    #[serde(default = "default_indices_pattern")]
    pub indices_pattern: String,

    /// Primary shard count for freshly created generations.
    #[serde(default = "default_number_of_shards")]
    pub number_of_shards: u32,

    /// Replica count applied with the index settings.
    #[serde(default)]
    pub number_of_replicas: u32,

    /// Prepend the ICU folding filter to every analyzer.
    #[serde(default)]
    pub enable_icu_folding: bool,

    /// Expose the synthetic `_options` field to text queries.
    #[serde(default)]
    pub search_on_options: bool,
}

fn default_hosts() -> Vec<String> {
    vec!["localhost:9200".to_string()]
}

fn default_indices_pattern() -> String {
    DEFAULT_INDICES_PATTERN.to_string()
}

fn default_number_of_shards() -> u32 {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hosts: default_hosts(),
            alias: String::new(),
            indices_pattern: default_indices_pattern(),
            number_of_shards: default_number_of_shards(),
            number_of_replicas: 0,
            enable_icu_folding: false,
            search_on_options: false,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with the given alias and defaults elsewhere.
    pub fn new(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            ..Default::default()
        }
    }

    /// Load configuration with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (optional, TOML)
    /// 3. Environment variables (`CATALOG_SEARCH_*`)
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("indices_pattern", default_indices_pattern())?
            .set_default("number_of_shards", default_number_of_shards() as i64)?;

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CATALOG_SEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate the configuration. A missing alias is fatal.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alias.trim().is_empty() {
            return Err(ConfigError::MissingAlias);
        }
        if self.number_of_shards == 0 {
            return Err(ConfigError::Invalid(
                "number_of_shards must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
