//! Analyzer and filter definitions.
//!
//! The types here serialize exactly to the engine's `analysis` settings
//! block. Maps are `BTreeMap` so the derived configuration is stable across
//! builds with identical inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use search_types::StoreView;

use crate::language::snowball_language;

/// ICU folding filter name, prepended to every chain when enabled.
pub const ICU_FOLDING_FILTER: &str = "icu_folding";

/// A named analyzer: tokenizer plus an ordered filter chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerDefinition {
    /// `custom` for language analyzers; base analyzers carry no type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub tokenizer: String,

    pub filter: Vec<String>,
}

impl AnalyzerDefinition {
    /// Base analyzer on the standard tokenizer.
    fn standard(filter: &[&str]) -> Self {
        Self {
            kind: None,
            tokenizer: "standard".to_string(),
            filter: filter.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Custom language analyzer on the standard tokenizer.
    fn custom(filter: &[&str]) -> Self {
        Self {
            kind: Some("custom".to_string()),
            ..Self::standard(filter)
        }
    }
}

/// A named token filter definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilterDefinition {
    Shingle {
        max_shingle_size: u32,
        output_unigrams: bool,
    },
    PatternReplace {
        pattern: String,
        replacement: String,
    },
    #[serde(rename = "edgeNGram")]
    EdgeNgram {
        min_gram: u32,
        max_gram: u32,
        side: String,
    },
    Length {
        min: u32,
    },
    Snowball {
        language: String,
    },
}

/// The full `analysis` settings block: analyzers and filters by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub analyzer: BTreeMap<String, AnalyzerDefinition>,
    pub filter: BTreeMap<String, FilterDefinition>,
}

impl AnalysisConfig {
    /// Names of every defined analyzer, in stable order.
    pub fn analyzer_names(&self) -> impl Iterator<Item = &str> {
        self.analyzer.keys().map(String::as_str)
    }
}

/// Derive the analysis configuration for the given stores.
///
/// Base analyzers and filters are always present. Each distinct store
/// language whose snowball stemmer the engine ships gets an
/// `analyzer_<lang>` / `snowball_<lang>` pair; other languages silently use
/// the base analyzers only. With `icu_folding` enabled, the ICU folding
/// filter is inserted at position 0 of every analyzer's chain.
pub fn build_analysis(stores: &[StoreView], icu_folding: bool) -> AnalysisConfig {
    let mut analyzer = BTreeMap::new();
    let mut filter = BTreeMap::new();

    analyzer.insert(
        "whitespace".to_string(),
        AnalyzerDefinition::standard(&["lowercase"]),
    );
    analyzer.insert(
        "edge_ngram_front".to_string(),
        AnalyzerDefinition::standard(&["length", "edge_ngram_front", "lowercase"]),
    );
    analyzer.insert(
        "edge_ngram_back".to_string(),
        AnalyzerDefinition::standard(&["length", "edge_ngram_back", "lowercase"]),
    );
    analyzer.insert(
        "shingle".to_string(),
        AnalyzerDefinition::standard(&["shingle", "length", "lowercase"]),
    );
    analyzer.insert(
        "shingle_strip_ws".to_string(),
        AnalyzerDefinition::standard(&["shingle", "strip_whitespaces", "length", "lowercase"]),
    );
    analyzer.insert(
        "shingle_strip_apos_and_ws".to_string(),
        AnalyzerDefinition::standard(&[
            "shingle",
            "strip_apostrophes",
            "strip_whitespaces",
            "length",
            "lowercase",
        ]),
    );

    filter.insert(
        "shingle".to_string(),
        FilterDefinition::Shingle {
            max_shingle_size: 20,
            output_unigrams: true,
        },
    );
    filter.insert(
        "strip_whitespaces".to_string(),
        FilterDefinition::PatternReplace {
            pattern: "\\s".to_string(),
            replacement: String::new(),
        },
    );
    filter.insert(
        "strip_apostrophes".to_string(),
        FilterDefinition::PatternReplace {
            pattern: "'".to_string(),
            replacement: String::new(),
        },
    );
    filter.insert(
        "edge_ngram_front".to_string(),
        FilterDefinition::EdgeNgram {
            min_gram: 3,
            max_gram: 10,
            side: "front".to_string(),
        },
    );
    filter.insert(
        "edge_ngram_back".to_string(),
        FilterDefinition::EdgeNgram {
            min_gram: 3,
            max_gram: 10,
            side: "back".to_string(),
        },
    );
    filter.insert("length".to_string(), FilterDefinition::Length { min: 2 });

    for store in stores {
        let code = store.language_code();
        let analyzer_name = format!("analyzer_{code}");
        if analyzer.contains_key(&analyzer_name) {
            continue;
        }
        // Stemmer not shipped by the engine: the store keeps the base
        // analyzers only.
        let Some(language) = snowball_language(&code) else {
            continue;
        };
        let snowball_name = format!("snowball_{code}");
        analyzer.insert(
            analyzer_name,
            AnalyzerDefinition::custom(&["length", "lowercase", snowball_name.as_str()]),
        );
        filter.insert(
            snowball_name,
            FilterDefinition::Snowball {
                language: language.to_string(),
            },
        );
    }

    if icu_folding {
        for definition in analyzer.values_mut() {
            definition.filter.insert(0, ICU_FOLDING_FILTER.to_string());
        }
    }

    AnalysisConfig { analyzer, filter }
}
