//! Field-mapping derivation.
//!
//! Four derivation passes over the attribute set, then the fixed system
//! fields and one autocomplete field per store. Earlier passes win: a key
//! emitted by passes 1-3 is never overwritten by a later pass.

use std::collections::BTreeMap;

use search_analysis::AnalysisConfig;
use search_types::{AttributeDescriptor, BackendType, StoreView};

use crate::field::{
    attribute_field_type, CompletionOptions, FieldMapping, FieldType, MultiFieldOptions,
    ScalarOptions,
};
use crate::naming::{attribute_field_name, sortable_field_name, suggest_field_name};

/// The derived mapping set, keyed by field name.
pub type Mappings = BTreeMap<String, FieldMapping>;

pub const VISIBILITY_FIELD: &str = "visibility";
pub const STORE_ID_FIELD: &str = "store_id";
pub const IN_STOCK_FIELD: &str = "in_stock";

/// Name of the exact-match sub-field on `multi_field` mappings.
pub const UNTOUCHED_SUB_FIELD: &str = "untouched";

/// Engine-side date format for datetime attributes.
const DATE_FORMAT: &str = "date";

/// Maximum accepted input length on completion fields.
const SUGGEST_MAX_INPUT_LENGTH: u32 = 500;

/// Derive the full field-mapping set for the given attributes and stores.
///
/// Pure function of its inputs; output order and content are stable across
/// repeated builds.
pub fn build_mappings(
    attributes: &[AttributeDescriptor],
    stores: &[StoreView],
    analysis: &AnalysisConfig,
) -> Mappings {
    let mut mappings = Mappings::new();

    // Search fields: varchar/int attributes, one field per store locale.
    // Strings become multi_field with canonical, exact, and per-analyzer
    // sub-fields; other types get a bare scalar.
    for attr in attributes.iter().filter(|attr| {
        matches!(attr.backend, BackendType::Varchar | BackendType::Int) && attr.indexable
    }) {
        for store in stores {
            let key = attribute_field_name(attr, Some(&store.locale));
            let field_type = attribute_field_type(attr);
            if field_type != FieldType::String {
                mappings.insert(key, FieldMapping::scalar(field_type));
                continue;
            }

            let boost = attr.boost();
            let mut fields = BTreeMap::new();
            fields.insert(
                key.clone(),
                FieldMapping::scalar_with(
                    FieldType::String,
                    ScalarOptions::default().with_boost(boost),
                ),
            );
            fields.insert(
                UNTOUCHED_SUB_FIELD.to_string(),
                FieldMapping::scalar_with(FieldType::String, ScalarOptions::default().not_analyzed()),
            );
            for analyzer in analysis.analyzer_names() {
                fields.insert(
                    analyzer.to_string(),
                    FieldMapping::scalar_with(
                        FieldType::String,
                        ScalarOptions::default().with_boost(boost).with_analyzer(analyzer),
                    ),
                );
            }
            mappings.insert(key, FieldMapping::MultiField(MultiFieldOptions { fields }));
        }
    }

    // Free-text attributes: one analyzed string field per store, run through
    // the store's language analyzer.
    for attr in attributes.iter().filter(|attr| attr.backend == BackendType::Text) {
        for store in stores {
            let key = attribute_field_name(attr, Some(&store.locale));
            let analyzer = format!("analyzer_{}", store.language_code());
            mappings.insert(
                key,
                FieldMapping::scalar_with(
                    FieldType::String,
                    ScalarOptions::default()
                        .with_boost(attr.boost())
                        .with_analyzer(analyzer),
                ),
            );
        }
    }

    // Remaining indexable attributes get a locale-less scalar field unless an
    // earlier pass already claimed the key.
    for attr in attributes.iter().filter(|attr| {
        matches!(
            attr.backend,
            BackendType::Static | BackendType::Varchar | BackendType::Decimal | BackendType::Datetime
        ) && attr.indexable
    }) {
        let key = attribute_field_name(attr, None);
        if mappings.contains_key(&key) {
            continue;
        }
        let mut options = ScalarOptions::default().with_boost(attr.boost());
        if attr.backend == BackendType::Datetime {
            options = options.with_format(DATE_FORMAT);
        }
        mappings.insert(key, FieldMapping::scalar_with(attribute_field_type(attr), options));
    }

    // Sort fields: not analyzed, one per store locale.
    for attr in attributes.iter().filter(|attr| attr.sortable) {
        let field_type = match attr.backend {
            BackendType::Decimal => FieldType::Double,
            BackendType::Datetime => FieldType::Date,
            _ => FieldType::String,
        };
        for store in stores {
            let key = sortable_field_name(attr, &store.locale);
            if mappings.contains_key(&key) {
                continue;
            }
            let mut options = ScalarOptions::default().not_analyzed();
            if field_type == FieldType::Date {
                options = options.with_format(DATE_FORMAT);
            }
            mappings.insert(key, FieldMapping::scalar_with(field_type, options));
        }
    }

    mappings.insert(
        VISIBILITY_FIELD.to_string(),
        FieldMapping::scalar(FieldType::Integer),
    );
    mappings.insert(
        STORE_ID_FIELD.to_string(),
        FieldMapping::scalar(FieldType::Integer),
    );
    mappings.insert(
        IN_STOCK_FIELD.to_string(),
        FieldMapping::scalar(FieldType::Boolean),
    );

    for store in stores {
        let analyzer = format!("analyzer_{}", store.language_code());
        mappings.insert(
            suggest_field_name(store),
            FieldMapping::Completion(CompletionOptions {
                payloads: true,
                max_input_length: SUGGEST_MAX_INPUT_LENGTH,
                index_analyzer: analyzer.clone(),
                search_analyzer: analyzer,
                preserve_separators: false,
            }),
        );
    }

    mappings
}
