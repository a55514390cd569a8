//! # search-schema
//!
//! Derives the full field-mapping set for the catalog search index from
//! attribute metadata and per-store locale configuration. The derivation is
//! a pure function of its inputs: identical attributes, stores, and analysis
//! configuration always produce byte-identical mappings, so callers may
//! memoize the result keyed on configuration version.

pub mod field;
pub mod mappings;
pub mod naming;
pub mod search_fields;

pub use field::{
    attribute_field_type, CompletionOptions, FieldMapping, FieldType, IndexMode,
    MultiFieldOptions, ScalarOptions,
};
pub use mappings::{
    build_mappings, Mappings, IN_STOCK_FIELD, STORE_ID_FIELD, UNTOUCHED_SUB_FIELD,
    VISIBILITY_FIELD,
};
pub use naming::{attribute_field_name, sortable_field_name, suggest_field_name, SORT_PREFIX};
pub use search_fields::{search_fields, QueryValue, OPTIONS_FIELD};
