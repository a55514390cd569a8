//! Deterministic field naming.
//!
//! Field names are pure functions of (attribute code, locale, role), so two
//! schema builds over the same inputs key the same mappings and no two
//! distinct attribute/role pairs collide within a store.

use search_types::{AttributeDescriptor, StoreView};

/// Prefix of sort-role field names.
pub const SORT_PREFIX: &str = "sort_by_";

/// Prefix of autocomplete field names.
const SUGGEST_PREFIX: &str = "suggest_";

/// Field name for an attribute, optionally scoped to a locale.
///
/// `color` with locale `en_GB` yields `color_en_gb`; without a locale the
/// bare attribute code is used.
pub fn attribute_field_name(attr: &AttributeDescriptor, locale: Option<&str>) -> String {
    match locale {
        Some(locale) => format!("{}_{}", attr.code, locale.to_lowercase()),
        None => attr.code.clone(),
    }
}

/// Field name for the sort role of an attribute in a locale.
///
/// `price` with locale `en_GB` yields `sort_by_price_en_gb`.
pub fn sortable_field_name(attr: &AttributeDescriptor, locale: &str) -> String {
    format!("{}{}_{}", SORT_PREFIX, attr.code, locale.to_lowercase())
}

/// Autocomplete field name for a store (`suggest_en_gb`).
pub fn suggest_field_name(store: &StoreView) -> String {
    format!("{}{}", SUGGEST_PREFIX, store.locale_key())
}
