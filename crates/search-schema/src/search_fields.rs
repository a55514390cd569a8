//! Searchable-field enumeration.
//!
//! Given a derived mapping set and the kind of value being searched for,
//! lists the fields a query should target. Sort fields, completion fields,
//! edge n-gram sub-fields, and date fields are never search targets; numeric
//! and boolean fields are targeted only by queries of the matching kind.

use crate::field::{FieldMapping, FieldType};
use crate::mappings::Mappings;
use crate::naming::SORT_PREFIX;

/// Synthetic field holding option labels, appended when option search is on.
pub const OPTIONS_FIELD: &str = "_options";

/// The value a query searches for, used to pick type-compatible fields.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Text(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

impl QueryValue {
    fn accepts(&self, field_type: FieldType) -> bool {
        match field_type {
            FieldType::Date => false,
            FieldType::Boolean => matches!(self, QueryValue::Boolean(_)),
            FieldType::Integer => matches!(self, QueryValue::Integer(_)),
            FieldType::Double => matches!(self, QueryValue::Float(_)),
            FieldType::String => true,
        }
    }
}

/// Fields a query for `query` should target.
///
/// With `only_fuzzy` set, `multi_field` entries contribute just their bare
/// key (the canonical analyzed sub-field) instead of every sub-field.
pub fn search_fields(
    mappings: &Mappings,
    only_fuzzy: bool,
    query: &QueryValue,
    search_on_options: bool,
) -> Vec<String> {
    let mut fields = Vec::new();

    for (key, mapping) in mappings {
        if mapping.is_completion() {
            continue;
        }

        // The governing type: the scalar type, or for multi_field the type
        // of the canonical sub-field.
        let governing = mapping.field_type().or_else(|| {
            mapping
                .sub_fields()
                .and_then(|subs| subs.get(key))
                .and_then(FieldMapping::field_type)
        });
        if let Some(field_type) = governing {
            if !query.accepts(field_type) {
                continue;
            }
        }

        match mapping.sub_fields() {
            Some(subs) if !only_fuzzy => {
                for name in subs.keys() {
                    if !name.starts_with("edge_ngram") {
                        fields.push(format!("{key}.{name}"));
                    }
                }
            }
            _ => {
                if !key.starts_with(SORT_PREFIX) {
                    fields.push(key.clone());
                }
            }
        }
    }

    if search_on_options {
        fields.push(OPTIONS_FIELD.to_string());
    }

    fields
}
