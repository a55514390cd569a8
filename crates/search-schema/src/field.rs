//! Field mapping model.
//!
//! [`FieldMapping`] serializes exactly to the engine's mapping JSON: the
//! semantic type is the `type` tag, type-specific parameters sit alongside
//! it. Sub-fields of a `multi_field` mapping are themselves scalar
//! [`FieldMapping`]s.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use search_types::{AttributeDescriptor, BackendType, SourceKind};

/// Semantic scalar type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Double,
    Boolean,
    Date,
    Integer,
}

/// Index mode for fields that bypass analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    NotAnalyzed,
}

/// Parameters of a scalar field mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScalarOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexMode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<String>,
}

impl ScalarOptions {
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn not_analyzed(mut self) -> Self {
        self.index = Some(IndexMode::NotAnalyzed);
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }
}

/// Parameters of a `multi_field` mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MultiFieldOptions {
    pub fields: BTreeMap<String, FieldMapping>,
}

/// Parameters of a `completion` (autocomplete) mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    pub payloads: bool,
    pub max_input_length: u32,
    pub index_analyzer: String,
    pub search_analyzer: String,
    pub preserve_separators: bool,
}

/// One field mapping, keyed by its deterministic field name in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldMapping {
    String(ScalarOptions),
    Double(ScalarOptions),
    Boolean(ScalarOptions),
    Date(ScalarOptions),
    Integer(ScalarOptions),
    MultiField(MultiFieldOptions),
    Completion(CompletionOptions),
}

impl FieldMapping {
    /// Plain scalar mapping with no extra parameters.
    pub fn scalar(field_type: FieldType) -> Self {
        Self::scalar_with(field_type, ScalarOptions::default())
    }

    /// Scalar mapping with the given parameters.
    pub fn scalar_with(field_type: FieldType, options: ScalarOptions) -> Self {
        match field_type {
            FieldType::String => FieldMapping::String(options),
            FieldType::Double => FieldMapping::Double(options),
            FieldType::Boolean => FieldMapping::Boolean(options),
            FieldType::Date => FieldMapping::Date(options),
            FieldType::Integer => FieldMapping::Integer(options),
        }
    }

    /// The scalar type, when this is a scalar mapping.
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldMapping::String(_) => Some(FieldType::String),
            FieldMapping::Double(_) => Some(FieldType::Double),
            FieldMapping::Boolean(_) => Some(FieldType::Boolean),
            FieldMapping::Date(_) => Some(FieldType::Date),
            FieldMapping::Integer(_) => Some(FieldType::Integer),
            FieldMapping::MultiField(_) | FieldMapping::Completion(_) => None,
        }
    }

    /// The sub-field map, when this is a `multi_field` mapping.
    pub fn sub_fields(&self) -> Option<&BTreeMap<String, FieldMapping>> {
        match self {
            FieldMapping::MultiField(options) => Some(&options.fields),
            _ => None,
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, FieldMapping::Completion(_))
    }
}

/// Semantic type for an attribute.
///
/// Decimal backends index as doubles, boolean-sourced attributes as
/// booleans, datetime backends as dates; everything else (including
/// option-backed and digit-validated attributes) indexes as a string.
pub fn attribute_field_type(attr: &AttributeDescriptor) -> FieldType {
    if attr.backend == BackendType::Decimal {
        FieldType::Double
    } else if attr.source == SourceKind::Boolean {
        FieldType::Boolean
    } else if attr.backend == BackendType::Datetime {
        FieldType::Date
    } else {
        FieldType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_types::FrontendClass;
    use serde_json::json;

    #[test]
    fn test_attribute_field_type_rules() {
        let decimal = AttributeDescriptor::new("price", BackendType::Decimal);
        assert_eq!(attribute_field_type(&decimal), FieldType::Double);

        let boolean = AttributeDescriptor::new("is_new", BackendType::Int)
            .with_source(SourceKind::Boolean);
        assert_eq!(attribute_field_type(&boolean), FieldType::Boolean);

        let datetime = AttributeDescriptor::new("news_from", BackendType::Datetime);
        assert_eq!(attribute_field_type(&datetime), FieldType::Date);

        let varchar = AttributeDescriptor::new("color", BackendType::Varchar);
        assert_eq!(attribute_field_type(&varchar), FieldType::String);

        // Option-backed and digit-validated attributes stay strings.
        let select = AttributeDescriptor::new("size", BackendType::Int)
            .with_source(SourceKind::Table);
        assert_eq!(attribute_field_type(&select), FieldType::String);

        let digits = AttributeDescriptor::new("ean", BackendType::Varchar)
            .with_frontend_class(FrontendClass::ValidateDigits);
        assert_eq!(attribute_field_type(&digits), FieldType::String);

        // Decimal wins over a boolean source model.
        let both = AttributeDescriptor::new("odd", BackendType::Decimal)
            .with_source(SourceKind::Boolean);
        assert_eq!(attribute_field_type(&both), FieldType::Double);
    }

    #[test]
    fn test_scalar_wire_format() {
        let mapping = FieldMapping::scalar_with(
            FieldType::String,
            ScalarOptions::default().with_boost(2.0),
        );
        assert_eq!(
            serde_json::to_value(&mapping).unwrap(),
            json!({"type": "string", "boost": 2.0})
        );

        let sort = FieldMapping::scalar_with(FieldType::Double, ScalarOptions::default().not_analyzed());
        assert_eq!(
            serde_json::to_value(&sort).unwrap(),
            json!({"type": "double", "index": "not_analyzed"})
        );
    }

    #[test]
    fn test_date_with_format_wire_format() {
        let mapping = FieldMapping::scalar_with(
            FieldType::Date,
            ScalarOptions::default().with_boost(1.0).with_format("date"),
        );
        assert_eq!(
            serde_json::to_value(&mapping).unwrap(),
            json!({"type": "date", "boost": 1.0, "format": "date"})
        );
    }

    #[test]
    fn test_multi_field_wire_format() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "name_en_gb".to_string(),
            FieldMapping::scalar_with(FieldType::String, ScalarOptions::default().with_boost(2.0)),
        );
        fields.insert(
            "untouched".to_string(),
            FieldMapping::scalar_with(FieldType::String, ScalarOptions::default().not_analyzed()),
        );
        let mapping = FieldMapping::MultiField(MultiFieldOptions { fields });
        assert_eq!(
            serde_json::to_value(&mapping).unwrap(),
            json!({
                "type": "multi_field",
                "fields": {
                    "name_en_gb": {"type": "string", "boost": 2.0},
                    "untouched": {"type": "string", "index": "not_analyzed"},
                }
            })
        );
    }

    #[test]
    fn test_completion_wire_format() {
        let mapping = FieldMapping::Completion(CompletionOptions {
            payloads: true,
            max_input_length: 500,
            index_analyzer: "analyzer_en".to_string(),
            search_analyzer: "analyzer_en".to_string(),
            preserve_separators: false,
        });
        assert_eq!(
            serde_json::to_value(&mapping).unwrap(),
            json!({
                "type": "completion",
                "payloads": true,
                "max_input_length": 500,
                "index_analyzer": "analyzer_en",
                "search_analyzer": "analyzer_en",
                "preserve_separators": false,
            })
        );
    }
}
