//! Catalog attribute descriptors.
//!
//! An [`AttributeDescriptor`] is the resolved, read-only view of one catalog
//! attribute as the metadata store exposes it: backend storage type, value
//! source, frontend input class, and the flags that drive index derivation.

use serde::{Deserialize, Serialize};

/// Backend storage type of a catalog attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    Static,
    Varchar,
    Int,
    Text,
    Decimal,
    Datetime,
}

impl BackendType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Static => "static",
            BackendType::Varchar => "varchar",
            BackendType::Int => "int",
            BackendType::Text => "text",
            BackendType::Decimal => "decimal",
            BackendType::Datetime => "datetime",
        }
    }
}

/// Where an attribute's values come from.
///
/// `Boolean` marks the yes/no source model; `Table` covers option-backed
/// attributes (dropdowns, multiselects).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    None,
    Table,
    Boolean,
}

/// Frontend input class hint attached to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontendClass {
    #[default]
    None,
    ValidateDigits,
}

/// Resolved view of one catalog attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    /// Attribute code, unique within the catalog (e.g. `color`).
    pub code: String,

    /// Backend storage type.
    pub backend: BackendType,

    /// Value source model.
    #[serde(default)]
    pub source: SourceKind,

    /// Frontend input class.
    #[serde(default)]
    pub frontend_class: FrontendClass,

    /// Relative search weight; values <= 0 fall back to 1 at mapping time.
    #[serde(default)]
    pub search_weight: f32,

    /// Whether the attribute participates in the search index.
    #[serde(default = "default_indexable")]
    pub indexable: bool,

    /// Whether a dedicated sort field is derived for the attribute.
    #[serde(default)]
    pub sortable: bool,
}

fn default_indexable() -> bool {
    true
}

impl AttributeDescriptor {
    /// Create a descriptor with the given code and backend type.
    ///
    /// Defaults: no source model, no frontend class, weight 0 (boost falls
    /// back to 1), indexable, not sortable.
    pub fn new(code: impl Into<String>, backend: BackendType) -> Self {
        Self {
            code: code.into(),
            backend,
            source: SourceKind::None,
            frontend_class: FrontendClass::None,
            search_weight: 0.0,
            indexable: true,
            sortable: false,
        }
    }

    /// Set the value source model.
    pub fn with_source(mut self, source: SourceKind) -> Self {
        self.source = source;
        self
    }

    /// Set the frontend input class.
    pub fn with_frontend_class(mut self, frontend_class: FrontendClass) -> Self {
        self.frontend_class = frontend_class;
        self
    }

    /// Set the search weight.
    pub fn with_search_weight(mut self, weight: f32) -> Self {
        self.search_weight = weight;
        self
    }

    /// Set whether the attribute is indexable.
    pub fn with_indexable(mut self, indexable: bool) -> Self {
        self.indexable = indexable;
        self
    }

    /// Mark the attribute as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Boost for this attribute: the configured weight when positive, else 1.
    pub fn boost(&self) -> f32 {
        if self.search_weight > 0.0 {
            self.search_weight
        } else {
            1.0
        }
    }
}
