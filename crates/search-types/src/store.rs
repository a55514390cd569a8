//! Store views.
//!
//! A [`StoreView`] is the resolved view of one storefront: its id, code, and
//! locale. The locale drives field-name suffixes and analyzer selection.

use serde::{Deserialize, Serialize};

/// Resolved view of one storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreView {
    /// Numeric store id.
    pub id: u32,

    /// Store code (e.g. `default`, `uk`).
    pub code: String,

    /// Resolved locale, `language_TERRITORY` form (e.g. `en_GB`).
    pub locale: String,
}

impl StoreView {
    pub fn new(id: u32, code: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            locale: locale.into(),
        }
    }

    /// ISO-639-1 language code: the lowercased part of the locale before `_`.
    pub fn language_code(&self) -> String {
        self.locale
            .split('_')
            .next()
            .unwrap_or(&self.locale)
            .to_lowercase()
    }

    /// Locale rendered as a field-name suffix (`en_GB` -> `en_gb`).
    pub fn locale_key(&self) -> String {
        self.locale.to_lowercase()
    }
}
