//! # search-analysis
//!
//! Derives the analyzer/filter graph for the catalog search index: a fixed
//! set of base analyzers (edge n-grams for prefix/suffix matching, shingle
//! variants for phrase matching), one stemming analyzer per store language
//! where the engine ships a snowball stemmer, and optional ICU folding
//! prepended to every chain.

pub mod analysis;
pub mod language;

pub use analysis::{build_analysis, AnalysisConfig, AnalyzerDefinition, FilterDefinition};
pub use language::{language_name, snowball_language, SNOWBALL_LANGUAGES};
