//! # search-types
//!
//! Shared value types for the catalog search subsystem.
//!
//! The attribute metadata store and the store/locale registry are external
//! collaborators; they hand their state to this subsystem as resolved
//! [`AttributeDescriptor`] and [`StoreView`] values, so the schema builders
//! stay pure functions of their inputs.

pub mod attribute;
pub mod config;
pub mod error;
pub mod store;

pub use attribute::{AttributeDescriptor, BackendType, FrontendClass, SourceKind};
pub use config::EngineConfig;
pub use error::ConfigError;
pub use store::StoreView;
