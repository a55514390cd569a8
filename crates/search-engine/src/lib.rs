//! # search-engine
//!
//! Index lifecycle orchestration against an external document-search
//! engine: zero-downtime rebuilds via versioned generations and an alias
//! swap, bulk wire encoding, and query/autocomplete dispatch against the
//! active generation.
//!
//! The wire client is an external collaborator behind the
//! [`EngineTransport`] trait; implementations are injected, which keeps the
//! lifecycle logic deterministic and testable with an in-memory mock.
//!
//! ## Rebuild protocol
//!
//! ```text
//! Active --prepare_new_generation--> Building --bulk loads--> Installing
//!   (alias on old generation)                     (install_pending_generation)
//!                                                       |
//!                      alias repointed, orphans deleted v
//!                                                    Active
//! ```
//!
//! The three steps are sequenced by the caller; there is no fencing against
//! two overlapping rebuilds.

pub mod bulk;
pub mod error;
pub mod generation;
pub mod lifecycle;
pub mod search;
pub mod suggest;
pub mod transport;

pub use bulk::{BulkEncoder, BulkOperation, DEFAULT_DOC_TYPE};
pub use error::EngineError;
pub use generation::expand_pattern;
pub use lifecycle::IndexLifecycleManager;
pub use search::{SearchDispatcher, SearchQuery};
pub use suggest::SuggestDispatcher;
pub use transport::EngineTransport;
