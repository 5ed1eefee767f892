//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod fetch;
pub mod key_action;
pub mod search;

// Re-export for convenience
pub use error::{AppError, SearchError};
pub use fetch::{FetchKind, FetchOutcome, FetchRequest, RequestId};
pub use key_action::KeyAction;
pub use search::{InvalidPageSize, PageSize, SearchPage, SearchQuery, SearchResult, SearchTerm};
