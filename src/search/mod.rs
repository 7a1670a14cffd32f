//! Incremental search over a remote anime catalog.

pub mod engine;
pub mod provider;

pub use engine::{SearchEngine, SessionSnapshot, DEBOUNCE, MIN_QUERY_LEN, SUGGESTION_LIMIT};
pub use provider::{JikanProvider, ProviderError, SearchProvider};
