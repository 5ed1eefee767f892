//! Search service access (impure edge).
//!
//! - [`SearchClient`]: one page per call, typed success or failure
//! - [`GiphyClient`]: the HTTP implementation
//! - [`Fetcher`]: runs a client on a worker thread for the TUI event loop

use crate::model::{SearchError, SearchPage, SearchQuery};

pub mod fetcher;
pub mod giphy;

pub use fetcher::Fetcher;
pub use giphy::{decode_page, GiphyClient, DEFAULT_ENDPOINT};

/// Fetches one page of search results.
///
/// Implementations issue exactly one outbound request per call and never
/// retry, cache or deduplicate.
pub trait SearchClient: Send {
    /// Fetch the page described by `query`.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` for transport failures, non-success HTTP
    /// statuses and undecodable bodies.
    fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, SearchError>;
}

impl<C: SearchClient + ?Sized> SearchClient for Box<C> {
    fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
        (**self).fetch_page(query)
    }
}
