//! Shared fixtures for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper

use gifscroll::client::SearchClient;
use gifscroll::model::{SearchError, SearchPage, SearchQuery, SearchResult};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Client that answers from a queue of canned responses and records every
/// query it receives.
///
/// Panics if asked for more pages than were scripted, which is how tests
/// assert that no request was issued.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<SearchPage, SearchError>>>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl ScriptedClient {
    /// Client answering with `responses` in order.
    pub fn new(responses: Vec<Result<SearchPage, SearchError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }

    /// Number of requests issued.
    pub fn request_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

impl SearchClient for ScriptedClient {
    fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
        self.queries.lock().unwrap().push(query.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted request: {:?}", query))
    }
}

/// Items `first..=last` (1-based, as the service numbers them in fixtures).
pub fn items(first: u64, last: u64) -> Vec<SearchResult> {
    (first..=last)
        .map(|n| {
            SearchResult::new(
                format!("item{}", n),
                format!("item {}", n),
                format!("https://media.example/{}/200w.gif", n),
            )
        })
        .collect()
}

/// Page of items `first..=last` reporting `total`.
pub fn page(first: u64, last: u64, total: u64) -> Result<SearchPage, SearchError> {
    Ok(SearchPage::new(items(first, last), total))
}

/// Empty page reporting zero matches.
pub fn empty_page() -> Result<SearchPage, SearchError> {
    Ok(SearchPage::new(Vec::new(), 0))
}
