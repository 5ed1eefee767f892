//! Request/outcome envelopes exchanged between the session and a fetcher.
//!
//! The session hands out a `FetchRequest`, something performs it, and the
//! matching `FetchOutcome` comes back. The request id lets the session tell
//! a current outcome from a superseded one.

use crate::model::error::SearchError;
use crate::model::search::{SearchPage, SearchQuery};
use std::fmt;

/// Monotonic identifier of a request issued by one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Wrap a raw id.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a request was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of a freshly submitted term; replaces results.
    NewSearch,
    /// Next page of the current term; appends to results.
    Continuation,
}

/// A request the session wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    id: RequestId,
    kind: FetchKind,
    query: SearchQuery,
}

impl FetchRequest {
    /// Create a request envelope.
    pub fn new(id: RequestId, kind: FetchKind, query: SearchQuery) -> Self {
        Self { id, kind, query }
    }

    /// Issuing id.
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// New search or continuation.
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    /// Query parameters to send.
    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// Result of performing a `FetchRequest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    request: FetchRequest,
    result: Result<SearchPage, SearchError>,
}

impl FetchOutcome {
    /// Pair a request with what came back for it.
    pub fn new(request: FetchRequest, result: Result<SearchPage, SearchError>) -> Self {
        Self { request, result }
    }

    /// The request this outcome answers.
    pub fn request(&self) -> &FetchRequest {
        &self.request
    }

    /// Whether the request failed.
    pub fn is_err(&self) -> bool {
        self.result.is_err()
    }

    /// Split into request and result.
    pub fn into_parts(self) -> (FetchRequest, Result<SearchPage, SearchError>) {
        (self.request, self.result)
    }
}
