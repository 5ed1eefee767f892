//! Search/pagination state machine (pure).
//!
//! `SearchSession` owns the term, the accumulated results, the reported
//! total, the paging offset and a status explaining what the user sees.
//! It never performs I/O: operations hand back the `FetchRequest` to issue
//! and outcomes are fed back through [`SearchSession::apply`].
//!
//! # Transitions
//!
//! - `submit_search(raw)`: blank → `EmptyInput`; same term already known to
//!   have zero results → nothing; otherwise reset and request page one.
//! - `load_more()`: next offset past the total → `NoMoreResults`; otherwise
//!   advance the offset and request the next page.
//! - `apply(outcome)`: replace or append results, or record the failure.
//!
//! # Invariants
//!
//! - `offset` only moves forward, by exactly one page size, except that a
//!   failed continuation rolls back its own advance.
//! - `results` is either replaced (new search) or appended to
//!   (continuation), never reordered.
//! - At most one request is pending. An outcome is applied only if it
//!   answers the pending request and, for continuations, its term is still
//!   the session term. Anything else is stale and ignored.

use crate::model::{
    FetchKind, FetchOutcome, FetchRequest, PageSize, RequestId, SearchError, SearchQuery,
    SearchResult, SearchTerm,
};
use tracing::{debug, info, warn};

// ===== SearchStatus =====

/// Reason code for the message shown alongside (or instead of) results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// Nothing to report.
    #[default]
    None,
    /// The user submitted a blank term.
    EmptyInput,
    /// The last completed search matched nothing.
    NoResults,
    /// A continuation was requested past the end of the result set.
    NoMoreResults,
    /// The last request failed; results were left as they were.
    RequestFailed {
        /// Human-readable failure description.
        reason: String,
    },
}

/// What [`SearchSession::apply`] did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// A new search's first page replaced the results.
    Replaced {
        /// Number of results now held.
        count: usize,
    },
    /// A continuation page was appended.
    Appended {
        /// Number of results added.
        added: usize,
    },
    /// The request failed; status now reports it.
    Failed(SearchError),
    /// The outcome answered a superseded request and was dropped.
    Stale,
}

// ===== SearchSession =====

/// State of the one search session that lives for the whole process.
#[derive(Debug, Clone)]
pub struct SearchSession {
    term: Option<SearchTerm>,
    results: Vec<SearchResult>,
    total_count: u64,
    offset: u64,
    limit: PageSize,
    status: SearchStatus,
    pending: Option<FetchRequest>,
    last_request_id: u64,
}

impl SearchSession {
    /// Create an empty session requesting `limit` results per page.
    pub fn new(limit: PageSize) -> Self {
        Self {
            term: None,
            results: Vec::new(),
            total_count: 0,
            offset: 0,
            limit,
            status: SearchStatus::None,
            pending: None,
            last_request_id: 0,
        }
    }

    // ----- Triggers -----

    /// Handle a submitted search term.
    ///
    /// Returns the request to issue, or None when no request is needed.
    /// A new search supersedes any pending request.
    pub fn submit_search(&mut self, raw: &str) -> Option<FetchRequest> {
        let Some(term) = SearchTerm::new(raw) else {
            debug!("Blank search term submitted");
            self.reset();
            self.status = SearchStatus::EmptyInput;
            return None;
        };

        if self.term.as_ref() == Some(&term) && self.total_count == 0 {
            debug!(term = term.as_str(), "Term already known to have no results");
            return None;
        }

        if let Some(superseded) = &self.pending {
            debug!(id = %superseded.id(), "New search supersedes pending request");
        }

        self.reset();
        info!(term = term.as_str(), "Starting new search");
        let query = SearchQuery::new(term, 0, self.limit);
        Some(self.issue(FetchKind::NewSearch, query))
    }

    /// Handle the viewport reaching the bottom of the rendered results.
    ///
    /// No-op while no term is active, the term matched nothing, or a request
    /// is already pending.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        let term = self.term.clone()?;

        // Keep the NoResults message; there is nothing further to page through
        if self.total_count == 0 {
            return None;
        }

        if let Some(pending) = &self.pending {
            debug!(id = %pending.id(), "Request in flight, ignoring load-more trigger");
            return None;
        }

        let candidate = self.offset + self.limit.as_offset();
        if candidate >= self.total_count {
            debug!(
                candidate,
                total = self.total_count,
                "Result set exhausted"
            );
            self.status = SearchStatus::NoMoreResults;
            return None;
        }

        self.offset = candidate;
        let query = SearchQuery::new(term, candidate, self.limit);
        Some(self.issue(FetchKind::Continuation, query))
    }

    /// Apply the outcome of a previously issued request.
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        let (request, result) = outcome.into_parts();

        if !self.is_current(&request) {
            debug!(id = %request.id(), "Discarding stale outcome");
            return Applied::Stale;
        }
        self.pending = None;

        match result {
            Ok(page) => {
                let (results, total_count) = page.into_parts();
                self.total_count = total_count;
                match request.kind() {
                    FetchKind::NewSearch => {
                        self.status = if total_count == 0 {
                            SearchStatus::NoResults
                        } else {
                            SearchStatus::None
                        };
                        self.results = results;
                        self.term = Some(request.query().term().clone());
                        Applied::Replaced {
                            count: self.results.len(),
                        }
                    }
                    FetchKind::Continuation => {
                        let added = results.len();
                        self.results.extend(results);
                        self.status = SearchStatus::None;
                        Applied::Appended { added }
                    }
                }
            }
            Err(error) => {
                warn!(id = %request.id(), error = %error, "Search request failed");
                if request.kind() == FetchKind::Continuation {
                    self.offset = request
                        .query()
                        .offset()
                        .saturating_sub(self.limit.as_offset());
                }
                self.status = SearchStatus::RequestFailed {
                    reason: error.to_string(),
                };
                Applied::Failed(error)
            }
        }
    }

    // ----- Read-only view -----

    /// Term of the last successfully started search, if any.
    pub fn term(&self) -> Option<&SearchTerm> {
        self.term.as_ref()
    }

    /// Whether a term is active (near-bottom triggers only matter then).
    pub fn has_active_term(&self) -> bool {
        self.term.is_some()
    }

    /// Accumulated results in arrival order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Total reported by the most recent page.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Offset of the most recently requested page.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Page size.
    pub fn limit(&self) -> PageSize {
        self.limit
    }

    /// Current status code.
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    /// The request awaiting an outcome, if any.
    pub fn pending(&self) -> Option<&FetchRequest> {
        self.pending.as_ref()
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Message for the current status, or None for `SearchStatus::None`.
    pub fn status_message(&self) -> Option<String> {
        match &self.status {
            SearchStatus::None => None,
            SearchStatus::EmptyInput => {
                Some("Please type a search term into the field above and press Enter.".to_string())
            }
            SearchStatus::NoResults => Some(format!(
                "No results were found for search term {}.",
                self.term.as_ref().map(SearchTerm::as_str).unwrap_or_default()
            )),
            SearchStatus::NoMoreResults => Some(format!(
                "No MORE results are available, total count displayed is {}.",
                format_count(self.total_count)
            )),
            SearchStatus::RequestFailed { reason } => Some(format!("Search failed: {}", reason)),
        }
    }

    // ----- Internals -----

    fn reset(&mut self) {
        self.term = None;
        self.results.clear();
        self.total_count = 0;
        self.offset = 0;
        self.status = SearchStatus::None;
        self.pending = None;
    }

    fn issue(&mut self, kind: FetchKind, query: SearchQuery) -> FetchRequest {
        self.last_request_id += 1;
        let request = FetchRequest::new(RequestId::new(self.last_request_id), kind, query);
        debug!(
            id = %request.id(),
            kind = ?kind,
            offset = request.query().offset(),
            "Issuing request"
        );
        self.pending = Some(request.clone());
        request
    }

    fn is_current(&self, request: &FetchRequest) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        if pending.id() != request.id() {
            return false;
        }
        match request.kind() {
            FetchKind::NewSearch => true,
            FetchKind::Continuation => self.term.as_ref() == Some(request.query().term()),
        }
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(PageSize::DEFAULT)
    }
}

// ===== Formatting =====

/// Format an integer with `,` thousands separators (12345 → "12,345").
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ===== Tests =====

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
