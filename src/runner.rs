//! Synchronous driver for the search session.
//!
//! `SearchController` pairs a [`SearchSession`] with a [`SearchClient`] and
//! executes each request the session asks for on the calling thread. The
//! headless `--print` mode is built on it, and integration tests use it to
//! drive the state machine with scripted clients.

use crate::client::SearchClient;
use crate::model::{AppError, FetchOutcome, FetchRequest, PageSize};
use crate::state::{Applied, SearchSession};
use std::io::{self, Write};
use tracing::{debug, info};

/// Session plus the client that answers its requests.
pub struct SearchController<C> {
    client: C,
    session: SearchSession,
}

impl<C: SearchClient> SearchController<C> {
    /// Create a controller with an empty session.
    pub fn new(client: C, page_size: PageSize) -> Self {
        Self {
            client,
            session: SearchSession::new(page_size),
        }
    }

    /// Submit a term. Returns what happened to the response, or None when
    /// the session decided no request was needed.
    pub fn submit_search(&mut self, raw: &str) -> Option<Applied> {
        let request = self.session.submit_search(raw)?;
        Some(self.execute(request))
    }

    /// Request the next page. None when no request was needed (no term, or
    /// the result set is exhausted).
    pub fn load_more(&mut self) -> Option<Applied> {
        let request = self.session.load_more()?;
        Some(self.execute(request))
    }

    /// Current session state.
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// The client, for inspection.
    pub fn client(&self) -> &C {
        &self.client
    }

    fn execute(&mut self, request: FetchRequest) -> Applied {
        let result = self.client.fetch_page(request.query());
        self.session.apply(FetchOutcome::new(request, result))
    }
}

/// What a print run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintSummary {
    /// Results written.
    pub printed: usize,
    /// Total reported by the service.
    pub total_count: u64,
    /// Final status message, if any.
    pub status_message: Option<String>,
}

/// Search for `term`, load up to `pages` pages and write each result to
/// `out` as one JSON line.
///
/// # Errors
///
/// Returns `AppError::Search` if any request fails, and `AppError::Io` if
/// writing fails. Results printed before a failure stay printed.
pub fn print_results<C, W>(
    controller: &mut SearchController<C>,
    term: &str,
    pages: u32,
    out: &mut W,
) -> Result<PrintSummary, AppError>
where
    C: SearchClient,
    W: Write,
{
    let mut printed = 0;

    let mut step = controller.submit_search(term);
    for page in 1..=pages.max(1) {
        if page > 1 {
            step = controller.load_more();
        }
        let Some(applied) = step.take() else {
            debug!(page, "No request issued, stopping");
            break;
        };
        if let Applied::Failed(error) = applied {
            return Err(error.into());
        }
        printed = write_new_results(controller.session(), printed, out)?;
    }
    out.flush()?;

    let session = controller.session();
    info!(printed, total = session.total_count(), "Print run finished");

    Ok(PrintSummary {
        printed,
        total_count: session.total_count(),
        status_message: session.status_message(),
    })
}

/// Write results from index `from` onwards; returns the new count written.
fn write_new_results<W: Write>(
    session: &SearchSession,
    from: usize,
    out: &mut W,
) -> Result<usize, AppError> {
    let results = session.results();
    for result in results.iter().skip(from) {
        serde_json::to_writer(&mut *out, result).map_err(io::Error::from)?;
        out.write_all(b"\n")?;
    }
    Ok(results.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SearchError, SearchPage, SearchQuery, SearchResult};
    use crate::state::SearchStatus;
    use std::cell::Cell;

    /// Serves `total` results; fails the page at `fail_at_offset` if set.
    struct PagedClient {
        total: u64,
        fail_at_offset: Option<u64>,
        calls: Cell<usize>,
    }

    impl PagedClient {
        fn new(total: u64) -> Self {
            Self {
                total,
                fail_at_offset: None,
                calls: Cell::new(0),
            }
        }
    }

    // Cell is not Sync, but SearchClient only asks for Send.
    impl SearchClient for PagedClient {
        fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_at_offset == Some(query.offset()) {
                return Err(SearchError::status(500, "boom"));
            }
            let end = (query.offset() + query.limit().as_offset()).min(self.total);
            let results = (query.offset()..end)
                .map(|n| SearchResult::new(format!("r{}", n), "", "https://media.example/r.gif"))
                .collect();
            Ok(SearchPage::new(results, self.total))
        }
    }

    fn controller(client: PagedClient) -> SearchController<PagedClient> {
        SearchController::new(client, PageSize::new(10).unwrap())
    }

    #[test]
    fn prints_one_json_line_per_result() {
        let mut controller = controller(PagedClient::new(25));
        let mut out = Vec::new();

        let summary = print_results(&mut controller, "cars", 2, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 20);
        assert_eq!(summary.printed, 20);
        assert_eq!(summary.total_count, 25);
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(first["id"], "r0");
        assert_eq!(first["image_url"], "https://media.example/r.gif");
    }

    #[test]
    fn stops_when_result_set_is_exhausted() {
        let mut controller = controller(PagedClient::new(15));
        let mut out = Vec::new();

        let summary = print_results(&mut controller, "cars", 5, &mut out).unwrap();

        assert_eq!(summary.printed, 15);
        assert_eq!(controller.client().calls.get(), 2);
        assert_eq!(controller.session().status(), &SearchStatus::NoMoreResults);
        assert_eq!(
            summary.status_message.as_deref(),
            Some("No MORE results are available, total count displayed is 15.")
        );
    }

    #[test]
    fn blank_term_prints_nothing_and_makes_no_request() {
        let mut controller = controller(PagedClient::new(15));
        let mut out = Vec::new();

        let summary = print_results(&mut controller, "  ", 3, &mut out).unwrap();

        assert!(out.is_empty());
        assert_eq!(controller.client().calls.get(), 0);
        assert_eq!(
            summary.status_message.as_deref(),
            Some("Please type a search term into the field above and press Enter.")
        );
    }

    #[test]
    fn failure_is_returned_after_earlier_pages_printed() {
        let mut client = PagedClient::new(100);
        client.fail_at_offset = Some(10);
        let mut controller = controller(client);
        let mut out = Vec::new();

        let result = print_results(&mut controller, "cars", 3, &mut out);

        assert!(matches!(
            result,
            Err(AppError::Search(SearchError::Status { status: 500, .. }))
        ));
        assert_eq!(String::from_utf8(out).unwrap().lines().count(), 10);
    }

    #[test]
    fn zero_pages_still_prints_first_page() {
        let mut controller = controller(PagedClient::new(5));
        let mut out = Vec::new();

        let summary = print_results(&mut controller, "cars", 0, &mut out).unwrap();

        assert_eq!(summary.printed, 5);
    }

    #[test]
    fn controller_repeat_of_empty_term_is_short_circuited() {
        let mut controller = controller(PagedClient::new(0));

        assert!(matches!(
            controller.submit_search("zzzz"),
            Some(Applied::Replaced { count: 0 })
        ));
        assert_eq!(controller.submit_search("zzzz"), None);
        assert_eq!(controller.client().calls.get(), 1);
    }
}
