//! Background fetcher for non-blocking search requests.
//!
//! The TUI event loop must keep drawing while a request is in flight, so the
//! client lives on a worker thread. Requests go in over one channel, tagged
//! outcomes come back over another and are drained on each UI tick.
//!
//! The worker handles requests strictly one at a time, in submission order.
//! It exits once the `Fetcher` (and with it the request sender) is dropped.

use crate::client::SearchClient;
use crate::model::{FetchOutcome, FetchRequest, SearchError};
use std::sync::mpsc::{self, Receiver, SendError, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, error};

/// Handle to the worker thread.
pub struct Fetcher {
    requests: Sender<FetchRequest>,
    outcomes: Receiver<FetchOutcome>,
}

impl Fetcher {
    /// Spawn the worker thread owning `client`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn spawn<C>(client: C) -> std::io::Result<Self>
    where
        C: SearchClient + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<FetchRequest>();
        let (outcome_tx, outcome_rx) = mpsc::channel::<FetchOutcome>();

        thread::Builder::new()
            .name("gifscroll-fetch".to_string())
            .spawn(move || {
                for request in request_rx {
                    debug!(id = %request.id(), "Worker picked up request");
                    let result = client.fetch_page(request.query());
                    if outcome_tx.send(FetchOutcome::new(request, result)).is_err() {
                        // Receiver gone: the UI has shut down.
                        break;
                    }
                }
                debug!("Fetch worker exiting");
            })?;

        Ok(Self {
            requests: request_tx,
            outcomes: outcome_rx,
        })
    }

    /// Queue a request for the worker.
    ///
    /// # Errors
    ///
    /// If the worker is gone, returns a failed outcome for `request` so the
    /// caller can apply it like any other failure.
    pub fn submit(&self, request: FetchRequest) -> Result<(), FetchOutcome> {
        self.requests.send(request).map_err(|SendError(request)| {
            error!(id = %request.id(), "Fetch worker is not running");
            FetchOutcome::new(
                request,
                Err(SearchError::Transport(
                    "background fetcher is not running".to_string(),
                )),
            )
        })
    }

    /// Drain every outcome that has arrived, without blocking.
    pub fn drain(&self) -> Vec<FetchOutcome> {
        self.outcomes.try_iter().collect()
    }

    /// Block up to `timeout` for the next outcome.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        self.outcomes.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        FetchKind, PageSize, RequestId, SearchPage, SearchQuery, SearchResult, SearchTerm,
    };

    /// Answers every query with a single result named after its offset.
    struct EchoClient;

    impl SearchClient for EchoClient {
        fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
            let id = format!("{}-{}", query.term(), query.offset());
            Ok(SearchPage::new(
                vec![SearchResult::new(id, "echo", "https://media.example/echo.gif")],
                500,
            ))
        }
    }

    /// Fails every query.
    struct DownClient;

    impl SearchClient for DownClient {
        fn fetch_page(&self, _query: &SearchQuery) -> Result<SearchPage, SearchError> {
            Err(SearchError::Transport("connection refused".to_string()))
        }
    }

    fn request(id: u64, offset: u64) -> FetchRequest {
        FetchRequest::new(
            RequestId::new(id),
            FetchKind::NewSearch,
            SearchQuery::new(SearchTerm::new("cars").unwrap(), offset, PageSize::DEFAULT),
        )
    }

    #[test]
    fn outcome_carries_originating_request() {
        let fetcher = Fetcher::spawn(EchoClient).unwrap();
        fetcher.submit(request(7, 0)).unwrap();

        let outcome = fetcher
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should answer");

        assert_eq!(outcome.request().id(), RequestId::new(7));
        let (_, result) = outcome.into_parts();
        assert_eq!(result.unwrap().results()[0].id(), "cars-0");
    }

    #[test]
    fn outcomes_arrive_in_submission_order() {
        let fetcher = Fetcher::spawn(EchoClient).unwrap();
        for (id, offset) in [(1, 0), (2, 50), (3, 100)] {
            fetcher.submit(request(id, offset)).unwrap();
        }

        let ids: Vec<u64> = (0..3)
            .filter_map(|_| fetcher.recv_timeout(Duration::from_secs(5)))
            .map(|outcome| outcome.request().id().get())
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn client_failure_comes_back_as_failed_outcome() {
        let fetcher = Fetcher::spawn(DownClient).unwrap();
        fetcher.submit(request(1, 0)).unwrap();

        let outcome = fetcher.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(outcome.is_err());
    }

    #[test]
    fn drain_is_empty_when_nothing_submitted() {
        let fetcher = Fetcher::spawn(EchoClient).unwrap();
        assert!(fetcher.drain().is_empty());
    }
}
