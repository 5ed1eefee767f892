//! Error types for gifscroll.
//!
//! Each layer owns a `thiserror` enum; `AppError` wraps them so `main` can
//! propagate everything with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`ConfigError`] - Config file or credential resolution failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - [`SearchError`] - Search service failures (transport, HTTP status, body)
//!   - `std::io::Error` - Terminal and output failures
//!
//! # Recovery Strategy
//!
//! `SearchError` is **non-fatal** inside the TUI: the session turns it into a
//! visible status and keeps its results. Empty input, zero results and an
//! exhausted result set are session states, not errors. Config, logging and
//! terminal errors are fatal and end the process.

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Maximum number of response-body characters kept in an error.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A search request failed outside the TUI (headless mode).
    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    /// Terminal or output I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single search request.
///
/// Carries strings rather than the transport's error type so outcomes can be
/// cloned across the fetcher channel and compared in tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("service returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// The response body was not the expected JSON document.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl SearchError {
    /// Build a `Status` error, truncating the body.
    pub fn status(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(error: reqwest::Error) -> Self {
        // The URL carries the API key as a query parameter.
        let error = error.without_url();
        if error.is_timeout() {
            Self::Transport("timed out".to_string())
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
