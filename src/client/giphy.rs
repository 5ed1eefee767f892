//! HTTP client for the GIPHY search endpoint.
//!
//! Wire types are private; responses are decoded into domain types at this
//! boundary so nothing past it ever sees a half-populated item.

use crate::client::SearchClient;
use crate::model::{SearchError, SearchPage, SearchQuery, SearchResult};
use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Search endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.giphy.com/v1/gifs/search";

/// Format of the service's `import_datetime` field.
const IMPORT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ===== Wire format =====

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    data: Vec<WireItem>,
    #[serde(default)]
    pagination: Option<WirePagination>,
}

#[derive(Debug, Deserialize)]
struct WirePagination {
    #[serde(default)]
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    rating: Option<String>,
    #[serde(default)]
    import_datetime: Option<String>,
    #[serde(default)]
    images: Option<WireImages>,
}

#[derive(Debug, Deserialize)]
struct WireImages {
    #[serde(default)]
    fixed_width: Option<WireRendition>,
}

#[derive(Debug, Deserialize)]
struct WireRendition {
    #[serde(default)]
    url: Option<String>,
}

impl WireItem {
    /// Convert to a domain result. Items without a fixed-width image URL
    /// cannot be displayed and yield None.
    fn into_result(self) -> Option<SearchResult> {
        let image_url = self
            .images
            .and_then(|images| images.fixed_width)
            .and_then(|rendition| rendition.url)
            .filter(|url| !url.is_empty())?;

        let mut result = SearchResult::new(self.id, self.title, image_url);
        if let Some(page_url) = self.url.filter(|url| !url.is_empty()) {
            result = result.with_page_url(page_url);
        }
        if let Some(rating) = self.rating.filter(|rating| !rating.is_empty()) {
            result = result.with_rating(rating);
        }
        // "0000-00-00 00:00:00" is the service's placeholder; it fails to parse.
        if let Some(imported_at) = self
            .import_datetime
            .and_then(|raw| NaiveDateTime::parse_from_str(&raw, IMPORT_DATETIME_FORMAT).ok())
        {
            result = result.with_imported_at(imported_at);
        }
        Some(result)
    }
}

/// Decode a response body into a page.
///
/// A missing `pagination` object (or `total_count` inside it) means a total
/// of zero. Undisplayable items are dropped and logged.
///
/// # Errors
///
/// Returns `SearchError::Decode` if the body is not a JSON object of the
/// expected shape.
pub fn decode_page(body: &str) -> Result<SearchPage, SearchError> {
    let wire: WireResponse = serde_json::from_str(body)?;

    let total_count = wire
        .pagination
        .and_then(|pagination| pagination.total_count)
        .unwrap_or(0);

    let mut results = Vec::with_capacity(wire.data.len());
    for item in wire.data {
        let id = item.id.clone();
        match item.into_result() {
            Some(result) => results.push(result),
            None => warn!(id = %id, "Dropping result without a fixed-width image URL"),
        }
    }

    Ok(SearchPage::new(results, total_count))
}

// ===== GiphyClient =====

/// Blocking HTTP client for the search endpoint.
pub struct GiphyClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl GiphyClient {
    /// Build a client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Transport` if the HTTP client cannot be built
    /// (e.g. no TLS backend available).
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gifscroll/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Endpoint this client queries.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SearchClient for GiphyClient {
    fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, SearchError> {
        let limit = query.limit().get().to_string();
        let offset = query.offset().to_string();

        debug!(
            term = query.term().as_str(),
            offset = query.offset(),
            limit = query.limit().get(),
            "Requesting search page"
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query.term().as_str()),
                ("api_key", self.api_key.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "Search request rejected");
            return Err(SearchError::status(status.as_u16(), &body));
        }

        let body = response.text()?;
        let page = decode_page(&body)?;

        info!(
            term = query.term().as_str(),
            offset = query.offset(),
            received = page.results().len(),
            total = page.total_count(),
            "Search page received"
        );

        Ok(page)
    }
}
