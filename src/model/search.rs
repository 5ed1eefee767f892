//! Search domain types with smart constructors.
//!
//! Wire-format decoding lives in `client::giphy`. Everything here is
//! already validated: a `SearchTerm` is never blank, a `PageSize` is never
//! zero, a `SearchResult` always has an image URL.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

// ===== SearchTerm =====

/// User-entered search keyword, trimmed and non-empty.
///
/// Only obtainable through [`SearchTerm::new`], so a blank term never
/// reaches a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Smart constructor: trims surrounding whitespace.
    /// Returns None if nothing is left after trimming.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The trimmed term.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== PageSize =====

/// Number of results requested per call. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageSize(u32);

impl PageSize {
    /// Page size used when nothing else is configured.
    pub const DEFAULT: PageSize = PageSize(50);

    /// Smart constructor: rejects zero.
    pub fn new(raw: u32) -> Result<Self, InvalidPageSize> {
        if raw == 0 {
            Err(InvalidPageSize::Zero)
        } else {
            Ok(Self(raw))
        }
    }

    /// Page size as a plain integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Page size widened for offset arithmetic.
    pub fn as_offset(self) -> u64 {
        u64::from(self.0)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Rejected page size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPageSize {
    /// Zero results per page would never advance.
    #[error("Page size must be greater than zero")]
    Zero,
}

// ===== SearchQuery =====

/// Parameters of one outbound page request. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    term: SearchTerm,
    offset: u64,
    limit: PageSize,
}

impl SearchQuery {
    /// Create a query for one page.
    pub fn new(term: SearchTerm, offset: u64, limit: PageSize) -> Self {
        Self {
            term,
            offset,
            limit,
        }
    }

    /// Term to search for.
    pub fn term(&self) -> &SearchTerm {
        &self.term
    }

    /// Zero-based index of the first requested result.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Requested page size.
    pub fn limit(&self) -> PageSize {
        self.limit
    }
}

// ===== SearchResult =====

/// One retrieved animated image. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    id: String,
    title: String,
    image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    imported_at: Option<NaiveDateTime>,
}

impl SearchResult {
    /// Title shown for results the service left untitled.
    pub const UNTITLED: &'static str = "untitled";

    /// Create a result with the fields every item carries.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            page_url: None,
            rating: None,
            imported_at: None,
        }
    }

    /// Attach the service's landing-page URL.
    pub fn with_page_url(mut self, page_url: impl Into<String>) -> Self {
        self.page_url = Some(page_url.into());
        self
    }

    /// Attach the content rating (e.g. "g", "pg").
    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    /// Attach the time the item was added to the service.
    pub fn with_imported_at(mut self, imported_at: NaiveDateTime) -> Self {
        self.imported_at = Some(imported_at);
        self
    }

    /// Service-assigned identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw title, possibly empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Title for display; falls back to [`Self::UNTITLED`].
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            Self::UNTITLED
        } else {
            &self.title
        }
    }

    /// URL of the fixed-width rendition.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Landing-page URL, if the service sent one.
    pub fn page_url(&self) -> Option<&str> {
        self.page_url.as_deref()
    }

    /// Content rating, if the service sent one.
    pub fn rating(&self) -> Option<&str> {
        self.rating.as_deref()
    }

    /// Import timestamp, if the service sent a real one.
    pub fn imported_at(&self) -> Option<NaiveDateTime> {
        self.imported_at
    }
}

// ===== SearchPage =====

/// One decoded response: a page of results plus the reported total.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    results: Vec<SearchResult>,
    total_count: u64,
}

impl SearchPage {
    /// Create a page. `total_count` is the service's total for the term,
    /// not the length of `results`.
    pub fn new(results: Vec<SearchResult>, total_count: u64) -> Self {
        Self {
            results,
            total_count,
        }
    }

    /// Results on this page, in service order.
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Total number of matches the service reports for the term.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Split into results and total.
    pub fn into_parts(self) -> (Vec<SearchResult>, u64) {
        (self.results, self.total_count)
    }
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_term_trims_whitespace() {
        let term = SearchTerm::new("  Fleetwood Mac \t").unwrap();
        assert_eq!(term.as_str(), "Fleetwood Mac");
    }

    #[test]
    fn search_term_rejects_blank_input() {
        assert!(SearchTerm::new("").is_none());
        assert!(SearchTerm::new("   \n\t").is_none());
    }

    #[test]
    fn search_term_keeps_inner_spaces() {
        let term = SearchTerm::new("hot rod engines").unwrap();
        assert_eq!(term.to_string(), "hot rod engines");
    }

    #[test]
    fn page_size_rejects_zero() {
        assert_eq!(PageSize::new(0), Err(InvalidPageSize::Zero));
        assert_eq!(PageSize::new(25).unwrap().get(), 25);
    }

    #[test]
    fn page_size_default_is_fifty() {
        assert_eq!(PageSize::default().get(), 50);
        assert_eq!(PageSize::default().as_offset(), 50);
    }

    #[test]
    fn display_title_falls_back_for_blank_titles() {
        let untitled = SearchResult::new("a1", "  ", "https://media.example/a1.gif");
        assert_eq!(untitled.display_title(), SearchResult::UNTITLED);

        let titled = SearchResult::new("a2", "Dancing Cat", "https://media.example/a2.gif");
        assert_eq!(titled.display_title(), "Dancing Cat");
    }

    #[test]
    fn search_result_serializes_without_absent_fields() {
        let result = SearchResult::new("a1", "Cars", "https://media.example/a1.gif");
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"id":"a1","title":"Cars","image_url":"https://media.example/a1.gif"}"#
        );
    }

    #[test]
    fn search_page_total_is_independent_of_result_len() {
        let page = SearchPage::new(
            vec![SearchResult::new("a1", "one", "https://media.example/1.gif")],
            120,
        );
        assert_eq!(page.results().len(), 1);
        assert_eq!(page.total_count(), 120);
    }
}
