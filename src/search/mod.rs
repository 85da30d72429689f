//! Marketplace search: tracked URL construction, result-page parsing, and
//! the async client that ties query → fetch → parse → rank together.

pub mod client;
pub mod listing;
pub mod url;

use crate::catalog::ScoredCandidate;
use serde::Serialize;
use thiserror::Error;

/// Errors crossing the search boundary. Everything inside the scorer
/// degrades silently; network and URL failures do not.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The source title reduced to an empty query — nothing to search for.
    #[error("search query is empty after cleaning the title")]
    EmptyQuery,
    /// The search URL could not be assembled.
    #[error("invalid search url: {0}")]
    Url(#[from] ::url::ParseError),
    /// The request itself failed (DNS, TLS, timeout, ...).
    #[error("search request failed: {0}")]
    Fetch(#[from] reqwest::Error),
    /// The marketplace answered with a non-success status.
    #[error("search returned HTTP {status}")]
    Status { status: u16 },
}

/// Result of one end-to-end search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    /// The cleaned query that was actually searched.
    pub query: String,
    /// The tracked search URL that was fetched.
    pub url: String,
    /// Candidates ranked by the weighted policy, best first.
    pub candidates: Vec<ScoredCandidate>,
}
