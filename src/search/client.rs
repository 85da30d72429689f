//! Async search client.
//!
//! Plain HTTP, no browser: the marketplace serves enough server-rendered
//! state for the listing parser to work with. Requests go out with a
//! desktop-Chrome user-agent, follow redirects (the tracked entry URL
//! bounces through the affiliate redirector), and retry on 5xx.

use crate::catalog::SourceProduct;
use crate::lexicon::Lexicon;
use crate::matching::{rank_candidates, ScoringPolicy};
use crate::query::{build_search_query, DEFAULT_MAX_TOKENS};
use crate::search::{listing, url::build_search_url, SearchError, SearchOutcome};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Scores below this are not worth surfacing from a live search page.
pub const LIVE_SEARCH_THRESHOLD: f64 = 0.1;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/121.0.0.0 Safari/537.36";

/// HTTP client for marketplace search.
#[derive(Clone)]
pub struct SearchClient {
    client: reqwest::Client,
}

impl SearchClient {
    /// Create a client with the given request timeout.
    pub fn new(timeout_ms: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Fetch a search-results page, retrying up to twice on 5xx.
    pub async fn fetch_results(&self, url: &Url) -> Result<String, SearchError> {
        let mut retries = 0u32;
        let max_retries = 2;

        loop {
            let resp = self.client.get(url.clone()).send().await?;
            let status = resp.status().as_u16();

            if status >= 500 && retries < max_retries {
                retries += 1;
                let delay = Duration::from_millis(500 * 2u64.pow(retries - 1));
                debug!(status, retries, "retrying search fetch");
                tokio::time::sleep(delay).await;
                continue;
            }
            if !(200..300).contains(&status) {
                return Err(SearchError::Status { status });
            }
            return Ok(resp.text().await?);
        }
    }

    /// End-to-end search: clean the title into a query, build the tracked
    /// URL, fetch, parse listings, and rank them against the source with
    /// the weighted policy at [`LIVE_SEARCH_THRESHOLD`].
    pub async fn search(
        &self,
        lex: &Lexicon,
        source: &SourceProduct,
    ) -> Result<SearchOutcome, SearchError> {
        let query = build_search_query(lex, &source.title, DEFAULT_MAX_TOKENS);
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let url = build_search_url(&query)?;
        info!(%query, "searching marketplace");

        let html = self.fetch_results(&url).await?;
        let candidates = listing::parse_listings(&html);
        debug!(count = candidates.len(), "parsed listing candidates");

        let ranked = rank_candidates(
            lex,
            ScoringPolicy::Weighted,
            source,
            candidates,
            0.0,
            Some(LIVE_SEARCH_THRESHOLD),
        );

        Ok(SearchOutcome {
            query,
            url: url.to_string(),
            candidates: ranked,
        })
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_results_ok() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/results"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/results", server.uri())).expect("mock url");
        let body = SearchClient::new(2_000).fetch_results(&url).await.expect("fetch");
        assert_eq!(body, "<html>ok</html>");
    }

    #[tokio::test]
    async fn test_fetch_results_retries_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/flaky"))
            .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/flaky", server.uri())).expect("mock url");
        let body = SearchClient::new(2_000).fetch_results(&url).await.expect("fetch");
        assert_eq!(body, "recovered");
    }

    #[tokio::test]
    async fn test_fetch_results_client_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/gone", server.uri())).expect("mock url");
        let err = SearchClient::new(2_000).fetch_results(&url).await.unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn test_search_rejects_all_fluff_title() {
        let client = SearchClient::default();
        let source = SourceProduct::new("Genuine Official Brand", 10.0);
        let err = client.search(Lexicon::embedded(), &source).await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyQuery));
    }
}
