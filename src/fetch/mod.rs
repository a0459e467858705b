//! Single-page fetching against the search endpoint.
//!
//! One HTTP GET per call, no retries: a transport failure, a non-2xx
//! status, or an undecodable body surfaces as a typed [`FetchError`] and
//! the collector decides what to do with it.

pub mod agents;

pub use agents::UserAgentPool;

use crate::error::{FetchError, FetchResult};
use crate::query::SearchQuery;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Fixed page size requested from the endpoint.
pub const PER_PAGE: u32 = 20;

/// The public search endpoint Unsplash's own frontend uses.
pub const SEARCH_ENDPOINT: &str = "https://unsplash.com/napi/search/photos";

/// Fetcher configuration. Tests point `endpoint` at a mock server and run
/// with a short timeout.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Full URL of the search endpoint.
    pub endpoint: String,
    /// Request timeout applied to every page fetch.
    pub timeout: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: SEARCH_ENDPOINT.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

/// One decoded page of search results.
///
/// An absent `results` field decodes as an empty list; the collector treats
/// both the same way (empty-page stop). Candidates stay as raw JSON values
/// so one malformed element can be skipped without rejecting its page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<Value>,
}

/// Fetches one page of search results per call.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    agents: UserAgentPool,
    config: FetcherConfig,
}

impl PageFetcher {
    /// Build a fetcher. The timeout lives on the underlying client so it
    /// bounds the whole request, not just the connect phase.
    pub fn new(config: FetcherConfig, agents: UserAgentPool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            agents,
            config,
        }
    }

    /// Fetcher against the real endpoint with default settings.
    pub fn with_defaults() -> Self {
        Self::new(FetcherConfig::default(), UserAgentPool::default())
    }

    /// Fetch page `page` (1-based) for `query`.
    ///
    /// Maps the query to wire parameters (`query`, `per_page=20`, `page`,
    /// plus `orientation`/`color` only when they are not "any") and sends
    /// a freshly sampled User-Agent. Purely functional given its inputs:
    /// no state is kept between calls.
    pub async fn fetch_page(&self, query: &SearchQuery, page: u32) -> FetchResult<SearchPage> {
        let mut params: Vec<(&str, String)> = vec![
            ("query", query.term.clone()),
            ("per_page", PER_PAGE.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(orientation) = query.orientation.as_param() {
            params.push(("orientation", orientation.to_string()));
        }
        if let Some(color) = query.color.as_param() {
            params.push(("color", color.to_string()));
        }

        let agent = self.agents.sample();
        debug!(page, term = %query.term, "fetching search page");

        let response = self
            .client
            .get(&self.config.endpoint)
            .header(reqwest::header::USER_AGENT, agent)
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        let decoded: SearchPage =
            serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(decoded)
    }
}
