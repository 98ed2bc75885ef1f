//! Web search client used to discover competitor sites when the request does
//! not name any. Speaks the Serper-style `POST /search` JSON API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";
const RESULTS_PER_QUERY: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<SearchResult>,
}

/// Use [`SearchClient::new`] for production or [`SearchClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SearchClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SearchClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ScraperError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the client cannot be constructed, or
    /// [`ScraperError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Organic results for `query`, in ranking order.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`] on network failure or a non-2xx status.
    /// - [`ScraperError::Deserialize`] if the body is not the expected shape.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, ScraperError> {
        let url = self
            .base_url
            .join("search")
            .map_err(|e| ScraperError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let response = self
            .client
            .post(url)
            .header("X-API-KEY", &self.api_key)
            .json(&SearchRequest {
                q: query,
                num: RESULTS_PER_QUERY,
            })
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        tracing::debug!(query, results = parsed.organic.len(), "search completed");
        Ok(parsed.organic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_organic_results_is_empty() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"searchParameters":{}}"#).unwrap();
        assert!(parsed.organic.is_empty());
    }

    #[test]
    fn snippet_is_optional() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"organic":[{"title":"A","link":"https://a.com"}]}"#).unwrap();
        assert_eq!(parsed.organic[0].snippet, "");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            SearchClient::with_base_url("k", 5, "not a url"),
            Err(ScraperError::InvalidUrl { .. })
        ));
    }
}
