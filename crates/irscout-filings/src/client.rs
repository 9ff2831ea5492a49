//! HTTP client for the filings full-text search API.
//!
//! The API takes an Elasticsearch-style `query_string` body and authenticates
//! with a `token` query parameter. [`FilingsClient::recent_filings`] never
//! fails; [`FilingsClient::search_filings`] surfaces the underlying error.

use std::time::Duration;

use irscout_core::FilingItem;
use reqwest::{Client, Url};
use serde_json::json;

use crate::error::FilingsError;
use crate::types::SearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.sec-api.io";

/// Client for the filings search API.
///
/// Use [`FilingsClient::new`] for production or
/// [`FilingsClient::with_base_url`] to point at a mock server in tests.
pub struct FilingsClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl FilingsClient {
    /// # Errors
    ///
    /// Returns [`FilingsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, FilingsError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`FilingsError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FilingsError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, FilingsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs))
            .user_agent("irscout/0.1 (filings)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FilingsError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.trim().to_owned(),
            base_url,
        })
    }

    /// Whether an API key is configured. Without one no request is ever sent.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Most recent filings for `ticker`, newest first, at most `limit`.
    ///
    /// Returns an empty list when no API key is configured or on any error;
    /// errors are logged.
    pub async fn recent_filings(&self, ticker: &str, limit: u32) -> Vec<FilingItem> {
        if !self.is_enabled() {
            tracing::debug!(ticker, "no filings API key configured, skipping filings");
            return Vec::new();
        }

        match self.search_filings(ticker, limit).await {
            Ok(filings) => {
                tracing::debug!(ticker, count = filings.len(), "fetched filings");
                filings
            }
            Err(e) => {
                tracing::error!(ticker, error = %e, "failed to fetch filings");
                Vec::new()
            }
        }
    }

    /// Like [`FilingsClient::recent_filings`] but returns errors.
    ///
    /// A `GOOG`-family ticker that matches nothing is retried once as
    /// `GOOGL`.
    ///
    /// # Errors
    ///
    /// - [`FilingsError::Http`] on network failure.
    /// - [`FilingsError::UnexpectedStatus`] on a non-2xx status.
    /// - [`FilingsError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_filings(
        &self,
        ticker: &str,
        limit: u32,
    ) -> Result<Vec<FilingItem>, FilingsError> {
        let cleaned = ticker.trim().to_uppercase();
        let mut response = self
            .post_query(&normalize_filing_ticker(&cleaned), limit)
            .await?;

        if response.total() == 0 && cleaned.contains("GOOG") && !cleaned.ends_with('L') {
            tracing::debug!(ticker = %cleaned, "no filings found, retrying as GOOGL");
            response = self.post_query("GOOGL", limit).await?;
        }

        Ok(response.filings.into_iter().map(FilingItem::from).collect())
    }

    fn request_url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("token", &self.api_key);
        url
    }

    async fn post_query(
        &self,
        search_ticker: &str,
        limit: u32,
    ) -> Result<SearchResponse, FilingsError> {
        let response = self
            .client
            .post(self.request_url())
            .json(&query_payload(search_ticker, limit))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FilingsError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| FilingsError::Deserialize {
            context: format!("filings search (ticker={search_ticker})"),
            source: e,
        })
    }
}

/// Ticker form used by the filings index: `brk.b` becomes `BRK-B`.
#[must_use]
pub fn normalize_filing_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase().replace('.', "-")
}

fn query_payload(search_ticker: &str, limit: u32) -> serde_json::Value {
    json!({
        "query": { "query_string": { "query": format!("ticker:{search_ticker}") } },
        "from": "0",
        "size": limit.to_string(),
        "sort": [{ "filedAt": { "order": "desc" } }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> FilingsClient {
        FilingsClient::with_base_url("test-key", 5, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn request_url_carries_token() {
        let client = test_client("https://api.filings.example/");
        assert_eq!(
            client.request_url().as_str(),
            "https://api.filings.example/?token=test-key"
        );
    }

    #[test]
    fn payload_matches_query_string_shape() {
        let payload = query_payload("AAPL", 5);
        assert_eq!(payload["query"]["query_string"]["query"], "ticker:AAPL");
        assert_eq!(payload["from"], "0");
        assert_eq!(payload["size"], "5");
        assert_eq!(payload["sort"][0]["filedAt"]["order"], "desc");
    }

    #[test]
    fn ticker_separators_are_normalized() {
        assert_eq!(normalize_filing_ticker(" brk.b "), "BRK-B");
        assert_eq!(normalize_filing_ticker("AAPL"), "AAPL");
    }

    #[test]
    fn blank_key_disables_client() {
        let client = FilingsClient::with_base_url("  ", 5, "https://api.filings.example").unwrap();
        assert!(!client.is_enabled());
        assert!(test_client("https://api.filings.example").is_enabled());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            FilingsClient::with_base_url("k", 5, "not a url"),
            Err(FilingsError::InvalidBaseUrl { .. })
        ));
    }
}
