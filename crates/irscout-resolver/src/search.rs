//! General web-search fallback for IR page discovery.

use std::collections::HashSet;

use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{Html, Selector};

use crate::error::ResolverError;

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.google.com";

/// Text query in, ordered result URLs out.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Host of the search provider itself, e.g. `www.google.com`.
    fn provider_host(&self) -> &str;

    /// Result URLs in ranking order. Failures yield an empty list.
    async fn search(&self, query: &str, max_results: usize) -> Vec<String>;
}

/// Scrapes a search engine's HTML results page.
pub struct HttpWebSearch {
    client: Client,
    base_url: Url,
    provider_host: String,
}

impl HttpWebSearch {
    /// # Errors
    ///
    /// Returns [`ResolverError::InvalidUrl`] if `base_url` does not parse or has no host.
    pub fn new(client: Client, base_url: &str) -> Result<Self, ResolverError> {
        let invalid = |reason: String| ResolverError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let provider_host = parsed
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?
            .to_string();
        Ok(Self {
            client,
            base_url: parsed,
            provider_host,
        })
    }

    fn search_url(&self, query: &str, max_results: usize) -> Result<Url, ResolverError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| ResolverError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("num", &max_results.to_string())
            .append_pair("hl", "en");
        Ok(url)
    }

    async fn fetch_results(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<String>, ResolverError> {
        let url = self.search_url(query, max_results)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolverError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        let mut links = extract_result_links(&body, &self.base_url);
        links.truncate(max_results);
        Ok(links)
    }
}

#[async_trait]
impl WebSearch for HttpWebSearch {
    fn provider_host(&self) -> &str {
        &self.provider_host
    }

    async fn search(&self, query: &str, max_results: usize) -> Vec<String> {
        match self.fetch_results(query, max_results).await {
            Ok(links) => {
                tracing::debug!(query, results = links.len(), "web search finished");
                links
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "web search failed");
                Vec::new()
            }
        }
    }
}

/// Absolute result links from a results page, in document order.
///
/// Redirect links of the form `/url?q=<target>` are unwrapped.
#[must_use]
pub fn extract_result_links(html: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| unwrap_result_href(href.trim(), base))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

fn unwrap_result_href(href: &str, base: &Url) -> Option<String> {
    let target = if href.starts_with("/url?") {
        let redirect = base.join(href).ok()?;
        redirect
            .query_pairs()
            .find(|(k, _)| k == "q" || k == "url")
            .map(|(_, v)| v.into_owned())?
    } else {
        href.to_string()
    };

    let parsed = Url::parse(&target).ok()?;
    matches!(parsed.scheme(), "http" | "https").then(|| parsed.to_string())
}

/// True when `host` is the search provider or one of its subdomains.
#[must_use]
pub fn is_provider_host(host: &str, provider_host: &str) -> bool {
    let host = host.trim_start_matches("www.");
    let provider = provider_host.trim_start_matches("www.");
    host == provider || host.ends_with(&format!(".{provider}"))
}

/// First result that does not point back at the search provider.
#[must_use]
pub fn first_external_result(results: &[String], provider_host: &str) -> Option<String> {
    results
        .iter()
        .find(|result| {
            Url::parse(result)
                .ok()
                .and_then(|u| u.host_str().map(|h| !is_provider_host(h, provider_host)))
                .unwrap_or(false)
        })
        .cloned()
}
