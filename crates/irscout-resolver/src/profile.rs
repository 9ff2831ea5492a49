//! Company website discovery from a finance profile page.

use async_trait::async_trait;
use reqwest::{Client, Url};
use scraper::{Html, Selector};

use crate::error::ResolverError;

pub const DEFAULT_PROFILE_BASE_URL: &str = "https://finance.yahoo.com";

/// Hosts that appear on every profile page and never point at the company.
const GENERIC_LINK_HOSTS: [&str; 3] = ["yahoo.com", "google.com", "twitter.com"];

/// Looks up a company's own website for a ticker.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// The company website without a trailing slash, if one was found.
    async fn company_site(&self, ticker: &str) -> Option<String>;
}

pub struct HttpProfileLookup {
    client: Client,
    base_url: Url,
}

impl HttpProfileLookup {
    /// # Errors
    ///
    /// Returns [`ResolverError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(client: Client, base_url: &str) -> Result<Self, ResolverError> {
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ResolverError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { client, base_url })
    }

    fn profile_url(&self, ticker: &str) -> Result<Url, ResolverError> {
        let relative = format!("quote/{ticker}/profile");
        self.base_url
            .join(&relative)
            .map_err(|e| ResolverError::InvalidUrl {
                url: relative,
                reason: e.to_string(),
            })
    }

    async fn fetch_company_site(&self, ticker: &str) -> Result<Option<String>, ResolverError> {
        let url = self.profile_url(ticker)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ResolverError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(discover_company_site(&body))
    }
}

#[async_trait]
impl ProfileLookup for HttpProfileLookup {
    async fn company_site(&self, ticker: &str) -> Option<String> {
        match self.fetch_company_site(ticker).await {
            Ok(site) => site,
            Err(e) => {
                tracing::warn!(ticker, error = %e, "profile page lookup failed");
                None
            }
        }
    }
}

/// First outbound absolute link that is not a generic portal link.
#[must_use]
pub fn discover_company_site(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").ok()?;

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .find(|href| {
            href.contains("http") && !GENERIC_LINK_HOSTS.iter().any(|host| href.contains(host))
        })
        .map(|href| href.trim_end_matches('/').to_string())
}
