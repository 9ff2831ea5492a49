//! Ticker → IR URL fallback chain.

use std::sync::Arc;
use std::time::Duration;

use irscout_core::AppConfig;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::cache::TickerCache;
use crate::candidates::candidate_urls;
use crate::error::ResolverError;
use crate::http::build_discovery_client;
use crate::known::known_ir_page;
use crate::probe::{CandidateProber, HttpReachability};
use crate::profile::{HttpProfileLookup, ProfileLookup, DEFAULT_PROFILE_BASE_URL};
use crate::rate_limit::{SearchRateLimiter, SystemClock};
use crate::search::{first_external_result, HttpWebSearch, WebSearch, DEFAULT_SEARCH_BASE_URL};

/// Number of search results inspected by the fallback.
const SEARCH_RESULT_LIMIT: usize = 3;

/// Base URLs of the discovery collaborators.
#[derive(Debug, Clone)]
pub struct ResolverEndpoints {
    pub profile_base_url: String,
    pub search_base_url: String,
}

impl Default for ResolverEndpoints {
    fn default() -> Self {
        Self {
            profile_base_url: DEFAULT_PROFILE_BASE_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
        }
    }
}

/// Resolves tickers to their most likely Investor-Relations page.
pub struct IrResolver {
    cache: Arc<TickerCache>,
    prober: CandidateProber,
    profile: Arc<dyn ProfileLookup>,
    search: Arc<dyn WebSearch>,
    limiter: Arc<SearchRateLimiter>,
}

impl IrResolver {
    #[must_use]
    pub fn new(
        cache: Arc<TickerCache>,
        prober: CandidateProber,
        profile: Arc<dyn ProfileLookup>,
        search: Arc<dyn WebSearch>,
        limiter: Arc<SearchRateLimiter>,
    ) -> Self {
        Self {
            cache,
            prober,
            profile,
            search,
            limiter,
        }
    }

    /// Builds a resolver with HTTP collaborators against the public endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ResolverError> {
        Self::from_config_with_endpoints(config, &ResolverEndpoints::default())
    }

    /// Like [`IrResolver::from_config`] but with custom collaborator base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ResolverError`] if the HTTP client cannot be built or an
    /// endpoint URL is invalid.
    pub fn from_config_with_endpoints(
        config: &AppConfig,
        endpoints: &ResolverEndpoints,
    ) -> Result<Self, ResolverError> {
        let client = build_discovery_client(config.request_timeout_secs, &config.user_agent)?;

        let cache = Arc::new(TickerCache::load(&config.cache_path));
        let prober = CandidateProber::new(
            Arc::new(HttpReachability::new(client.clone())),
            config.probe_concurrency,
            config.probe_preference,
        );
        let profile = Arc::new(HttpProfileLookup::new(
            client.clone(),
            &endpoints.profile_base_url,
        )?);
        let search = Arc::new(HttpWebSearch::new(client, &endpoints.search_base_url)?);
        let limiter = Arc::new(SearchRateLimiter::new(
            Arc::new(SystemClock),
            Duration::from_secs(config.search_min_interval_secs),
            config.search_jitter_min_ms,
            config.search_jitter_max_ms,
        ));

        Ok(Self::new(cache, prober, profile, search, limiter))
    }

    #[must_use]
    pub fn cache(&self) -> &TickerCache {
        &self.cache
    }

    /// Resolves `ticker` to a URL. Never fails.
    ///
    /// Order: static map, cache, candidate probing, web search, and a
    /// search-engine query URL as the last resort. Whatever wins is cached.
    pub async fn resolve(&self, ticker: &str) -> String {
        let ticker = ticker.trim().to_uppercase();

        if let Some(url) = known_ir_page(&ticker) {
            self.cache.put(&ticker, url);
            return url.to_string();
        }

        if let Some(url) = self.cache.get(&ticker) {
            tracing::debug!(ticker = %ticker, url = %url, "ticker cache hit");
            return url;
        }

        tracing::info!(ticker = %ticker, "discovering IR page");
        let url = match self.discover(&ticker).await {
            Some(url) => url,
            None => {
                let url = fallback_url(&ticker);
                tracing::warn!(
                    ticker = %ticker,
                    url = %url,
                    "no IR page found, using search fallback URL"
                );
                url
            }
        };

        self.cache.put(&ticker, &url);
        tracing::info!(ticker = %ticker, url = %url, "cached IR URL");
        url
    }

    async fn discover(&self, ticker: &str) -> Option<String> {
        let company_site = self.profile.company_site(ticker).await;
        let candidates = candidate_urls(ticker, company_site.as_deref());
        tracing::debug!(
            ticker,
            candidates = candidates.len(),
            company_site = company_site.as_deref().unwrap_or("-"),
            "probing IR candidates"
        );

        if let Some(url) = self.prober.probe_all(&candidates).await {
            return Some(url);
        }

        self.search_fallback(ticker).await
    }

    async fn search_fallback(&self, ticker: &str) -> Option<String> {
        self.limiter.acquire().await;
        tracing::warn!(ticker, "performing web search for IR page");

        let query = format!("{ticker} investor relations news");
        let results = self.search.search(&query, SEARCH_RESULT_LIMIT).await;
        first_external_result(&results, self.search.provider_host())
    }
}

/// Deterministic search-engine URL used when every other step fails.
#[must_use]
pub fn fallback_url(ticker: &str) -> String {
    let encoded = utf8_percent_encode(&ticker.trim().to_uppercase(), NON_ALPHANUMERIC).to_string();
    format!("https://www.google.com/search?q={encoded}+investor+relations+news")
}
