use std::path::PathBuf;

/// Tie-break applied when several IR candidates are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePreference {
    /// Longest URL wins; longer paths tend to be the specific IR page.
    Longest,
    /// Earliest candidate in generation order wins.
    First,
}

impl std::fmt::Display for ProbePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbePreference::Longest => write!(f, "longest"),
            ProbePreference::First => write!(f, "first"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub cache_path: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub probe_concurrency: usize,
    pub probe_preference: ProbePreference,
    pub search_min_interval_secs: u64,
    pub search_jitter_min_ms: u64,
    pub search_jitter_max_ms: u64,
    pub fetch_concurrency: usize,
    pub lookback_days: u32,
    pub max_items: usize,
    pub ir_ancestor_depth: usize,
    pub ir_min_headline_chars: usize,
    pub max_concurrent_tickers: usize,
    pub filings_limit: u32,
    pub sec_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("cache_path", &self.cache_path)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("probe_concurrency", &self.probe_concurrency)
            .field("probe_preference", &self.probe_preference)
            .field("search_min_interval_secs", &self.search_min_interval_secs)
            .field("search_jitter_min_ms", &self.search_jitter_min_ms)
            .field("search_jitter_max_ms", &self.search_jitter_max_ms)
            .field("fetch_concurrency", &self.fetch_concurrency)
            .field("lookback_days", &self.lookback_days)
            .field("max_items", &self.max_items)
            .field("ir_ancestor_depth", &self.ir_ancestor_depth)
            .field("ir_min_headline_chars", &self.ir_min_headline_chars)
            .field("max_concurrent_tickers", &self.max_concurrent_tickers)
            .field("filings_limit", &self.filings_limit)
            .field(
                "sec_api_key",
                &self.sec_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
