//! Concurrent multi-source fetch, merge and ranking.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use futures::stream::{self, StreamExt};
use irscout_core::{AppConfig, NewsItem, NewsSource};
use reqwest::Client;

use crate::error::NewsError;
use crate::http::build_news_client;
use crate::sources::official_ir::ExtractionPolicy;
use crate::sources::{fetch_aggregate, fetch_official_ir, fetch_social, FeedEndpoints};

pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Collects recent news for a ticker from every [`NewsSource`].
pub struct NewsAggregator {
    client: Client,
    endpoints: FeedEndpoints,
    policy: ExtractionPolicy,
    concurrency: usize,
    max_items: usize,
}

impl NewsAggregator {
    #[must_use]
    pub fn new(
        client: Client,
        endpoints: FeedEndpoints,
        policy: ExtractionPolicy,
        concurrency: usize,
        max_items: usize,
    ) -> Self {
        Self {
            client,
            endpoints,
            policy,
            concurrency: concurrency.max(1),
            max_items,
        }
    }

    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, NewsError> {
        Self::from_config_with_endpoints(config, FeedEndpoints::default())
    }

    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the HTTP client cannot be built.
    pub fn from_config_with_endpoints(
        config: &AppConfig,
        endpoints: FeedEndpoints,
    ) -> Result<Self, NewsError> {
        let client = build_news_client(config.request_timeout_secs, &config.user_agent)?;
        let policy = ExtractionPolicy {
            max_ancestor_depth: config.ir_ancestor_depth,
            min_headline_chars: config.ir_min_headline_chars,
            ..ExtractionPolicy::default()
        };
        Ok(Self::new(
            client,
            endpoints,
            policy,
            config.fetch_concurrency,
            config.max_items,
        ))
    }

    /// Recent items from the last `lookback_days`, newest first. Never fails;
    /// a source that errors contributes nothing.
    pub async fn gather(&self, ticker: &str, ir_url: &str, lookback_days: u32) -> Vec<NewsItem> {
        let cutoff = lookback_cutoff(Utc::now(), lookback_days);
        self.gather_since(ticker, ir_url, cutoff).await
    }

    /// Like [`NewsAggregator::gather`] with an explicit cutoff instant.
    pub async fn gather_since(
        &self,
        ticker: &str,
        ir_url: &str,
        cutoff: DateTime<Utc>,
    ) -> Vec<NewsItem> {
        let ticker = ticker.trim().to_uppercase();

        let batches: Vec<Vec<NewsItem>> = stream::iter(NewsSource::ALL)
            .map(|source| self.fetch_source(source, &ticker, ir_url, cutoff))
            .buffered(self.concurrency)
            .collect()
            .await;

        let fetched: usize = batches.iter().map(Vec::len).sum();
        let items = merge_items(batches, cutoff.date_naive(), self.max_items);
        tracing::info!(
            ticker = %ticker,
            fetched,
            kept = items.len(),
            "aggregated news"
        );
        items
    }

    async fn fetch_source(
        &self,
        source: NewsSource,
        ticker: &str,
        ir_url: &str,
        cutoff: DateTime<Utc>,
    ) -> Vec<NewsItem> {
        match source {
            NewsSource::Aggregate => {
                fetch_aggregate(&self.client, &self.endpoints.aggregate_base_url, ticker, cutoff)
                    .await
            }
            NewsSource::Social => {
                fetch_social(&self.client, &self.endpoints.social_base_url, ticker, cutoff).await
            }
            NewsSource::OfficialIr => {
                fetch_official_ir(&self.client, ir_url, ticker, cutoff, self.policy).await
            }
        }
    }
}

/// `now` minus `lookback_days`, clamped to the earliest representable instant.
#[must_use]
pub fn lookback_cutoff(now: DateTime<Utc>, lookback_days: u32) -> DateTime<Utc> {
    TimeDelta::try_days(i64::from(lookback_days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Flattens per-source batches in the order given, drops items dated before
/// `cutoff`, keeps the first item per link, sorts newest first (stable) and
/// keeps at most `cap` items.
#[must_use]
pub fn merge_items(batches: Vec<Vec<NewsItem>>, cutoff: NaiveDate, cap: usize) -> Vec<NewsItem> {
    let mut seen = HashSet::new();
    let mut merged: Vec<NewsItem> = batches
        .into_iter()
        .flatten()
        .filter(|item| item.date() >= cutoff)
        .filter(|item| seen.insert(item.link().to_string()))
        .collect();

    merged.sort_by(|a, b| b.date().cmp(&a.date()));
    merged.truncate(cap);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn item(d: u32, link: &str, source: NewsSource) -> NewsItem {
        NewsItem::new("ACME", day(d), &format!("Headline {link}"), link, source)
    }

    #[test]
    fn first_occurrence_wins_across_sources() {
        let batches = vec![
            vec![item(14, "https://x.example/a", NewsSource::Aggregate)],
            vec![item(14, "https://x.example/a", NewsSource::Social)],
        ];
        let merged = merge_items(batches, day(7), 100);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source(), NewsSource::Aggregate);
    }

    #[test]
    fn sorted_newest_first_with_stable_ties() {
        let batches = vec![
            vec![
                item(10, "https://x.example/1", NewsSource::Aggregate),
                item(12, "https://x.example/2", NewsSource::Aggregate),
            ],
            vec![item(12, "https://x.example/3", NewsSource::Social)],
            vec![item(11, "https://x.example/4", NewsSource::OfficialIr)],
        ];
        let links: Vec<String> = merge_items(batches, day(7), 100)
            .iter()
            .map(|i| i.link().to_string())
            .collect();
        assert_eq!(
            links,
            vec![
                "https://x.example/2",
                "https://x.example/3",
                "https://x.example/4",
                "https://x.example/1",
            ]
        );
    }

    #[test]
    fn items_before_cutoff_are_dropped() {
        let batches = vec![vec![
            item(6, "https://x.example/old", NewsSource::OfficialIr),
            item(7, "https://x.example/edge", NewsSource::OfficialIr),
        ]];
        let merged = merge_items(batches, day(7), 100);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].link(), "https://x.example/edge");
    }

    #[test]
    fn output_is_capped() {
        let batch: Vec<NewsItem> = (0..150)
            .map(|i| item(8 + (i % 7), &format!("https://x.example/{i}"), NewsSource::Social))
            .collect();
        let merged = merge_items(vec![batch], day(7), DEFAULT_MAX_ITEMS);
        assert_eq!(merged.len(), DEFAULT_MAX_ITEMS);
        assert!(merged.windows(2).all(|w| w[0].date() >= w[1].date()));
    }

    #[test]
    fn cutoff_subtracts_lookback_window() {
        let now = DateTime::parse_from_rfc3339("2026-10-16T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(lookback_cutoff(now, 7).date_naive(), day(9));
        assert_eq!(lookback_cutoff(now, 0), now);
    }

    #[test]
    fn huge_lookback_clamps_instead_of_overflowing() {
        assert_eq!(lookback_cutoff(Utc::now(), u32::MAX), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn empty_batches_merge_to_empty() {
        assert!(merge_items(vec![Vec::new(), Vec::new(), Vec::new()], day(7), 100).is_empty());
    }
}
