//! Finance-news headline feed.

use chrono::{DateTime, Utc};
use irscout_core::{NewsItem, NewsSource};
use reqwest::Client;

use super::feed::fetch_feed_items;

pub(crate) async fn fetch_aggregate(
    client: &Client,
    base_url: &str,
    ticker: &str,
    cutoff: DateTime<Utc>,
) -> Vec<NewsItem> {
    let url = format!("{}/rss/2.0/headline", base_url.trim_end_matches('/'));
    let query = [("s", ticker), ("region", "US"), ("lang", "en-US")];

    match fetch_feed_items(client, &url, &query, ticker, NewsSource::Aggregate, cutoff).await {
        Ok(items) => {
            tracing::debug!(ticker, count = items.len(), "collected aggregate headlines");
            items
        }
        Err(e) => {
            tracing::warn!(
                ticker,
                source = "aggregate",
                error = %e,
                "aggregate feed fetch failed"
            );
            Vec::new()
        }
    }
}
