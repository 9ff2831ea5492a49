//! Social discussion search feed.

use chrono::{DateTime, Utc};
use irscout_core::{NewsItem, NewsSource};
use reqwest::Client;

use super::feed::fetch_feed_items;

const FORUM_PATH: &str = "r/wallstreetbets/search.rss";

pub(crate) async fn fetch_social(
    client: &Client,
    base_url: &str,
    ticker: &str,
    cutoff: DateTime<Utc>,
) -> Vec<NewsItem> {
    let url = format!("{}/{FORUM_PATH}", base_url.trim_end_matches('/'));
    let query = [("q", ticker), ("sort", "new"), ("restrict_sr", "on")];

    match fetch_feed_items(client, &url, &query, ticker, NewsSource::Social, cutoff).await {
        Ok(items) => {
            tracing::debug!(ticker, count = items.len(), "collected social posts");
            items
        }
        Err(e) => {
            tracing::warn!(
                ticker,
                source = "social",
                error = %e,
                "social feed fetch failed"
            );
            Vec::new()
        }
    }
}
