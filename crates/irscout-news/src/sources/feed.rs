//! RSS 2.0 / Atom fetch and entry conversion shared by the feed sources.

use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Link};
use irscout_core::{NewsItem, NewsSource};
use reqwest::Client;

use crate::error::NewsError;

/// GETs `url` with `query` and converts the feed's recent entries.
pub(super) async fn fetch_feed_items(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    ticker: &str,
    source: NewsSource,
    cutoff: DateTime<Utc>,
) -> Result<Vec<NewsItem>, NewsError> {
    let response = client.get(url).query(query).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(NewsError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    let body = response.bytes().await?;
    parse_feed_items(&body, ticker, source, cutoff)
}

/// Parses a feed document and keeps entries published at or after `cutoff`.
///
/// Entries without a title, a link or a timestamp are skipped individually.
pub(crate) fn parse_feed_items(
    body: &[u8],
    ticker: &str,
    source: NewsSource,
    cutoff: DateTime<Utc>,
) -> Result<Vec<NewsItem>, NewsError> {
    let feed = feed_rs::parser::parse(body)?;
    Ok(feed
        .entries
        .into_iter()
        .filter_map(|entry| entry_to_item(entry, ticker, source, cutoff))
        .collect())
}

fn entry_to_item(
    entry: Entry,
    ticker: &str,
    source: NewsSource,
    cutoff: DateTime<Utc>,
) -> Option<NewsItem> {
    let published = entry.published.or(entry.updated)?;
    if published < cutoff {
        return None;
    }
    let link = primary_link(&entry.links)?;
    let headline = entry.title.map(|t| t.content)?;
    if headline.trim().is_empty() {
        return None;
    }
    Some(NewsItem::new(
        ticker,
        published.date_naive(),
        &headline,
        &link,
        source,
    ))
}

/// The `alternate` link if the entry marks one, otherwise the first link.
fn primary_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate"))
        .or_else(|| links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty())
}
