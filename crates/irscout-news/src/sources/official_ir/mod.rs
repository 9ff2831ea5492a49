//! Heuristic press-release extraction from a company's IR page.
//!
//! IR pages have no common markup. The scan looks for short text nodes that
//! read like a date, then climbs a bounded number of ancestors looking for
//! the nearest link with headline-length text.

mod dates;

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use irscout_core::{NewsItem, NewsSource};
use reqwest::{Client, Url};
use scraper::{ElementRef, Html, Selector};

use crate::error::NewsError;

pub use dates::{looks_like_date, parse_lenient_date};

pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 6;
pub const DEFAULT_MIN_HEADLINE_CHARS: usize = 12;
pub const DEFAULT_MAX_DATE_TEXT_CHARS: usize = 160;

/// Date candidates shorter than this are never considered.
const MIN_DATE_TEXT_CHARS: usize = 5;

static CONTENT_NODES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div, p, li, span, td, a").expect("valid content selector"));

static LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid link selector"));

/// Thresholds for the date-then-link scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionPolicy {
    /// Levels climbed from the date node, the node itself included.
    pub max_ancestor_depth: usize,
    /// A link's text must be strictly longer than this to count as a headline.
    pub min_headline_chars: usize,
    /// Date candidates longer than this are containers, not dates.
    pub max_date_text_chars: usize,
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            min_headline_chars: DEFAULT_MIN_HEADLINE_CHARS,
            max_date_text_chars: DEFAULT_MAX_DATE_TEXT_CHARS,
        }
    }
}

pub(crate) async fn fetch_official_ir(
    client: &Client,
    ir_url: &str,
    ticker: &str,
    cutoff: DateTime<Utc>,
    policy: ExtractionPolicy,
) -> Vec<NewsItem> {
    match try_fetch_official_ir(client, ir_url, ticker, cutoff, policy).await {
        Ok(items) => {
            tracing::debug!(ticker, url = ir_url, count = items.len(), "scraped IR page");
            items
        }
        Err(e) => {
            tracing::warn!(
                ticker,
                source = "official_ir",
                url = ir_url,
                error = %e,
                "IR page scrape failed"
            );
            Vec::new()
        }
    }
}

async fn try_fetch_official_ir(
    client: &Client,
    ir_url: &str,
    ticker: &str,
    cutoff: DateTime<Utc>,
    policy: ExtractionPolicy,
) -> Result<Vec<NewsItem>, NewsError> {
    let response = client.get(ir_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(NewsError::UnexpectedStatus {
            status: status.as_u16(),
            url: ir_url.to_string(),
        });
    }
    let page_url = response.url().clone();
    let body = response.text().await?;
    Ok(extract_ir_items(
        &body,
        &page_url,
        ticker,
        cutoff.date_naive(),
        policy,
    ))
}

/// Scans `html` for dated headline links on or after `cutoff`.
///
/// Relative links are resolved against `page_url`. Each distinct
/// (date, link) pair is emitted once, in document order.
#[must_use]
pub fn extract_ir_items(
    html: &str,
    page_url: &Url,
    ticker: &str,
    cutoff: NaiveDate,
    policy: ExtractionPolicy,
) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();
    let mut items = Vec::new();

    for node in document.select(&CONTENT_NODES) {
        let text = normalized_text(node);
        let len = text.chars().count();
        if len < MIN_DATE_TEXT_CHARS || len > policy.max_date_text_chars {
            continue;
        }
        if !looks_like_date(&text) {
            continue;
        }
        let Some(date) = parse_lenient_date(&text) else {
            continue;
        };
        if date < cutoff {
            continue;
        }
        let Some((href, headline)) = nearest_headline_link(node, policy) else {
            continue;
        };
        let Some(link) = resolve_link(page_url, &href) else {
            continue;
        };
        if seen.insert((date, link.clone())) {
            items.push(NewsItem::new(
                ticker,
                date,
                &headline,
                &link,
                NewsSource::OfficialIr,
            ));
        }
    }

    items
}

fn normalized_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Climbs from `start` and returns the first `(href, text)` headline link
/// found at the lowest level that has one.
fn nearest_headline_link(
    start: ElementRef<'_>,
    policy: ExtractionPolicy,
) -> Option<(String, String)> {
    let mut current = Some(start);
    for _ in 0..policy.max_ancestor_depth {
        let node = current?;
        let found = node.select(&LINKS).find_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            let text = normalized_text(anchor);
            (!href.is_empty() && text.chars().count() > policy.min_headline_chars)
                .then(|| (href.to_string(), text))
        });
        if found.is_some() {
            return found;
        }
        current = node.parent().and_then(ElementRef::wrap);
    }
    None
}

/// Absolute HTTP(S) form of `href`, or `None` for fragments and other schemes.
fn resolve_link(page_url: &Url, href: &str) -> Option<String> {
    if href.starts_with('#') {
        return None;
    }
    let resolved = page_url.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then(|| resolved.to_string())
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
