//! Multi-source news aggregation and keyword summaries for one ticker.
//!
//! Three independent sources (a finance-news feed, a social discussion feed
//! and a heuristic scrape of the company's IR page) are fetched concurrently
//! and merged into one newest-first list with one item per link. A source
//! that fails contributes nothing.

pub mod aggregator;
pub mod error;
pub mod http;
pub mod sources;
pub mod summarizer;

pub use aggregator::{lookback_cutoff, merge_items, NewsAggregator};
pub use error::NewsError;
pub use http::build_news_client;
pub use sources::official_ir::{extract_ir_items, ExtractionPolicy};
pub use sources::FeedEndpoints;
pub use summarizer::{categorize, summarize, Category};
