//! News source fetchers.
//!
//! Each fetcher owns its failure handling: errors are logged at `warn` and
//! turned into an empty batch so one broken source never hides the others.

mod aggregate;
mod feed;
pub mod official_ir;
mod social;

pub(crate) use aggregate::fetch_aggregate;
pub(crate) use official_ir::fetch_official_ir;
pub(crate) use social::fetch_social;

pub const DEFAULT_AGGREGATE_BASE_URL: &str = "https://feeds.finance.yahoo.com";
pub const DEFAULT_SOCIAL_BASE_URL: &str = "https://www.reddit.com";

/// Base URLs of the two feed sources.
#[derive(Debug, Clone)]
pub struct FeedEndpoints {
    pub aggregate_base_url: String,
    pub social_base_url: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            aggregate_base_url: DEFAULT_AGGREGATE_BASE_URL.to_string(),
            social_base_url: DEFAULT_SOCIAL_BASE_URL.to_string(),
        }
    }
}
