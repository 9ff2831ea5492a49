//! Ticker → Investor-Relations URL resolution.
//!
//! Resolution walks a fallback chain: curated static map, persisted cache,
//! concurrent probing of guessed candidates, a rate-limited web search, and
//! finally a deterministic search-engine URL. [`IrResolver::resolve`] never
//! fails; every step downgrades its errors to "no result".

pub mod cache;
pub mod candidates;
pub mod error;
pub mod http;
pub mod known;
pub mod probe;
pub mod profile;
pub mod rate_limit;
pub mod resolver;
pub mod search;

pub use cache::TickerCache;
pub use error::{CacheError, ResolverError};
pub use probe::{CandidateProber, HttpReachability, Reachability};
pub use profile::{HttpProfileLookup, ProfileLookup};
pub use rate_limit::{Clock, SearchRateLimiter, SystemClock};
pub use resolver::{fallback_url, IrResolver, ResolverEndpoints};
pub use search::{HttpWebSearch, WebSearch};
