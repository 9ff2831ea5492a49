//! Shared `reqwest` client for discovery traffic.

use std::time::Duration;

use reqwest::Client;

use crate::error::ResolverError;

/// Builds the client used for probing, profile lookups and web search.
///
/// Sends a browser-like `User-Agent` and does not validate TLS certificates.
///
/// # Errors
///
/// Returns [`ResolverError::Http`] if the client cannot be constructed.
pub fn build_discovery_client(
    timeout_secs: u64,
    user_agent: &str,
) -> Result<Client, ResolverError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(client)
}
