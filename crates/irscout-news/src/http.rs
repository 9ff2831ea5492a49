//! `reqwest` client for feed and IR page traffic.

use std::time::Duration;

use reqwest::Client;

use crate::error::NewsError;

/// Builds the client shared by all news fetchers.
///
/// Sends a browser-like `User-Agent` and does not validate TLS certificates.
///
/// # Errors
///
/// Returns [`NewsError::Http`] if the client cannot be constructed.
pub fn build_news_client(timeout_secs: u64, user_agent: &str) -> Result<Client, NewsError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(client)
}
