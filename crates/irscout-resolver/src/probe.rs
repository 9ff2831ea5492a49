//! Concurrent reachability probing of candidate IR URLs.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use irscout_core::ProbePreference;
use reqwest::Client;

/// Answers whether a URL currently serves a non-error response.
#[async_trait]
pub trait Reachability: Send + Sync {
    /// `Some(true)` when the URL answered with a status below 400,
    /// `Some(false)` for an error status, `None` when the request itself failed.
    async fn check(&self, url: &str) -> Option<bool>;
}

pub struct HttpReachability {
    client: Client,
}

impl HttpReachability {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Reachability for HttpReachability {
    async fn check(&self, url: &str) -> Option<bool> {
        match self.client.get(url).send().await {
            Ok(resp) => {
                let status = resp.status();
                tracing::debug!(url, status = status.as_u16(), "probed candidate");
                Some(status.as_u16() < 400)
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "candidate probe failed");
                None
            }
        }
    }
}

/// Probes candidate URLs with bounded concurrency and picks one reachable URL.
pub struct CandidateProber {
    reachability: Arc<dyn Reachability>,
    concurrency: usize,
    preference: ProbePreference,
}

impl CandidateProber {
    #[must_use]
    pub fn new(
        reachability: Arc<dyn Reachability>,
        concurrency: usize,
        preference: ProbePreference,
    ) -> Self {
        Self {
            reachability,
            concurrency: concurrency.max(1),
            preference,
        }
    }

    /// Checks every distinct URL and returns the preferred reachable one.
    ///
    /// Each check fails independently; a failed or erroring candidate is
    /// simply not eligible.
    pub async fn probe_all(&self, urls: &[String]) -> Option<String> {
        let mut seen = HashSet::new();
        let unique: Vec<&String> = urls.iter().filter(|u| seen.insert(u.as_str())).collect();

        let results: Vec<Option<String>> = stream::iter(unique)
            .map(|url| {
                let reachability = Arc::clone(&self.reachability);
                async move {
                    match reachability.check(url).await {
                        Some(true) => Some(url.clone()),
                        _ => None,
                    }
                }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let reachable: Vec<String> = results.into_iter().flatten().collect();
        tracing::debug!(
            candidates = seen.len(),
            reachable = reachable.len(),
            "candidate probing finished"
        );
        pick_candidate(self.preference, reachable)
    }
}

/// Applies the tie-break to reachable URLs given in candidate order.
///
/// With [`ProbePreference::Longest`], equal-length URLs resolve to the earlier one.
#[must_use]
pub fn pick_candidate(preference: ProbePreference, reachable: Vec<String>) -> Option<String> {
    match preference {
        ProbePreference::Longest => reachable
            .into_iter()
            .reduce(|best, next| if next.len() > best.len() { next } else { best }),
        ProbePreference::First => reachable.into_iter().next(),
    }
}
