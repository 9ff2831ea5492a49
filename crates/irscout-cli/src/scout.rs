//! `scout` and `resolve` command handlers.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use irscout_core::AppConfig;
use irscout_filings::FilingsClient;
use irscout_news::{summarize, NewsAggregator};
use irscout_resolver::IrResolver;

use crate::report::{ResolvedTicker, TickerReport};

#[derive(Debug, Clone)]
pub(crate) struct ScoutOptions {
    pub lookback_days: u32,
    pub filings_limit: u32,
    pub json: bool,
}

/// Resolves, gathers and summarizes every ticker, then prints the reports in
/// the order the tickers were given.
///
/// # Errors
///
/// Returns an error if an HTTP client cannot be built or the output cannot
/// be serialized. Per-ticker network failures only degrade that ticker's
/// report.
pub(crate) async fn run_scout(
    config: &AppConfig,
    tickers: &[String],
    options: &ScoutOptions,
) -> anyhow::Result<()> {
    let resolver = IrResolver::from_config(config)?;
    let aggregator = NewsAggregator::from_config(config)?;
    let filings = FilingsClient::new(
        config.sec_api_key.as_deref().unwrap_or_default(),
        config.request_timeout_secs,
    )?;
    if !filings.is_enabled() {
        tracing::info!("SEC_API_KEY not set; filings are skipped");
    }

    let tickers = normalize_tickers(tickers);
    tracing::info!(
        tickers = tickers.len(),
        lookback_days = options.lookback_days,
        "scouting tickers"
    );

    let reports: Vec<TickerReport> = stream::iter(tickers)
        .map(|ticker| scout_ticker(&resolver, &aggregator, &filings, ticker, options))
        .buffered(config.max_concurrent_tickers)
        .collect()
        .await;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{report}");
        }
    }
    Ok(())
}

async fn scout_ticker(
    resolver: &IrResolver,
    aggregator: &NewsAggregator,
    filings: &FilingsClient,
    ticker: String,
    options: &ScoutOptions,
) -> TickerReport {
    let ir_url = resolver.resolve(&ticker).await;

    let (news, filings) = tokio::join!(
        aggregator.gather(&ticker, &ir_url, options.lookback_days),
        filings.recent_filings(&ticker, options.filings_limit),
    );

    let summary = summarize(&news, &filings);
    tracing::info!(
        ticker = %ticker,
        news = news.len(),
        filings = filings.len(),
        summary = %summary,
        "ticker scouted"
    );

    TickerReport {
        ticker,
        ir_url,
        summary,
        news,
        filings,
    }
}

/// Prints the IR page resolved for each ticker.
///
/// # Errors
///
/// Returns an error if the resolver cannot be built or the output cannot be
/// serialized.
pub(crate) async fn run_resolve(
    config: &AppConfig,
    tickers: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let resolver = IrResolver::from_config(config)?;

    let resolved: Vec<ResolvedTicker> = stream::iter(normalize_tickers(tickers))
        .map(|ticker| {
            let resolver = &resolver;
            async move {
                let ir_url = resolver.resolve(&ticker).await;
                ResolvedTicker { ticker, ir_url }
            }
        })
        .buffered(config.max_concurrent_tickers)
        .collect()
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
    } else {
        for entry in &resolved {
            println!("{entry}");
        }
    }
    Ok(())
}

/// Trimmed, uppercased, non-empty tickers with duplicates removed, keeping
/// first-seen order.
pub(crate) fn normalize_tickers(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect()
}
