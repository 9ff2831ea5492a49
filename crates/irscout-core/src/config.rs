use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, ProbePreference};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Every variable is optional; the defaults reproduce the documented
/// behaviour (5s timeouts, pools of 3, 12s search spacing, 7-day window,
/// 100-item cap).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let cache_path = PathBuf::from(or_default("IRSCOUT_CACHE_PATH", "ticker_cache.json"));
    let log_level = or_default("IRSCOUT_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("IRSCOUT_REQUEST_TIMEOUT_SECS", "5")?;
    let user_agent = or_default("IRSCOUT_USER_AGENT", DEFAULT_USER_AGENT);

    let probe_concurrency = parse_positive("IRSCOUT_PROBE_CONCURRENCY", "3")?;
    let probe_preference = parse_probe_preference(&or_default("IRSCOUT_PROBE_PREFER", "longest"))
        .ok_or_else(|| {
            invalid(
                "IRSCOUT_PROBE_PREFER",
                "expected `longest` or `first`".to_string(),
            )
        })?;

    let search_min_interval_secs = parse_u64("IRSCOUT_SEARCH_MIN_INTERVAL_SECS", "12")?;
    let search_jitter_min_ms = parse_u64("IRSCOUT_SEARCH_JITTER_MIN_MS", "2000")?;
    let search_jitter_max_ms = parse_u64("IRSCOUT_SEARCH_JITTER_MAX_MS", "5000")?;
    if search_jitter_min_ms > search_jitter_max_ms {
        return Err(invalid(
            "IRSCOUT_SEARCH_JITTER_MAX_MS",
            format!("must be >= IRSCOUT_SEARCH_JITTER_MIN_MS ({search_jitter_min_ms})"),
        ));
    }

    let fetch_concurrency = parse_positive("IRSCOUT_FETCH_CONCURRENCY", "3")?;
    let lookback_days = parse_u32("IRSCOUT_LOOKBACK_DAYS", "7")?;
    let max_items = parse_positive("IRSCOUT_MAX_ITEMS", "100")?;
    let ir_ancestor_depth = parse_positive("IRSCOUT_IR_ANCESTOR_DEPTH", "6")?;
    let ir_min_headline_chars = or_default("IRSCOUT_IR_MIN_HEADLINE_CHARS", "12")
        .parse::<usize>()
        .map_err(|e| invalid("IRSCOUT_IR_MIN_HEADLINE_CHARS", e.to_string()))?;
    let max_concurrent_tickers = parse_positive("IRSCOUT_MAX_CONCURRENT_TICKERS", "1")?;
    let filings_limit = parse_u32("IRSCOUT_FILINGS_LIMIT", "5")?;
    let sec_api_key = lookup("SEC_API_KEY").ok().filter(|k| !k.trim().is_empty());

    Ok(AppConfig {
        cache_path,
        log_level,
        request_timeout_secs,
        user_agent,
        probe_concurrency,
        probe_preference,
        search_min_interval_secs,
        search_jitter_min_ms,
        search_jitter_max_ms,
        fetch_concurrency,
        lookback_days,
        max_items,
        ir_ancestor_depth,
        ir_min_headline_chars,
        max_concurrent_tickers,
        filings_limit,
        sec_api_key,
    })
}

/// Parse the probe tie-break setting. Case-insensitive.
fn parse_probe_preference(s: &str) -> Option<ProbePreference> {
    match s.trim().to_ascii_lowercase().as_str() {
        "longest" => Some(ProbePreference::Longest),
        "first" => Some(ProbePreference::First),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
