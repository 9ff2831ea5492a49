//! Shared data model and configuration for irscout.

pub mod app_config;
pub mod config;
pub mod items;

pub use app_config::{AppConfig, ProbePreference};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use items::{FilingItem, NewsItem, NewsSource, MAX_HEADLINE_CHARS};
