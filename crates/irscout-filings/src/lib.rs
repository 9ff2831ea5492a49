//! Client for a full-text regulatory filings search API.

pub mod client;
pub mod error;
pub(crate) mod types;

pub use client::{normalize_filing_ticker, FilingsClient};
pub use error::FilingsError;
