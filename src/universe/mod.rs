//! Ticker universe
//!
//! Fetches the list of symbols to scan and normalizes raw entries into
//! [`Ticker`] values.

mod file;
mod sec;

pub use file::FileTickerSource;
pub use sec::{parse_ticker_txt, SecConfig, SecTickerSource, SEC_TICKERS_URL};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Case-normalized equity symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

/// Raw text that does not normalize to a ticker
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid ticker symbol: {0:?}")]
pub struct InvalidTicker(pub String);

impl Ticker {
    /// Trim and uppercase a raw symbol, rejecting anything that is not a plausible ticker
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '/'));
        if !valid {
            return None;
        }
        Some(Self(trimmed.to_ascii_uppercase()))
    }

    /// Normalize a universe entry; only JSON strings can be tickers
    pub fn from_entry(entry: &Value) -> Option<Self> {
        entry.as_str().and_then(Self::parse)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = InvalidTicker;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw).ok_or(InvalidTicker(raw))
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the symbols to scan.
///
/// Entries are raw JSON values because the universe is provider-controlled and
/// not guaranteed to contain only strings. A source that cannot be reached
/// returns an empty list rather than failing.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetch the universe in provider order
    async fn fetch_tickers(&self) -> Vec<Value>;
}
