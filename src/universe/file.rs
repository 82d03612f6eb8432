//! Local file ticker source
//!
//! Accepts either a JSON array (entries passed through verbatim) or a plain
//! text listing with the symbol in the first column of each line.

use super::TickerSource;
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Ticker universe read from disk
pub struct FileTickerSource {
    path: PathBuf,
}

impl FileTickerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse file contents into raw universe entries
    pub fn parse(content: &str) -> Vec<Value> {
        if let Ok(Value::Array(entries)) = serde_json::from_str::<Value>(content) {
            return entries;
        }

        content
            .lines()
            .filter_map(|line| {
                line.split(|c: char| c == '\t' || c == ',' || c.is_whitespace())
                    .find(|s| !s.is_empty())
            })
            .map(|symbol| Value::String(symbol.to_string()))
            .collect()
    }
}

#[async_trait]
impl TickerSource for FileTickerSource {
    async fn fetch_tickers(&self) -> Vec<Value> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let tickers = Self::parse(&content);
                tracing::info!(path = ?self.path, count = tickers.len(), "Loaded ticker file");
                tickers
            }
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to read ticker file");
                Vec::new()
            }
        }
    }
}
