//! SEC ticker list source
//!
//! Reads the tab-delimited `ticker\tcik` listing the SEC publishes for all
//! registered filers. The SEC rejects requests without a contact User-Agent.

use super::TickerSource;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// SEC ticker listing URL
pub const SEC_TICKERS_URL: &str = "https://www.sec.gov/include/ticker.txt";

/// Configuration for the SEC source
#[derive(Debug, Clone)]
pub struct SecConfig {
    /// Listing URL
    pub url: String,
    /// Contact User-Agent required by the SEC
    pub user_agent: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for SecConfig {
    fn default() -> Self {
        Self {
            url: SEC_TICKERS_URL.to_string(),
            user_agent: "Sample Company Name AdminContact@samplecompany.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Ticker universe backed by the SEC listing
pub struct SecTickerSource {
    config: SecConfig,
    client: Client,
}

impl SecTickerSource {
    /// Create a source with custom configuration
    pub fn with_config(config: SecConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, client })
    }

    async fn fetch_body(&self) -> anyhow::Result<String> {
        tracing::debug!(url = %self.config.url, "Fetching SEC ticker listing");

        let response = self.client.get(&self.config.url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("SEC listing request failed: {}", response.status());
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl TickerSource for SecTickerSource {
    async fn fetch_tickers(&self) -> Vec<Value> {
        match self.fetch_body().await {
            Ok(body) => {
                let tickers = parse_ticker_txt(&body);
                tracing::info!(count = tickers.len(), "Loaded SEC ticker universe");
                tickers
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch SEC ticker listing");
                Vec::new()
            }
        }
    }
}

/// Parse the `ticker\tcik` listing into raw entries, first column per line
pub fn parse_ticker_txt(body: &str) -> Vec<Value> {
    body.lines()
        .filter_map(|line| line.split('\t').next())
        .map(str::trim)
        .filter(|symbol| !symbol.is_empty())
        .map(|symbol| Value::String(symbol.to_string()))
        .collect()
}
