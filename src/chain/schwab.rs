//! Schwab market data client
//!
//! Fetches option chains from the `/chains` endpoint of the Schwab market
//! data API. Token acquisition is handled elsewhere; the client only attaches
//! a bearer token when one is configured.

use super::{ChainRequest, FetchError, OptionChainResponse, QuoteFetcher};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;

/// Schwab market data API base URL
pub const SCHWAB_API_URL: &str = "https://api.schwabapi.com/marketdata/v1";

/// Configuration for the Schwab client
#[derive(Debug, Clone)]
pub struct SchwabConfig {
    /// Base URL for the market data API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// OAuth bearer token
    pub access_token: Option<String>,
}

impl Default for SchwabConfig {
    fn default() -> Self {
        Self {
            base_url: SCHWAB_API_URL.to_string(),
            timeout: Duration::from_secs(10),
            access_token: None,
        }
    }
}

/// Option chain client for the Schwab market data API
pub struct SchwabClient {
    config: SchwabConfig,
    client: Client,
}

impl SchwabClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: SchwabConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Query parameters for a chain request
    fn query_params(request: &ChainRequest) -> Vec<(&'static str, String)> {
        vec![
            ("symbol", request.ticker.to_string()),
            ("contractType", request.contract_type.as_param().to_string()),
            ("strikeCount", request.strike_count.to_string()),
            ("fromDate", request.window.from_param()),
            ("toDate", request.window.to_param()),
        ]
    }

    fn chains_url(&self) -> String {
        format!("{}/chains", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuoteFetcher for SchwabClient {
    async fn fetch_chain(&self, request: &ChainRequest) -> Result<OptionChainResponse, FetchError> {
        let url = self.chains_url();

        tracing::trace!(url = %url, ticker = %request.ticker, window = %request.window, "Fetching option chain");

        let mut builder = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(&Self::query_params(request));

        if let Some(ref token) = self.config.access_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        OptionChainResponse::from_json(request.contract_type, &body)
    }
}
