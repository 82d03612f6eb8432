//! Option chain retrieval
//!
//! Provider interface for option-chain quotes, the schema-loose response
//! wrapper and last-traded price extraction.

mod extractor;
mod schwab;

pub use extractor::{extract_last_price, parse_price, LAST_PRICE_FIELD};
pub use schwab::{SchwabClient, SchwabConfig, SCHWAB_API_URL};

use crate::universe::Ticker;
use crate::window::DateWindow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Option contract type requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContractType {
    Call,
    Put,
}

impl ContractType {
    /// Provider query value
    pub fn as_param(&self) -> &'static str {
        match self {
            ContractType::Call => "CALL",
            ContractType::Put => "PUT",
        }
    }

    /// Key of the expiration map holding this contract type in a chain response
    pub fn exp_date_map_key(&self) -> &'static str {
        match self {
            ContractType::Call => "callExpDateMap",
            ContractType::Put => "putExpDateMap",
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// A single option-chain query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRequest {
    pub ticker: Ticker,
    pub contract_type: ContractType,
    pub window: DateWindow,
    /// Number of strikes nearest the money the provider should return
    pub strike_count: u32,
}

/// Failure fetching an option chain
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether the failure came from the response body rather than the transport
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::Malformed(_))
    }
}

/// Option-chain provider
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Fetch the chain for one ticker and window
    async fn fetch_chain(&self, request: &ChainRequest) -> Result<OptionChainResponse, FetchError>;
}

/// Raw option-chain response.
///
/// Shape: `{ "<type>ExpDateMap": { expiration: { strike: [record, ...] } } }`.
/// Nothing below the top-level object is guaranteed by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionChainResponse {
    contract_type: ContractType,
    body: Map<String, Value>,
}

impl OptionChainResponse {
    /// Wrap a parsed body; anything other than a JSON object is malformed
    pub fn from_value(contract_type: ContractType, value: Value) -> Result<Self, FetchError> {
        match value {
            Value::Object(body) => Ok(Self {
                contract_type,
                body,
            }),
            other => Err(FetchError::Malformed(format!(
                "expected JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a response body
    pub fn from_json(contract_type: ContractType, body: &str) -> Result<Self, FetchError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        Self::from_value(contract_type, value)
    }

    /// A response with no expirations
    pub fn empty(contract_type: ContractType) -> Self {
        Self {
            contract_type,
            body: Map::new(),
        }
    }

    pub fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    /// Expiration map for the requested contract type, if present and an object
    pub fn expirations(&self) -> Option<&Map<String, Value>> {
        self.body
            .get(self.contract_type.exp_date_map_key())
            .and_then(Value::as_object)
    }

    /// Provider status field, when sent
    pub fn status(&self) -> Option<&str> {
        self.body.get("status").and_then(Value::as_str)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
