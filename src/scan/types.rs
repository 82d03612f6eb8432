//! Scan outcome types

use crate::universe::Ticker;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// One ticker that completed both fetches.
///
/// Field names match the report columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(rename = "Ticker")]
    pub ticker: Ticker,
    /// Near-term call last-traded price
    #[serde(rename = "Week_Last_Price")]
    pub near_price: Option<Decimal>,
    /// Far-term call last-traded price
    #[serde(rename = "Year_Last_Price")]
    pub far_price: Option<Decimal>,
    /// far_price / near_price
    #[serde(rename = "Spread_Ratio")]
    pub ratio: Option<Decimal>,
}

/// Which of the two fetches a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leg {
    Near,
    Far,
}

impl Leg {
    pub fn as_str(&self) -> &'static str {
        match self {
            Leg::Near => "near",
            Leg::Far => "far",
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Near => f.write_str("near-term"),
            Leg::Far => f.write_str("far-term"),
        }
    }
}

/// Why a ticker produced no record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Entry is not a usable symbol string
    InvalidSymbol,
    /// Ticker already scanned in this run
    DuplicateSymbol,
    /// Network failure or non-success status
    Transport { leg: Leg, message: String },
    /// Response body lacks the expected structure
    MalformedResponse { leg: Leg, message: String },
    /// No last-traded price in one or both chains
    MissingPriceData {
        near: Option<Decimal>,
        far: Option<Decimal>,
    },
    /// Both prices present but unusable for a ratio (zero or negative)
    InvalidRatioInput { near: Decimal, far: Decimal },
}

impl SkipReason {
    /// Stable label for metrics and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            SkipReason::InvalidSymbol => "invalid_symbol",
            SkipReason::DuplicateSymbol => "duplicate_symbol",
            SkipReason::Transport { .. } => "transport",
            SkipReason::MalformedResponse { .. } => "malformed_response",
            SkipReason::MissingPriceData { .. } => "missing_price",
            SkipReason::InvalidRatioInput { .. } => "invalid_ratio_input",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidSymbol => f.write_str("not a valid symbol"),
            SkipReason::DuplicateSymbol => f.write_str("duplicate symbol"),
            SkipReason::Transport { leg, message } => {
                write!(f, "{} request failed: {}", leg, message)
            }
            SkipReason::MalformedResponse { leg, message } => {
                write!(f, "{} response malformed: {}", leg, message)
            }
            SkipReason::MissingPriceData { near, far } => {
                let missing = match (near, far) {
                    (None, None) => "near-term and far-term",
                    (None, Some(_)) => "near-term",
                    _ => "far-term",
                };
                write!(f, "missing {} last price", missing)
            }
            SkipReason::InvalidRatioInput { near, far } => {
                write!(f, "unusable ratio inputs (near={}, far={})", near, far)
            }
        }
    }
}

/// Result of scanning one universe entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerOutcome {
    Success(ScanRecord),
    Skipped {
        /// Normalized ticker, or the raw entry text when it was not a symbol
        ticker: String,
        reason: SkipReason,
    },
}

impl TickerOutcome {
    pub fn record(&self) -> Option<&ScanRecord> {
        match self {
            TickerOutcome::Success(record) => Some(record),
            TickerOutcome::Skipped { .. } => None,
        }
    }
}

/// Outcomes of one scan run, in universe order
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub run_id: Uuid,
    pub outcomes: Vec<TickerOutcome>,
}

impl ScanReport {
    pub fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            outcomes: Vec::new(),
        }
    }

    /// Records in encounter order
    pub fn records(&self) -> impl Iterator<Item = &ScanRecord> {
        self.outcomes.iter().filter_map(TickerOutcome::record)
    }

    /// Skipped entries in encounter order
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            TickerOutcome::Skipped { ticker, reason } => Some((ticker.as_str(), reason)),
            TickerOutcome::Success(_) => None,
        })
    }

    pub fn into_records(self) -> Vec<ScanRecord> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                TickerOutcome::Success(record) => Some(record),
                TickerOutcome::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn summary(&self) -> ScanSummary {
        let mut by_reason: BTreeMap<&'static str, usize> = BTreeMap::new();
        for (_, reason) in self.skipped() {
            *by_reason.entry(reason.kind()).or_insert(0) += 1;
        }
        let skipped: usize = by_reason.values().sum();

        ScanSummary {
            run_id: self.run_id,
            processed: self.outcomes.len(),
            succeeded: self.outcomes.len() - skipped,
            skipped,
            by_reason,
        }
    }
}

/// Counts for a finished scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub run_id: Uuid,
    pub processed: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub by_reason: BTreeMap<&'static str, usize>,
}
