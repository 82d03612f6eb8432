//! Scan orchestrator
//!
//! Walks the ticker universe in order and, for each ticker:
//! 1. Normalizes the entry (invalid and repeated symbols are skipped)
//! 2. Fetches and prices the near-term call chain
//! 3. Fetches and prices the far-term call chain
//! 4. Computes the spread ratio and emits a record
//!
//! Every failure is scoped to its ticker and reported as a skip; nothing
//! aborts the scan.

use super::ratio::compute_ratio;
use super::types::{Leg, ScanRecord, ScanReport, SkipReason, TickerOutcome};
use crate::chain::{extract_last_price, ChainRequest, ContractType, QuoteFetcher};
use crate::telemetry;
use crate::universe::Ticker;
use crate::window::DateWindow;
use rust_decimal::Decimal;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Contract type requested for both legs
    pub contract_type: ContractType,
    /// Strikes nearest the money requested per chain
    pub strike_count: u32,
    /// Tickers between progress log lines (0 disables)
    pub progress_interval: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            contract_type: ContractType::Call,
            strike_count: 1,
            progress_interval: 100,
        }
    }
}

/// Sequential per-ticker scan over a quote provider
pub struct ScanOrchestrator<F: QuoteFetcher> {
    fetcher: Arc<F>,
    config: ScanConfig,
}

impl<F: QuoteFetcher> ScanOrchestrator<F> {
    /// Create a new orchestrator
    pub fn new(fetcher: Arc<F>, config: ScanConfig) -> Self {
        Self { fetcher, config }
    }

    /// Create with default config
    pub fn with_defaults(fetcher: Arc<F>) -> Self {
        Self::new(fetcher, ScanConfig::default())
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan every universe entry in order.
    ///
    /// Each ticker's two fetches complete before the next ticker starts.
    pub async fn run(&self, entries: &[Value], near: DateWindow, far: DateWindow) -> ScanReport {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("scan", %run_id);

        async move {
            tracing::info!(
                tickers = entries.len(),
                near = %near,
                far = %far,
                "Starting scan"
            );

            let mut report = ScanReport::new(run_id);
            let mut seen: HashSet<Ticker> = HashSet::new();
            let mut records = 0usize;

            for (index, entry) in entries.iter().enumerate() {
                let outcome = match Ticker::from_entry(entry) {
                    None => TickerOutcome::Skipped {
                        ticker: entry_label(entry),
                        reason: SkipReason::InvalidSymbol,
                    },
                    Some(ticker) if seen.contains(&ticker) => TickerOutcome::Skipped {
                        ticker: ticker.to_string(),
                        reason: SkipReason::DuplicateSymbol,
                    },
                    Some(ticker) => {
                        let outcome = self.scan_ticker(&ticker, near, far).await;
                        seen.insert(ticker);
                        outcome
                    }
                };

                log_outcome(&outcome);
                telemetry::record_outcome(&outcome);
                if outcome.record().is_some() {
                    records += 1;
                }
                report.outcomes.push(outcome);

                let processed = index + 1;
                if self.config.progress_interval > 0
                    && processed % self.config.progress_interval == 0
                {
                    tracing::info!(processed, total = entries.len(), records, "Scan progress");
                }
            }

            let summary = report.summary();
            tracing::info!(
                processed = summary.processed,
                succeeded = summary.succeeded,
                skipped = summary.skipped,
                "Scan complete"
            );

            report
        }
        .instrument(span)
        .await
    }

    /// Scan a single normalized ticker
    pub async fn scan_ticker(
        &self,
        ticker: &Ticker,
        near: DateWindow,
        far: DateWindow,
    ) -> TickerOutcome {
        match self.price_ticker(ticker, near, far).await {
            Ok(record) => TickerOutcome::Success(record),
            Err(reason) => TickerOutcome::Skipped {
                ticker: ticker.to_string(),
                reason,
            },
        }
    }

    async fn price_ticker(
        &self,
        ticker: &Ticker,
        near: DateWindow,
        far: DateWindow,
    ) -> Result<ScanRecord, SkipReason> {
        let near_price = self.fetch_last_price(ticker, Leg::Near, near).await?;
        let far_price = self.fetch_last_price(ticker, Leg::Far, far).await?;

        match (near_price, far_price, compute_ratio(near_price, far_price)) {
            (_, _, Some(ratio)) => Ok(ScanRecord {
                ticker: ticker.clone(),
                near_price,
                far_price,
                ratio: Some(ratio),
            }),
            (Some(near), Some(far), None) => Err(SkipReason::InvalidRatioInput { near, far }),
            (near, far, None) => Err(SkipReason::MissingPriceData { near, far }),
        }
    }

    async fn fetch_last_price(
        &self,
        ticker: &Ticker,
        leg: Leg,
        window: DateWindow,
    ) -> Result<Option<Decimal>, SkipReason> {
        let request = ChainRequest {
            ticker: ticker.clone(),
            contract_type: self.config.contract_type,
            window,
            strike_count: self.config.strike_count,
        };

        let started = Instant::now();
        let result = self.fetcher.fetch_chain(&request).await;
        telemetry::record_fetch_latency(leg, started.elapsed());

        match result {
            Ok(chain) => Ok(extract_last_price(&chain)),
            Err(e) if e.is_malformed() => Err(SkipReason::MalformedResponse {
                leg,
                message: e.to_string(),
            }),
            Err(e) => Err(SkipReason::Transport {
                leg,
                message: e.to_string(),
            }),
        }
    }
}

/// Printable form of a raw universe entry
fn entry_label(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn log_outcome(outcome: &TickerOutcome) {
    match outcome {
        TickerOutcome::Success(record) => {
            tracing::debug!(
                ticker = %record.ticker,
                ratio = ?record.ratio,
                "Ticker scanned"
            );
        }
        TickerOutcome::Skipped {
            ticker,
            reason: reason @ (SkipReason::InvalidSymbol | SkipReason::DuplicateSymbol),
        } => {
            tracing::debug!(ticker = %ticker, reason = %reason, "Skipping entry");
        }
        TickerOutcome::Skipped { ticker, reason } => {
            tracing::warn!(ticker = %ticker, reason = %reason, "Skipping ticker");
        }
    }
}
