//! Prometheus metrics

use crate::scan::{Leg, TickerOutcome};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Universe entries processed
    TickersProcessed,
    /// Records emitted
    Records,
    /// Entries skipped, labelled by reason
    TickersSkipped,
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::TickersProcessed => "spread_scanner_tickers_processed_total",
            CounterMetric::Records => "spread_scanner_records_total",
            CounterMetric::TickersSkipped => "spread_scanner_tickers_skipped_total",
        }
    }
}

/// Chain fetch latency histogram name
pub const CHAIN_FETCH_LATENCY: &str = "spread_scanner_chain_fetch_latency_ms";

/// Record how long one chain fetch took
pub fn record_fetch_latency(leg: Leg, duration: Duration) {
    ::metrics::histogram!(CHAIN_FETCH_LATENCY, "leg" => leg.as_str())
        .record(duration.as_secs_f64() * 1000.0);
}

/// Count a finished ticker
pub fn record_outcome(outcome: &TickerOutcome) {
    ::metrics::counter!(CounterMetric::TickersProcessed.name()).increment(1);

    match outcome {
        TickerOutcome::Success(_) => {
            ::metrics::counter!(CounterMetric::Records.name()).increment(1);
        }
        TickerOutcome::Skipped { reason, .. } => {
            ::metrics::counter!(CounterMetric::TickersSkipped.name(), "reason" => reason.kind())
                .increment(1);
        }
    }
}

/// Serve metrics for scraping on the given port.
///
/// Must be called from within a tokio runtime.
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}
