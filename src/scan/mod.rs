//! Spread scan pipeline
//!
//! Per-ticker quote retrieval, spread ratio computation and ranking

mod orchestrator;
mod ranker;
mod ratio;
mod types;

pub use orchestrator::{ScanConfig, ScanOrchestrator};
pub use ranker::{rank, ScanResult};
pub use ratio::compute_ratio;
pub use types::{Leg, ScanRecord, ScanReport, ScanSummary, SkipReason, TickerOutcome};
