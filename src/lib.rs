//! spread-scanner: diagonal call spread scanner
//!
//! This library provides the core components for:
//! - Near-term and far-term expiration window computation
//! - Ticker universe loading from the SEC listing or a local file
//! - Option chain retrieval from the Schwab market data API
//! - Last-price extraction from nested chain responses
//! - Sequential per-ticker scanning with tagged skip outcomes
//! - Ratio ranking and CSV/Parquet report output
//! - Structured logging and Prometheus metrics

pub mod chain;
pub mod cli;
pub mod config;
pub mod report;
pub mod scan;
pub mod telemetry;
pub mod universe;
pub mod window;
