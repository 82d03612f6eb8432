//! Report output
//!
//! Persists the ranked scan result as a tabular artifact and renders it for
//! the console.

mod csv;
mod parquet;
mod table;

pub use self::csv::CsvSink;
pub use self::parquet::{read_scan_records, report_schema, ParquetSink};
pub use table::format_table;

use crate::scan::ScanResult;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Report column headers, in order
pub const REPORT_COLUMNS: [&str; 4] = [
    "Ticker",
    "Week_Last_Price",
    "Year_Last_Price",
    "Spread_Ratio",
];

/// Destination for a ranked scan result
pub trait OutputSink {
    /// Persist the result in rank order
    fn write(&self, result: &ScanResult) -> anyhow::Result<()>;
}

/// Report file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Csv,
    Parquet,
}

/// Build the sink for a format and path
pub fn sink_for(format: ReportFormat, path: PathBuf) -> Box<dyn OutputSink> {
    match format {
        ReportFormat::Csv => Box::new(CsvSink::new(path)),
        ReportFormat::Parquet => Box::new(ParquetSink::new(path)),
    }
}

/// Create the parent directory of an output path if needed
fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
