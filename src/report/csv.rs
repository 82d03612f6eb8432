//! CSV report writer

use super::{ensure_parent, OutputSink, REPORT_COLUMNS};
use crate::scan::ScanResult;
use csv::WriterBuilder;
use std::path::{Path, PathBuf};

/// Writes the ranked result as CSV with a header row
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for CsvSink {
    fn write(&self, result: &ScanResult) -> anyhow::Result<()> {
        ensure_parent(&self.path)?;

        // Header written explicitly so an empty result still yields one
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(REPORT_COLUMNS)?;

        for record in result {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::info!(path = ?self.path, rows = result.len(), "Wrote CSV report");
        Ok(())
    }
}
