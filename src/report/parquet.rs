//! Parquet report writer

use super::{ensure_parent, OutputSink, REPORT_COLUMNS};
use crate::scan::{ScanRecord, ScanResult};
use crate::universe::Ticker;
use arrow::array::{Array, ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use rust_decimal::Decimal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Report schema. Decimals are stored as strings to keep precision.
pub fn report_schema() -> Schema {
    Schema::new(vec![
        Field::new(REPORT_COLUMNS[0], DataType::Utf8, false),
        Field::new(REPORT_COLUMNS[1], DataType::Utf8, true),
        Field::new(REPORT_COLUMNS[2], DataType::Utf8, true),
        Field::new(REPORT_COLUMNS[3], DataType::Utf8, true),
    ])
}

/// Writes the ranked result as a single-batch Parquet file
pub struct ParquetSink {
    path: PathBuf,
}

impl ParquetSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn decimal_column(values: impl Iterator<Item = Option<Decimal>>) -> ArrayRef {
    let strings: Vec<Option<String>> = values.map(|v| v.map(|d| d.to_string())).collect();
    Arc::new(StringArray::from(strings))
}

impl OutputSink for ParquetSink {
    fn write(&self, result: &ScanResult) -> anyhow::Result<()> {
        ensure_parent(&self.path)?;

        let schema = Arc::new(report_schema());
        let file = File::create(&self.path)?;

        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

        if !result.is_empty() {
            let tickers: Vec<&str> = result.iter().map(|r| r.ticker.as_str()).collect();

            let batch = RecordBatch::try_new(
                schema,
                vec![
                    Arc::new(StringArray::from(tickers)) as ArrayRef,
                    decimal_column(result.iter().map(|r| r.near_price)),
                    decimal_column(result.iter().map(|r| r.far_price)),
                    decimal_column(result.iter().map(|r| r.ratio)),
                ],
            )?;
            writer.write(&batch)?;
        }

        writer.close()?;

        tracing::info!(path = ?self.path, rows = result.len(), "Wrote Parquet report");
        Ok(())
    }
}

/// Read report rows back in file order
pub fn read_scan_records(path: &Path) -> anyhow::Result<Vec<ScanRecord>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;

        let tickers = string_column(&batch, 0)?;
        let near = string_column(&batch, 1)?;
        let far = string_column(&batch, 2)?;
        let ratio = string_column(&batch, 3)?;

        for row in 0..batch.num_rows() {
            let ticker = Ticker::parse(tickers.value(row))
                .ok_or_else(|| anyhow::anyhow!("Invalid ticker: {}", tickers.value(row)))?;

            records.push(ScanRecord {
                ticker,
                near_price: decimal_at(near, row)?,
                far_price: decimal_at(far, row)?,
                ratio: decimal_at(ratio, row)?,
            });
        }
    }

    Ok(records)
}

fn string_column(batch: &RecordBatch, index: usize) -> anyhow::Result<&StringArray> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| anyhow::anyhow!("Invalid {} column", REPORT_COLUMNS[index]))
}

fn decimal_at(array: &StringArray, row: usize) -> anyhow::Result<Option<Decimal>> {
    if array.is_null(row) {
        return Ok(None);
    }
    Ok(Some(Decimal::from_str(array.value(row))?))
}
