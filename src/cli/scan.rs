//! Scan command implementation

use crate::chain::{ContractType, SchwabClient};
use crate::config::Config;
use crate::report::{format_table, sink_for, ReportFormat};
use crate::scan::{rank, ScanConfig, ScanOrchestrator};
use crate::universe::{FileTickerSource, SecTickerSource, TickerSource};
use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Ticker file (JSON array or one symbol per line) instead of the SEC listing
    #[arg(long)]
    pub tickers_file: Option<PathBuf>,

    /// Scan only the first N tickers
    #[arg(long)]
    pub limit: Option<usize>,

    /// Report output path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Reference date for the expiration windows (YYYY-MM-DD, default today)
    #[arg(long)]
    pub reference_date: Option<NaiveDate>,

    /// Rows printed to the console
    #[arg(long)]
    pub top: Option<usize>,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let reference = self
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let (near, far) = config.windows.compute(reference)?;

        let source = self.ticker_source(config)?;
        let mut entries = source.fetch_tickers().await;
        if entries.is_empty() {
            anyhow::bail!("No tickers available to scan");
        }
        if let Some(limit) = self.limit.or(config.universe.limit) {
            entries.truncate(limit);
        }

        let client = SchwabClient::with_config(config.provider.schwab_config())?;
        let orchestrator = ScanOrchestrator::new(
            Arc::new(client),
            ScanConfig {
                contract_type: ContractType::Call,
                strike_count: config.provider.strike_count,
                progress_interval: config.scan.progress_interval,
            },
        );

        let report = orchestrator.run(&entries, near, far).await;
        let summary = report.summary();
        let result = rank(report.into_records());

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| config.output.path.clone());
        let format = self.format.unwrap_or(config.output.format);

        sink_for(format, path.clone())
            .write(&result)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        println!(
            "{}",
            format_table(&result, self.top.unwrap_or(config.output.console_rows))
        );
        println!(
            "Scanned {} entries ({} skipped); report saved to {}",
            summary.processed,
            summary.skipped,
            path.display()
        );

        Ok(())
    }

    fn ticker_source(&self, config: &Config) -> anyhow::Result<Box<dyn TickerSource>> {
        let file = self
            .tickers_file
            .clone()
            .or_else(|| config.universe.tickers_file.clone());

        Ok(match file {
            Some(path) => Box::new(FileTickerSource::new(path)),
            None => Box::new(SecTickerSource::with_config(config.universe.sec_config())?),
        })
    }
}
