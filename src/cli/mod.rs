//! CLI interface for spread-scanner
//!
//! Provides subcommands for:
//! - `scan`: Scan the ticker universe and write the ranked report
//! - `windows`: Show the near-term and far-term expiration windows
//! - `config`: Show the effective configuration

mod scan;
mod windows;

pub use scan::ScanArgs;
pub use windows::WindowsArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "spread-scanner")]
#[command(about = "Rank tickers by far-term to near-term call premium ratio")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan the ticker universe and write the ranked report
    Scan(ScanArgs),
    /// Show the expiration windows for a reference date
    Windows(WindowsArgs),
    /// Show the effective configuration
    Config,
}
