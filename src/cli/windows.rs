//! Windows command implementation

use crate::config::Config;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Args, Debug)]
pub struct WindowsArgs {
    /// Reference date (YYYY-MM-DD, default today)
    #[arg(long)]
    pub reference_date: Option<NaiveDate>,
}

impl WindowsArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let reference = self
            .reference_date
            .unwrap_or_else(|| Local::now().date_naive());
        let (near, far) = config.windows.compute(reference)?;

        println!("Reference date: {}", reference);
        println!("  Near-term: {}", near);
        println!("  Far-term:  {}", far);
        Ok(())
    }
}
