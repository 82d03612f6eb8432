use clap::Parser;
use spread_scanner::cli::{Cli, Commands};
use spread_scanner::config::Config;
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../config.toml.example");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = if Path::new(&cli.config).exists() {
        Config::load(&cli.config)?
    } else {
        eprintln!("Warning: Config file {} not found", cli.config);
        eprintln!("Using default configuration");
        Config::parse(DEFAULT_CONFIG)?
    };

    // Initialize telemetry
    spread_scanner::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            tracing::info!("Starting spread scan");
            args.execute(&config).await?;
        }
        Commands::Windows(args) => {
            args.execute(&config)?;
        }
        Commands::Config => {
            println!("Current configuration:");
            match &config.universe.tickers_file {
                Some(path) => println!("  Universe: file {}", path.display()),
                None => println!("  Universe: {}", config.universe.sec_url),
            }
            println!(
                "  Provider: {} (timeout {}s, strikes {})",
                config.provider.base_url,
                config.provider.timeout_secs,
                config.provider.strike_count
            );
            println!(
                "  Windows: near {}..{}d, far {}..{}d",
                config.windows.near_start_days,
                config.windows.near_end_days,
                config.windows.far_start_days,
                config.windows.far_end_days
            );
            println!(
                "  Output: {} ({:?})",
                config.output.path.display(),
                config.output.format
            );
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
