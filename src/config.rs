//! Configuration types for spread-scanner

use crate::chain::{SchwabConfig, SCHWAB_API_URL};
use crate::report::ReportFormat;
use crate::telemetry::LogFormat;
use crate::universe::{SecConfig, SEC_TICKERS_URL};
use crate::window::WindowOffsets;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub universe: UniverseConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub windows: WindowOffsets,
    #[serde(default)]
    pub scan: ScanSettings,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Ticker universe configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UniverseConfig {
    /// SEC ticker listing URL
    #[serde(default = "default_sec_url")]
    pub sec_url: String,

    /// Contact User-Agent sent to the SEC
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Local ticker file used instead of the SEC listing
    #[serde(default)]
    pub tickers_file: Option<PathBuf>,

    /// Scan only the first N entries
    #[serde(default)]
    pub limit: Option<usize>,
}

fn default_sec_url() -> String {
    SEC_TICKERS_URL.to_string()
}
fn default_user_agent() -> String {
    "Sample Company Name AdminContact@samplecompany.com".to_string()
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            sec_url: default_sec_url(),
            user_agent: default_user_agent(),
            tickers_file: None,
            limit: None,
        }
    }
}

impl UniverseConfig {
    pub fn sec_config(&self) -> SecConfig {
        SecConfig {
            url: self.sec_url.clone(),
            user_agent: self.user_agent.clone(),
            ..Default::default()
        }
    }
}

/// Option chain provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Market data API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Environment variable holding the bearer token
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,

    /// Strikes nearest the money requested per chain
    #[serde(default = "default_strike_count")]
    pub strike_count: u32,
}

fn default_base_url() -> String {
    SCHWAB_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_access_token_env() -> String {
    "SCHWAB_ACCESS_TOKEN".to_string()
}
fn default_strike_count() -> u32 {
    1
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: 10,
            access_token_env: default_access_token_env(),
            strike_count: 1,
        }
    }
}

impl ProviderConfig {
    /// Client configuration, reading the token from the environment
    pub fn schwab_config(&self) -> SchwabConfig {
        let access_token = std::env::var(&self.access_token_env)
            .ok()
            .filter(|t| !t.trim().is_empty());

        if access_token.is_none() {
            tracing::warn!(
                env = %self.access_token_env,
                "No access token set; chain requests will be unauthenticated"
            );
        }

        SchwabConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            access_token,
        }
    }
}

/// Scan loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSettings {
    /// Tickers between progress log lines (0 disables)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

fn default_progress_interval() -> usize {
    100
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            progress_interval: 100,
        }
    }
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Report file path
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Report file format
    #[serde(default)]
    pub format: ReportFormat,

    /// Rows printed to the console after a scan
    #[serde(default = "default_console_rows")]
    pub console_rows: usize,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("./output/spread_scan.csv")
}
fn default_console_rows() -> usize {
    25
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: ReportFormat::Csv,
            console_rows: 25,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.windows.validate()?;
        Ok(config)
    }
}
