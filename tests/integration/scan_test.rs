//! Integration tests for the scan pipeline: universe -> orchestrator -> ranker -> sink

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use spread_scanner::chain::{ChainRequest, FetchError, OptionChainResponse, QuoteFetcher};
use spread_scanner::report::{read_scan_records, CsvSink, OutputSink, ParquetSink};
use spread_scanner::scan::{rank, Leg, ScanOrchestrator, SkipReason, TickerOutcome};
use spread_scanner::universe::FileTickerSource;
use spread_scanner::universe::TickerSource;
use spread_scanner::window::{compute_windows, DateWindow};
use std::collections::HashMap;
use std::sync::Arc;

/// Serves canned chain bodies keyed by (symbol, fromDate)
struct StubProvider {
    bodies: HashMap<(String, String), Result<Value, u16>>,
}

impl StubProvider {
    fn new() -> Self {
        Self {
            bodies: HashMap::new(),
        }
    }

    fn chain(mut self, ticker: &str, window: DateWindow, body: Value) -> Self {
        self.bodies
            .insert((ticker.to_string(), window.from_param()), Ok(body));
        self
    }

    fn price(self, ticker: &str, window: DateWindow, last: f64) -> Self {
        self.chain(
            ticker,
            window,
            json!({
                "symbol": ticker,
                "status": "SUCCESS",
                "callExpDateMap": {
                    "2024-10-11:7": {
                        "225.0": [{"putCall": "CALL", "last": last, "bid": 0.0}]
                    }
                }
            }),
        )
    }

    fn status(mut self, ticker: &str, window: DateWindow, status: u16) -> Self {
        self.bodies
            .insert((ticker.to_string(), window.from_param()), Err(status));
        self
    }
}

#[async_trait]
impl QuoteFetcher for StubProvider {
    async fn fetch_chain(&self, request: &ChainRequest) -> Result<OptionChainResponse, FetchError> {
        let key = (request.ticker.to_string(), request.window.from_param());
        match self.bodies.get(&key) {
            Some(Ok(body)) => OptionChainResponse::from_value(request.contract_type, body.clone()),
            Some(Err(status)) => Err(FetchError::Status {
                status: *status,
                body: "upstream error".to_string(),
            }),
            None => Ok(OptionChainResponse::empty(request.contract_type)),
        }
    }
}

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 4).unwrap()
}

#[tokio::test]
async fn test_mixed_universe_end_to_end_csv() {
    let (near, far) = compute_windows(reference()).unwrap();
    let provider = StubProvider::new()
        .price("AAPL", near, 2.00)
        .price("AAPL", far, 8.00)
        .price("MSFT", near, 4.00)
        .price("MSFT", far, 6.00)
        .status("XYZ", near, 503)
        .price("NOFAR", near, 1.00);

    let universe = vec![
        json!("aapl"),
        json!(123),
        json!("msft"),
        json!("xyz"),
        json!("nofar"),
        json!(" AAPL "),
    ];

    let orchestrator = ScanOrchestrator::with_defaults(Arc::new(provider));
    let report = orchestrator.run(&universe, near, far).await;

    let summary = report.summary();
    assert_eq!(summary.processed, 6);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.skipped, 4);
    assert_eq!(summary.by_reason.get("invalid_symbol"), Some(&1));
    assert_eq!(summary.by_reason.get("duplicate_symbol"), Some(&1));
    assert_eq!(summary.by_reason.get("transport"), Some(&1));
    assert_eq!(summary.by_reason.get("missing_price"), Some(&1));

    let result = rank(report.into_records());
    let tickers: Vec<_> = result.iter().map(|r| r.ticker.as_str().to_string()).collect();
    assert_eq!(tickers, vec!["MSFT", "AAPL"]);
    assert_eq!(result.records()[0].ratio, Some(dec!(1.5)));
    assert_eq!(result.records()[1].ratio, Some(dec!(4)));

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("out").join("spread_scan.csv");
    CsvSink::new(&path).write(&result).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(
        lines.next(),
        Some("Ticker,Week_Last_Price,Year_Last_Price,Spread_Ratio")
    );
    assert!(lines.next().unwrap().starts_with("MSFT,4"));
    assert!(lines.next().unwrap().starts_with("AAPL,2"));
    assert_eq!(lines.next(), None);
}

#[tokio::test]
async fn test_far_leg_failure_skips_ticker() {
    let (near, far) = compute_windows(reference()).unwrap();
    let provider = StubProvider::new()
        .price("QQQ", near, 1.25)
        .status("QQQ", far, 500);

    let orchestrator = ScanOrchestrator::with_defaults(Arc::new(provider));
    let report = orchestrator.run(&[json!("QQQ")], near, far).await;

    match &report.outcomes[0] {
        TickerOutcome::Skipped { ticker, reason } => {
            assert_eq!(ticker, "QQQ");
            assert!(matches!(reason, SkipReason::Transport { leg: Leg::Far, .. }));
        }
        other => panic!("expected skip, got {:?}", other),
    }
    assert_eq!(report.records().count(), 0);
}

#[tokio::test]
async fn test_first_record_with_price_is_used() {
    let (near, far) = compute_windows(reference()).unwrap();
    let provider = StubProvider::new()
        .chain(
            "SPY",
            near,
            json!({
                "callExpDateMap": {
                    "2024-10-11:7": {
                        "570.0": [{"bid": 1.0}],
                        "575.0": [{"last": "3.10"}, {"last": 9.99}]
                    },
                    "2024-10-14:10": {
                        "570.0": [{"last": 7.77}]
                    }
                }
            }),
        )
        .price("SPY", far, 31.0);

    let orchestrator = ScanOrchestrator::with_defaults(Arc::new(provider));
    let report = orchestrator.run(&[json!("spy")], near, far).await;
    let records = report.into_records();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].near_price, Some(dec!(3.10)));
    assert_eq!(records[0].ratio, Some(dec!(10)));
}

#[tokio::test]
async fn test_zero_near_price_is_skipped() {
    let (near, far) = compute_windows(reference()).unwrap();
    let provider = StubProvider::new()
        .price("ZERO", near, 0.0)
        .price("ZERO", far, 5.0);

    let orchestrator = ScanOrchestrator::with_defaults(Arc::new(provider));
    let report = orchestrator.run(&[json!("ZERO")], near, far).await;

    assert_eq!(report.summary().by_reason.get("invalid_ratio_input"), Some(&1));
    assert!(rank(report.into_records()).is_empty());
}

#[tokio::test]
async fn test_file_universe_to_parquet() {
    let (near, far) = compute_windows(reference()).unwrap();

    let dir = tempfile::TempDir::new().unwrap();
    let tickers_path = dir.path().join("tickers.json");
    std::fs::write(&tickers_path, r#"["iwm", "dia", null, "iwm"]"#).unwrap();

    let entries = FileTickerSource::new(&tickers_path).fetch_tickers().await;
    assert_eq!(entries.len(), 4);

    let provider = StubProvider::new()
        .price("IWM", near, 0.5)
        .price("IWM", far, 12.5)
        .price("DIA", near, 2.0)
        .price("DIA", far, 20.0);

    let orchestrator = ScanOrchestrator::with_defaults(Arc::new(provider));
    let result = rank(orchestrator.run(&entries, near, far).await.into_records());

    let path = dir.path().join("spread_scan.parquet");
    ParquetSink::new(&path).write(&result).unwrap();

    let records = read_scan_records(&path).unwrap();
    assert_eq!(records, result.into_records());
    assert_eq!(records[0].ticker.as_str(), "DIA");
    assert_eq!(records[1].ratio, Some(dec!(25)));
}

#[tokio::test]
async fn test_empty_universe_yields_empty_report() {
    let (near, far) = compute_windows(reference()).unwrap();
    let orchestrator = ScanOrchestrator::with_defaults(Arc::new(StubProvider::new()));

    let report = orchestrator.run(&[], near, far).await;
    assert!(report.outcomes.is_empty());

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("empty.csv");
    CsvSink::new(&path).write(&rank(report.into_records())).unwrap();
    assert_eq!(
        std::fs::read_to_string(&path).unwrap().trim_end(),
        "Ticker,Week_Last_Price,Year_Last_Price,Spread_Ratio"
    );
}
