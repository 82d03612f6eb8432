//! Integration tests for the HTTP providers against a local responder

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use spread_scanner::chain::{
    extract_last_price, ChainRequest, ContractType, FetchError, QuoteFetcher, SchwabClient,
    SchwabConfig,
};
use spread_scanner::universe::{SecConfig, SecTickerSource, Ticker, TickerSource};
use spread_scanner::window::DateWindow;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answer one HTTP request with a canned response, returning the raw request head
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;

        String::from_utf8_lossy(&head).to_string()
    });

    (base, handle)
}

fn schwab(base_url: String, token: Option<&str>) -> SchwabClient {
    SchwabClient::with_config(SchwabConfig {
        base_url,
        timeout: Duration::from_secs(5),
        access_token: token.map(str::to_string),
    })
    .unwrap()
}

fn near_request() -> ChainRequest {
    ChainRequest {
        ticker: Ticker::parse("aapl").unwrap(),
        contract_type: ContractType::Call,
        window: DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 10, 10).unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 15).unwrap(),
        )
        .unwrap(),
        strike_count: 1,
    }
}

#[tokio::test]
async fn test_schwab_chain_success() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"symbol":"AAPL","status":"SUCCESS","callExpDateMap":{"2024-10-11:7":{"230.0":[{"putCall":"CALL","last":2.35}]}}}"#,
    )
    .await;

    let client = schwab(base, Some("test-token"));
    let chain = client.fetch_chain(&near_request()).await.unwrap();
    assert_eq!(chain.status(), Some("SUCCESS"));
    assert_eq!(extract_last_price(&chain), Some(dec!(2.35)));

    let head = server.await.unwrap().to_lowercase();
    let request_line = head.lines().next().unwrap();
    assert!(request_line.starts_with("get /chains?"));
    assert!(request_line.contains("symbol=aapl"));
    assert!(request_line.contains("contracttype=call"));
    assert!(request_line.contains("strikecount=1"));
    assert!(request_line.contains("fromdate=2024-10-10"));
    assert!(request_line.contains("todate=2024-10-15"));
    assert!(head.contains("authorization: bearer test-token"));
}

#[tokio::test]
async fn test_schwab_missing_map_is_empty_chain() {
    let (base, server) = serve_once("200 OK", r#"{"symbol":"AAPL","status":"FAILED"}"#).await;

    let chain = schwab(base, None)
        .fetch_chain(&near_request())
        .await
        .unwrap();
    assert!(chain.expirations().is_none());
    assert_eq!(extract_last_price(&chain), None);

    let head = server.await.unwrap().to_lowercase();
    assert!(!head.contains("authorization:"));
}

#[tokio::test]
async fn test_schwab_error_status() {
    let (base, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let err = schwab(base, None)
        .fetch_chain(&near_request())
        .await
        .unwrap_err();
    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
    server.await.unwrap();
}

#[tokio::test]
async fn test_schwab_non_json_body_is_malformed() {
    let (base, server) = serve_once("200 OK", "<html>maintenance</html>").await;

    let err = schwab(base, None)
        .fetch_chain(&near_request())
        .await
        .unwrap_err();
    assert!(err.is_malformed());
    server.await.unwrap();
}

#[tokio::test]
async fn test_schwab_non_object_body_is_malformed() {
    let (base, server) = serve_once("200 OK", "[1, 2, 3]").await;

    let err = schwab(base, None)
        .fetch_chain(&near_request())
        .await
        .unwrap_err();
    assert!(err.is_malformed());
    server.await.unwrap();
}

#[tokio::test]
async fn test_sec_listing_success() {
    let (base, server) = serve_once("200 OK", "aapl\t320193\nmsft\t789019\n").await;

    let source = SecTickerSource::with_config(SecConfig {
        url: format!("{}/include/ticker.txt", base),
        user_agent: "Integration Test test@example.com".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    let tickers = source.fetch_tickers().await;
    assert_eq!(tickers, vec![serde_json::json!("aapl"), serde_json::json!("msft")]);

    let head = server.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /include/ticker.txt"));
    assert!(head.contains("user-agent: integration test test@example.com"));
}

#[tokio::test]
async fn test_sec_listing_forbidden_is_empty() {
    let (base, server) = serve_once("403 Forbidden", "").await;

    let source = SecTickerSource::with_config(SecConfig {
        url: base,
        ..SecConfig::default()
    })
    .unwrap();

    assert!(source.fetch_tickers().await.is_empty());
    server.await.unwrap();
}
