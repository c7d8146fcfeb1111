//! Integration tests for the Yahoo Finance provider
//!
//! These tests run the provider against a local mock HTTP server and
//! verify the fetch contract: parsed tables on success, an empty
//! table on any failure.

use chrono::NaiveDate;
use url::Url;

use tq_analytics::{extract_price_table, PriceField, RawPriceTable};
use tq_data::{FetchRequest, PriceProvider, YahooProvider};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn provider_for(server: &mockito::ServerGuard) -> YahooProvider {
    let url = Url::parse(&server.url()).expect("mock server URL is valid");
    YahooProvider::with_endpoint(url).expect("provider builds")
}

fn request(tickers: &[&str]) -> FetchRequest {
    FetchRequest::new(
        tickers.iter().map(|t| t.to_string()).collect(),
        date(2024, 1, 2),
        date(2024, 1, 5),
    )
    .expect("valid request")
}

/// Three trading days of AAPL bars, 2024-01-02 through 2024-01-04.
fn aapl_body() -> String {
    serde_json::json!({
        "chart": {
            "result": [{
                "timestamp": [1704153600, 1704240000, 1704326400],
                "indicators": {
                    "quote": [{
                        "open": [184.0, 183.5, 182.0],
                        "high": [186.0, 184.5, 183.5],
                        "low": [183.0, 182.5, 181.0],
                        "close": [185.0, 184.0, 182.5],
                        "volume": [82000000, 58000000, 71000000]
                    }],
                    "adjclose": [{
                        "adjclose": [184.7, 183.7, 182.2]
                    }]
                }
            }],
            "error": null
        }
    })
    .to_string()
}

#[test]
fn test_single_ticker_parses_to_flat_table() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(aapl_body())
        .create();

    let provider = provider_for(&server);
    let raw = provider.fetch(&request(&["AAPL"]));
    mock.assert();

    assert!(!raw.is_empty());
    assert!(matches!(raw, RawPriceTable::SingleTicker { .. }));
    assert_eq!(
        raw.dates(),
        &[date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)]
    );

    let prices = extract_price_table(&raw, PriceField::Close).unwrap();
    assert_eq!(prices.tickers(), &["AAPL".to_string()]);
    assert_eq!(
        prices.column(0),
        &[Some(185.0), Some(184.0), Some(182.5)]
    );
}

#[test]
fn test_multi_ticker_merges_on_date_union() {
    let mut server = mockito::Server::new();
    let _aapl = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(aapl_body())
        .create();
    // MSFT is missing the middle trading day
    let _msft = server
        .mock("GET", "/v8/finance/chart/MSFT")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            serde_json::json!({
                "chart": {
                    "result": [{
                        "timestamp": [1704153600, 1704326400],
                        "indicators": {
                            "quote": [{
                                "open": [370.0, 368.0],
                                "high": [372.0, 370.0],
                                "low": [369.0, 366.0],
                                "close": [371.0, 367.5],
                                "volume": [21000000, 24000000]
                            }]
                        }
                    }],
                    "error": null
                }
            })
            .to_string(),
        )
        .create();

    let provider = provider_for(&server);
    let raw = provider.fetch(&request(&["AAPL", "MSFT"]));

    assert!(matches!(raw, RawPriceTable::MultiTicker { .. }));
    assert_eq!(raw.dates().len(), 3);

    let prices = extract_price_table(&raw, PriceField::Close).unwrap();
    let msft = prices.column_for("MSFT").unwrap();
    assert_eq!(msft, &[Some(371.0), None, Some(367.5)]);
}

#[test]
fn test_http_error_yields_empty_table() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(mockito::Matcher::Any)
        .with_status(500)
        .create();

    let provider = provider_for(&server);
    let raw = provider.fetch(&request(&["AAPL"]));
    assert!(raw.is_empty());
}

#[test]
fn test_provider_error_yields_empty_table() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v8/finance/chart/NOPE")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            serde_json::json!({
                "chart": {
                    "result": null,
                    "error": {
                        "code": "Not Found",
                        "description": "No data found, symbol may be delisted"
                    }
                }
            })
            .to_string(),
        )
        .create();

    let provider = provider_for(&server);
    let raw = provider.fetch(&request(&["NOPE"]));
    assert!(raw.is_empty());
}

#[test]
fn test_malformed_body_yields_empty_table() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create();

    let provider = provider_for(&server);
    let raw = provider.fetch(&request(&["AAPL"]));
    assert!(raw.is_empty());
}

#[test]
fn test_one_bad_ticker_discards_whole_call() {
    let mut server = mockito::Server::new();
    let _aapl = server
        .mock("GET", "/v8/finance/chart/AAPL")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(aapl_body())
        .create();
    let _bad = server
        .mock("GET", "/v8/finance/chart/MSFT")
        .match_query(mockito::Matcher::Any)
        .with_status(404)
        .create();

    let provider = provider_for(&server);
    let raw = provider.fetch(&request(&["AAPL", "MSFT"]));

    // No partial-ticker results: the AAPL data is discarded too
    assert!(raw.is_empty());
}
