//! Yahoo Finance chart API provider
//!
//! Implements the PriceProvider trait against the Yahoo Finance v8
//! chart endpoint. One HTTP GET per ticker, blocking, no retries: if
//! anything fails the whole call's result is discarded and an empty
//! table is returned.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use tq_analytics::{PriceField, RawPriceTable};

use crate::error::{FetchError, FetchResult};
use crate::provider::{FetchRequest, PriceProvider};

const DEFAULT_ENDPOINT: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = concat!("techquake/", env!("CARGO_PKG_VERSION"));

/// Field columns fetched for every ticker, in table order.
const ALL_FIELDS: [PriceField; 6] = [
    PriceField::Open,
    PriceField::High,
    PriceField::Low,
    PriceField::Close,
    PriceField::AdjClose,
    PriceField::Volume,
];

/// Yahoo Finance price provider
pub struct YahooProvider {
    client: Client,
    endpoint: Url,
}

impl YahooProvider {
    /// Create a provider against the public Yahoo Finance endpoint.
    pub fn new() -> FetchResult<Self> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|e| FetchError::Config(format!("invalid endpoint: {e}")))?;
        Self::with_endpoint(endpoint)
    }

    /// Create a provider against a custom endpoint (used in tests).
    pub fn with_endpoint(endpoint: Url) -> FetchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }

    fn try_fetch(&self, request: &FetchRequest) -> FetchResult<RawPriceTable> {
        let period1 = unix_midnight(request.start());
        let period2 = unix_midnight(request.end());

        let mut histories = Vec::with_capacity(request.tickers().len());
        for ticker in request.tickers() {
            let history = self.fetch_ticker(ticker, period1, period2)?;
            histories.push((ticker.clone(), history));
        }

        let table = assemble_table(histories)?;
        if table.is_empty() {
            debug!("no data returned for the given tickers and date range");
        }
        Ok(table)
    }

    fn fetch_ticker(
        &self,
        ticker: &str,
        period1: i64,
        period2: i64,
    ) -> FetchResult<TickerHistory> {
        let mut url = self
            .endpoint
            .join(&format!("v8/finance/chart/{ticker}"))
            .map_err(|e| FetchError::Config(format!("invalid chart URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d");

        debug!(%ticker, %url, "requesting daily history");
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(FetchError::Provider {
                ticker: ticker.to_string(),
                message: format!("HTTP status {status}"),
            });
        }

        let body: ChartResponse = response.json()?;
        TickerHistory::from_response(ticker, body)
    }
}

impl PriceProvider for YahooProvider {
    fn fetch(&self, request: &FetchRequest) -> RawPriceTable {
        match self.try_fetch(request) {
            Ok(table) => table,
            Err(error) => {
                warn!(
                    tickers = ?request.tickers(),
                    %error,
                    "price fetch failed, returning empty table"
                );
                RawPriceTable::empty()
            }
        }
    }
}

fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
        .timestamp()
}

/// Daily history for one ticker, keyed by date.
struct TickerHistory {
    /// date -> [open, high, low, close, adj close, volume]
    bars: BTreeMap<NaiveDate, [Option<f64>; 6]>,
}

impl TickerHistory {
    fn from_response(ticker: &str, response: ChartResponse) -> FetchResult<Self> {
        if let Some(api_error) = response.chart.error {
            return Err(FetchError::Provider {
                ticker: ticker.to_string(),
                message: api_error.description,
            });
        }

        let result = response
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| FetchError::Decode {
                ticker: ticker.to_string(),
                message: "response carries neither result nor error".to_string(),
            })?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .unwrap_or_default();
        let adjclose = result
            .indicators
            .adjclose
            .and_then(|mut series| {
                if series.is_empty() {
                    None
                } else {
                    Some(series.remove(0).adjclose)
                }
            })
            .unwrap_or_default();

        let n = timestamps.len();
        let series = [
            quote.open.unwrap_or_default(),
            quote.high.unwrap_or_default(),
            quote.low.unwrap_or_default(),
            quote.close.unwrap_or_default(),
            adjclose,
            quote.volume.unwrap_or_default(),
        ];
        for column in &series {
            if !column.is_empty() && column.len() != n {
                return Err(FetchError::Decode {
                    ticker: ticker.to_string(),
                    message: format!(
                        "column length {} does not match {} timestamps",
                        column.len(),
                        n
                    ),
                });
            }
        }

        let mut bars = BTreeMap::new();
        for (i, &ts) in timestamps.iter().enumerate() {
            let date = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| FetchError::Decode {
                    ticker: ticker.to_string(),
                    message: format!("invalid timestamp {ts}"),
                })?
                .date_naive();

            let mut bar = [None; 6];
            for (slot, column) in bar.iter_mut().zip(&series) {
                *slot = column.get(i).copied().flatten();
            }
            bars.insert(date, bar);
        }

        Ok(Self { bars })
    }
}

/// Merge per-ticker histories on the union of their dates.
///
/// A single requested ticker produces the flat SingleTicker variant
/// (mirroring the provider's flat column layout in that case); more
/// than one produces MultiTicker. Rows with no data for any ticker
/// are dropped here, at the provider boundary.
fn assemble_table(histories: Vec<(String, TickerHistory)>) -> FetchResult<RawPriceTable> {
    let mut all_dates: Vec<NaiveDate> = histories
        .iter()
        .flat_map(|(_, h)| h.bars.keys().copied())
        .collect();
    all_dates.sort_unstable();
    all_dates.dedup();

    let fields = ALL_FIELDS.to_vec();

    let table = if histories.len() == 1 {
        let (ticker, history) = &histories[0];
        let mut columns = vec![Vec::with_capacity(all_dates.len()); fields.len()];
        for date in &all_dates {
            let bar = history.bars.get(date).copied().unwrap_or([None; 6]);
            for (column, value) in columns.iter_mut().zip(bar) {
                column.push(value);
            }
        }
        RawPriceTable::single(ticker.clone(), all_dates, fields, columns)
    } else {
        let tickers: Vec<String> = histories.iter().map(|(t, _)| t.clone()).collect();
        let mut columns =
            vec![vec![Vec::with_capacity(all_dates.len()); tickers.len()]; fields.len()];
        for date in &all_dates {
            for (ticker_idx, (_, history)) in histories.iter().enumerate() {
                let bar = history.bars.get(date).copied().unwrap_or([None; 6]);
                for (field_idx, value) in bar.into_iter().enumerate() {
                    columns[field_idx][ticker_idx].push(value);
                }
            }
        }
        RawPriceTable::multi(all_dates, tickers, fields, columns)
    };

    table
        .map(|t| t.drop_empty_rows())
        .map_err(|e| FetchError::Decode {
            ticker: "<merged>".to_string(),
            message: e.to_string(),
        })
}

// ---- Chart API response shapes ----

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartPayload,
}

#[derive(Debug, Deserialize)]
struct ChartPayload {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[allow(dead_code)]
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
    adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    adjclose: Vec<Option<f64>>,
}
