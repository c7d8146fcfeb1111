//! Price provider trait and fetch requests
//!
//! Defines the interface the analytics front end consumes: a
//! validated request goes in, a raw price table comes out. Providers
//! signal "no usable data" with an empty table, never an error, so
//! callers have a single condition to check before running the
//! pipeline.

use chrono::{Local, NaiveDate};

use tq_analytics::RawPriceTable;

use crate::error::{FetchError, FetchResult};

/// Default history start when the caller does not care (1995-01-01).
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 1, 1).expect("static date is valid")
}

/// A validated request for daily price history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    tickers: Vec<String>,
    start: NaiveDate,
    end: NaiveDate,
}

impl FetchRequest {
    /// Create a request for the given tickers and date range.
    ///
    /// # Errors
    /// [`FetchError::NoTickers`] when `tickers` is empty, and
    /// [`FetchError::InvalidRange`] unless `start` is strictly before
    /// `end`.
    pub fn new(
        tickers: Vec<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> FetchResult<Self> {
        if tickers.is_empty() {
            return Err(FetchError::NoTickers);
        }

        if start >= end {
            return Err(FetchError::InvalidRange { start, end });
        }

        Ok(Self {
            tickers,
            start,
            end,
        })
    }

    /// Request history from the default start date through today.
    pub fn full_history(tickers: Vec<String>) -> FetchResult<Self> {
        Self::new(tickers, default_start_date(), Local::now().date_naive())
    }

    /// Requested ticker symbols.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Inclusive start of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive end of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// A source of daily price history.
///
/// Implementations block until the fetch completes or fails. Any
/// failure (network, unknown ticker, malformed response) discards the
/// entire call's result and returns an empty table; no retries, no
/// partial-ticker results.
pub trait PriceProvider {
    /// Fetch daily price history for the request's tickers and range.
    fn fetch(&self, request: &FetchRequest) -> RawPriceTable;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_request_validation() {
        let ok = FetchRequest::new(
            vec!["AAPL".to_string()],
            date(2024, 1, 1),
            date(2024, 6, 1),
        );
        assert!(ok.is_ok());

        let empty = FetchRequest::new(vec![], date(2024, 1, 1), date(2024, 6, 1));
        assert!(matches!(empty, Err(FetchError::NoTickers)));

        let backwards = FetchRequest::new(
            vec!["AAPL".to_string()],
            date(2024, 6, 1),
            date(2024, 1, 1),
        );
        assert!(matches!(backwards, Err(FetchError::InvalidRange { .. })));

        let degenerate = FetchRequest::new(
            vec!["AAPL".to_string()],
            date(2024, 1, 1),
            date(2024, 1, 1),
        );
        assert!(matches!(degenerate, Err(FetchError::InvalidRange { .. })));
    }

    #[test]
    fn test_full_history_defaults() {
        let request = FetchRequest::full_history(vec!["MSFT".to_string()]).unwrap();
        assert_eq!(request.start(), date(1995, 1, 1));
        assert!(request.start() < request.end());
    }
}
