//! Error types for price fetching
//!
//! These errors are internal plumbing: request validation fails fast,
//! but once a fetch is underway any failure is logged and collapsed
//! into an empty table for the caller. Absence of data is never an
//! error at the provider boundary.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Price fetching error types
#[derive(Debug, Error)]
pub enum FetchError {
    /// Requested ticker set was empty
    #[error("no tickers requested")]
    NoTickers,

    /// Start date is not strictly before the end date
    #[error("start date {start} is not before end date {end}")]
    InvalidRange {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },

    /// HTTP transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider rejected the request
    #[error("provider error for {ticker}: {message}")]
    Provider {
        /// Ticker being fetched
        ticker: String,
        /// Provider's error description
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("could not decode provider response for {ticker}: {message}")]
    Decode {
        /// Ticker being fetched
        ticker: String,
        /// Decoding failure detail
        message: String,
    },

    /// Client construction or endpoint configuration failure
    #[error("configuration error: {0}")]
    Config(String),
}
