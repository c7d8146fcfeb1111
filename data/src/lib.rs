//! # tq-data: Price History Fetching
//!
//! External-collaborator crate of techquake: fetches daily OHLCV
//! history from Yahoo Finance and hands it to the analytics pipeline
//! as a raw price table.
//!
//! The provider contract is deliberately forgiving: a fetch either
//! succeeds with data or yields an **empty** table. Network failures,
//! unknown tickers and malformed responses are logged once and
//! collapsed into that empty result; callers check
//! [`RawPriceTable::is_empty`](tq_analytics::RawPriceTable::is_empty)
//! and stop. Only request construction (empty ticker set, inverted
//! date range) fails eagerly.
//!
//! ## Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use tq_data::{FetchRequest, PriceProvider, YahooProvider};
//!
//! let provider = YahooProvider::new()?;
//! let request = FetchRequest::new(
//!     vec!["AAPL".to_string()],
//!     NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//! )?;
//!
//! let raw = provider.fetch(&request);
//! if raw.is_empty() {
//!     eprintln!("no data returned");
//! }
//! # Ok::<(), tq_data::FetchError>(())
//! ```

mod error;
mod provider;
mod yahoo;

pub use error::{FetchError, FetchResult};
pub use provider::{default_start_date, FetchRequest, PriceProvider};
pub use yahoo::YahooProvider;
