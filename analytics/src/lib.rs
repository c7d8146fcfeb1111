//! # tq-analytics: Price Risk Analytics Pipeline
//!
//! This library implements the numeric core of techquake: a pipeline
//! of pure, value-based transforms over daily equity price tables.
//!
//! ## Pipeline Stages
//!
//! - **Extractor**: raw provider table -> clean price table
//! - **Returns**: price table -> day-over-day fractional returns
//! - **Cumulative Index**: returns -> compounded growth index
//! - **Rolling Volatility**: returns -> annualized trailing-window std dev
//! - **Drawdowns**: cumulative index -> fractional decline from peak
//!
//! Data flows strictly downstream; every stage consumes its input by
//! reference and produces a new [`TimeTable`]. Missing observations
//! are explicit `Option` cells and propagate through the arithmetic
//! stages without ever raising an error.
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tq_analytics::{
//!     cumulative_index, daily_returns, drawdowns, CumulativeConfig, TimeTable,
//! };
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let dates: Vec<_> = (0..3).map(|i| start + chrono::Days::new(i)).collect();
//! let prices = TimeTable::new(
//!     dates,
//!     vec!["AAPL".to_string()],
//!     vec![vec![Some(100.0), Some(110.0), Some(99.0)]],
//! )
//! .unwrap();
//!
//! let returns = daily_returns(&prices);
//! let index = cumulative_index(&returns, &CumulativeConfig::default());
//! let dd = drawdowns(&index);
//!
//! assert_eq!(dd.value(0, 0), Some(0.0));
//! assert!((dd.value(1, 0).unwrap() + 0.1).abs() < 1e-12);
//! ```

mod cumulative;
mod drawdown;
mod error;
mod extract;
mod raw;
mod returns;
mod table;
mod volatility;

pub use cumulative::{cumulative_index, CumulativeConfig};
pub use drawdown::drawdowns;
pub use error::{AnalyticsError, AnalyticsResult};
pub use extract::extract_price_table;
pub use raw::{PriceField, RawPriceTable};
pub use returns::daily_returns;
pub use table::TimeTable;
pub use volatility::{rolling_volatility, VolatilityConfig};
