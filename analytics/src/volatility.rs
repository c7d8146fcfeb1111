//! Rolling volatility
//!
//! Annualized rolling standard deviation of daily returns over a
//! trailing fixed-size window.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::table::TimeTable;

/// Rolling volatility configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityConfig {
    /// Trailing window size in trading days
    pub window: usize,

    /// Annualization factor (trading periods per year)
    pub periods_per_year: u32,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            window: 21,
            periods_per_year: 252,
        }
    }
}

/// Compute annualized rolling volatility of a returns table.
///
/// Value at (date, ticker) is the sample standard deviation (n - 1)
/// of the trailing `window` returns, inclusive of the date, scaled by
/// `sqrt(periods_per_year)`. The first `window - 1` rows are missing,
/// as is any window containing a missing return. A window smaller
/// than 2 has no defined sample deviation and yields an all-missing
/// table.
pub fn rolling_volatility(returns: &TimeTable, config: &VolatilityConfig) -> TimeTable {
    let n = returns.num_rows();
    let annualize = f64::from(config.periods_per_year).sqrt();
    let mut columns = Vec::with_capacity(returns.num_columns());

    for col in 0..returns.num_columns() {
        let cells = returns.column(col);
        let mut out = vec![None; n];

        if config.window >= 2 {
            for i in (config.window - 1)..n {
                let trailing = &cells[i + 1 - config.window..=i];
                if trailing.iter().all(Option::is_some) {
                    let window: Vec<f64> = trailing.iter().map(|c| c.unwrap_or(0.0)).collect();
                    out[i] = Some(window.std_dev() * annualize);
                }
            }
        }

        columns.push(out);
    }

    TimeTable::new(
        returns.dates().to_vec(),
        returns.tickers().to_vec(),
        columns,
    )
    .expect("volatility table inherits the input shape")
}
