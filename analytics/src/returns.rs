//! Daily returns
//!
//! Converts a clean price table into day-over-day fractional returns.

use crate::table::TimeTable;

/// Compute fractional day-over-day returns from a price table.
///
/// The first row is dropped (no prior day exists). Per ticker a
/// last-valid-price cursor is kept: on a date with a defined price and
/// a prior valid price, the return is `price / last_valid - 1`, so a
/// multi-day gap closes as a single percentage change once data
/// resumes. A date with a missing price yields a missing return, as
/// does the first defined price of a ticker with leading gaps.
///
/// Total function: missing inputs propagate as missing, never errors.
pub fn daily_returns(prices: &TimeTable) -> TimeTable {
    let n = prices.num_rows();
    if n < 2 {
        return TimeTable::empty();
    }

    let dates = prices.dates()[1..].to_vec();
    let mut columns = Vec::with_capacity(prices.num_columns());

    for col in 0..prices.num_columns() {
        let cells = prices.column(col);
        let mut out = Vec::with_capacity(n - 1);
        let mut last_valid = cells[0];

        for &cell in &cells[1..] {
            match cell {
                Some(price) => {
                    out.push(last_valid.map(|prev| price / prev - 1.0));
                    last_valid = Some(price);
                }
                None => out.push(None),
            }
        }

        columns.push(out);
    }

    TimeTable::new(dates, prices.tickers().to_vec(), columns)
        .expect("returns table inherits the input shape")
}
