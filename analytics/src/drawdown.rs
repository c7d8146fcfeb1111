//! Drawdowns
//!
//! Fractional decline of a cumulative index from its running peak.

use crate::table::TimeTable;

/// Compute drawdowns from a cumulative index table.
///
/// Per ticker, a running maximum is maintained in date order and each
/// defined cell becomes `(current - peak) / peak`. The running
/// maximum is monotonically non-decreasing, so drawdowns are always
/// <= 0 and exactly 0 at or after a new peak. Missing cells yield
/// missing drawdowns and leave the peak unchanged.
pub fn drawdowns(cumulative: &TimeTable) -> TimeTable {
    let mut columns = Vec::with_capacity(cumulative.num_columns());

    for col in 0..cumulative.num_columns() {
        let mut out = Vec::with_capacity(cumulative.num_rows());
        let mut peak: Option<f64> = None;

        for &cell in cumulative.column(col) {
            match cell {
                Some(value) => {
                    let high = peak.map_or(value, |p| p.max(value));
                    peak = Some(high);
                    out.push(Some((value - high) / high));
                }
                None => out.push(None),
            }
        }

        columns.push(out);
    }

    TimeTable::new(
        cumulative.dates().to_vec(),
        cumulative.tickers().to_vec(),
        columns,
    )
    .expect("drawdown table inherits the input shape")
}
