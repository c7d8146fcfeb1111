//! Cumulative growth index
//!
//! Compounds daily returns into a growth index anchored to a
//! configurable base value.

use serde::{Deserialize, Serialize};

use crate::table::TimeTable;

/// Cumulative index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CumulativeConfig {
    /// Index value assigned before the first return (e.g. 100.0)
    pub base: f64,
}

impl Default for CumulativeConfig {
    fn default() -> Self {
        Self { base: 100.0 }
    }
}

/// Compound returns into a growth index, per ticker independently.
///
/// In date order, each defined return multiplies the running product:
/// `index = base * prod(1 + r)`. A missing return is skipped: its
/// cell stays missing and the running product carries forward
/// unchanged to the next defined return.
pub fn cumulative_index(returns: &TimeTable, config: &CumulativeConfig) -> TimeTable {
    let mut columns = Vec::with_capacity(returns.num_columns());

    for col in 0..returns.num_columns() {
        let mut out = Vec::with_capacity(returns.num_rows());
        let mut acc = config.base;

        for &cell in returns.column(col) {
            match cell {
                Some(r) => {
                    acc *= 1.0 + r;
                    out.push(Some(acc));
                }
                None => out.push(None),
            }
        }

        columns.push(out);
    }

    TimeTable::new(
        returns.dates().to_vec(),
        returns.tickers().to_vec(),
        columns,
    )
    .expect("cumulative table inherits the input shape")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn table(values: Vec<Option<f64>>) -> TimeTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let dates = (0..values.len() as u64)
            .map(|i| start + chrono::Days::new(i))
            .collect();
        TimeTable::new(dates, vec!["AAPL".to_string()], vec![values]).unwrap()
    }

    #[test]
    fn test_first_value_scales_base() {
        let returns = table(vec![Some(0.10), Some(-0.10)]);
        let index = cumulative_index(&returns, &CumulativeConfig::default());

        assert_relative_eq!(index.value(0, 0).unwrap(), 110.0, epsilon = 1e-9);
        assert_relative_eq!(index.value(1, 0).unwrap(), 99.0, epsilon = 1e-9);
    }

    #[test]
    fn test_missing_return_carries_product_forward() {
        let returns = table(vec![Some(0.05), None, Some(0.10)]);
        let index = cumulative_index(&returns, &CumulativeConfig::default());

        assert_relative_eq!(index.value(0, 0).unwrap(), 105.0, epsilon = 1e-9);
        assert_eq!(index.value(1, 0), None);
        // Compounds against 105, not against the missing cell
        assert_relative_eq!(index.value(2, 0).unwrap(), 115.5, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_base() {
        let returns = table(vec![Some(0.5)]);
        let index = cumulative_index(&returns, &CumulativeConfig { base: 1.0 });
        assert_relative_eq!(index.value(0, 0).unwrap(), 1.5, epsilon = 1e-12);
    }
}
