//! Date-indexed value tables
//!
//! All pipeline stages exchange data as a [`TimeTable`]: a 2-D table
//! keyed by (date, ticker) with an explicit optional value per cell.
//! Missing observations are `None`, never NaN sentinels, and every
//! stage produces a fresh table rather than mutating its input.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};

/// A date-indexed table with one column of optional values per ticker.
///
/// Dates form the row axis; columns are stored column-major and are
/// always the same length as the date axis. The table is immutable
/// after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTable {
    dates: Vec<NaiveDate>,
    tickers: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
}

impl TimeTable {
    /// Create a table from a date axis, ticker labels, and one column
    /// of cells per ticker.
    ///
    /// # Errors
    /// Returns [`AnalyticsError::LabelMismatch`] when labels and
    /// columns disagree in count, or [`AnalyticsError::ShapeMismatch`]
    /// when any column's length differs from the date axis.
    pub fn new(
        dates: Vec<NaiveDate>,
        tickers: Vec<String>,
        columns: Vec<Vec<Option<f64>>>,
    ) -> AnalyticsResult<Self> {
        if tickers.len() != columns.len() {
            return Err(AnalyticsError::LabelMismatch {
                labels: tickers.len(),
                columns: columns.len(),
            });
        }

        for (ticker, column) in tickers.iter().zip(&columns) {
            if column.len() != dates.len() {
                return Err(AnalyticsError::ShapeMismatch {
                    dates: dates.len(),
                    values: column.len(),
                    column: ticker.clone(),
                });
            }
        }

        Ok(Self {
            dates,
            tickers,
            columns,
        })
    }

    /// Create a table with no rows and no columns.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            tickers: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// The date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The ticker labels, in column order.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Number of rows (dates).
    pub fn num_rows(&self) -> usize {
        self.dates.len()
    }

    /// Number of columns (tickers).
    pub fn num_columns(&self) -> usize {
        self.tickers.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Column cells by position.
    pub fn column(&self, index: usize) -> &[Option<f64>] {
        &self.columns[index]
    }

    /// Column cells for a ticker, if present.
    pub fn column_for(&self, ticker: &str) -> Option<&[Option<f64>]> {
        self.ticker_index(ticker).map(|i| self.columns[i].as_slice())
    }

    /// Position of a ticker's column, if present.
    pub fn ticker_index(&self, ticker: &str) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }

    /// Cell value at (row, column).
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        self.columns[column][row]
    }

    /// A new table containing only the requested tickers, in the
    /// requested order. Unknown tickers are skipped.
    pub fn select_tickers(&self, tickers: &[&str]) -> Self {
        let mut selected_tickers = Vec::new();
        let mut selected_columns = Vec::new();

        for ticker in tickers {
            if let Some(idx) = self.ticker_index(ticker) {
                selected_tickers.push(self.tickers[idx].clone());
                selected_columns.push(self.columns[idx].clone());
            }
        }

        Self {
            dates: self.dates.clone(),
            tickers: selected_tickers,
            columns: selected_columns,
        }
    }

    /// A new table with rows reordered so the date axis is strictly
    /// ascending.
    pub fn sorted_by_date(&self) -> Self {
        let mut order: Vec<usize> = (0..self.dates.len()).collect();
        order.sort_by_key(|&i| self.dates[i]);

        let dates = order.iter().map(|&i| self.dates[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|col| order.iter().map(|&i| col[i]).collect())
            .collect();

        Self {
            dates,
            tickers: self.tickers.clone(),
            columns,
        }
    }

    /// A new table with every row removed whose cells are missing for
    /// all tickers.
    pub fn drop_empty_rows(&self) -> Self {
        let keep: Vec<usize> = (0..self.dates.len())
            .filter(|&row| self.columns.iter().any(|col| col[row].is_some()))
            .collect();

        let dates = keep.iter().map(|&i| self.dates[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|col| keep.iter().map(|&i| col[i]).collect())
            .collect();

        Self {
            dates,
            tickers: self.tickers.clone(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_validates_shape() {
        let dates = vec![date(2024, 1, 2), date(2024, 1, 3)];
        let result = TimeTable::new(
            dates,
            vec!["AAPL".to_string()],
            vec![vec![Some(1.0)]],
        );
        assert!(matches!(
            result,
            Err(AnalyticsError::ShapeMismatch { dates: 2, values: 1, .. })
        ));
    }

    #[test]
    fn test_new_validates_labels() {
        let result = TimeTable::new(
            vec![date(2024, 1, 2)],
            vec!["AAPL".to_string(), "MSFT".to_string()],
            vec![vec![Some(1.0)]],
        );
        assert!(matches!(result, Err(AnalyticsError::LabelMismatch { .. })));
    }

    #[test]
    fn test_sorted_by_date() {
        let table = TimeTable::new(
            vec![date(2024, 1, 3), date(2024, 1, 2)],
            vec!["AAPL".to_string()],
            vec![vec![Some(2.0), Some(1.0)]],
        )
        .unwrap();

        let sorted = table.sorted_by_date();
        assert_eq!(sorted.dates(), &[date(2024, 1, 2), date(2024, 1, 3)]);
        assert_eq!(sorted.column(0), &[Some(1.0), Some(2.0)]);
    }

    #[test]
    fn test_drop_empty_rows() {
        let table = TimeTable::new(
            vec![date(2024, 1, 2), date(2024, 1, 3), date(2024, 1, 4)],
            vec!["AAPL".to_string(), "MSFT".to_string()],
            vec![
                vec![Some(1.0), None, Some(3.0)],
                vec![Some(2.0), None, None],
            ],
        )
        .unwrap();

        let cleaned = table.drop_empty_rows();
        assert_eq!(cleaned.num_rows(), 2);
        assert_eq!(cleaned.dates(), &[date(2024, 1, 2), date(2024, 1, 4)]);
        assert_eq!(cleaned.column(1), &[Some(2.0), None]);
    }

    #[test]
    fn test_select_tickers() {
        let table = TimeTable::new(
            vec![date(2024, 1, 2)],
            vec!["AAPL".to_string(), "MSFT".to_string()],
            vec![vec![Some(1.0)], vec![Some(2.0)]],
        )
        .unwrap();

        let subset = table.select_tickers(&["MSFT", "NVDA"]);
        assert_eq!(subset.tickers(), &["MSFT".to_string()]);
        assert_eq!(subset.column(0), &[Some(2.0)]);
    }
}
