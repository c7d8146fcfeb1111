//! Raw provider tables
//!
//! Market-data providers return either a two-level column structure
//! (price field x ticker, when several tickers were requested) or a
//! flat one (price field only, single ticker). Rather than inferring
//! the shape ad hoc downstream, the raw table is tagged with its
//! variant here and resolved exactly once, in the extractor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AnalyticsError, AnalyticsResult};

/// A single price field of a daily OHLCV bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
    AdjClose,
    Volume,
}

impl PriceField {
    /// Canonical label, matching the provider's column names.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Open => "Open",
            PriceField::High => "High",
            PriceField::Low => "Low",
            PriceField::Close => "Close",
            PriceField::AdjClose => "Adj Close",
            PriceField::Volume => "Volume",
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw time-indexed price table as returned by a provider.
///
/// Cells are stored column-major with one `Vec<Option<f64>>` per
/// (field, ticker) pair. An empty table (no rows) is the provider's
/// signal that the fetch produced no usable data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawPriceTable {
    /// Two-level columns: one set of field columns per ticker.
    MultiTicker {
        dates: Vec<NaiveDate>,
        tickers: Vec<String>,
        fields: Vec<PriceField>,
        /// Indexed `columns[field][ticker]`, each the length of `dates`.
        columns: Vec<Vec<Vec<Option<f64>>>>,
    },
    /// Flat columns: one column per field, for a single known ticker.
    SingleTicker {
        ticker: String,
        dates: Vec<NaiveDate>,
        fields: Vec<PriceField>,
        /// Indexed `columns[field]`, each the length of `dates`.
        columns: Vec<Vec<Option<f64>>>,
    },
}

impl RawPriceTable {
    /// The canonical empty table.
    pub fn empty() -> Self {
        RawPriceTable::MultiTicker {
            dates: Vec::new(),
            tickers: Vec::new(),
            fields: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Build a two-level table, validating column shapes.
    pub fn multi(
        dates: Vec<NaiveDate>,
        tickers: Vec<String>,
        fields: Vec<PriceField>,
        columns: Vec<Vec<Vec<Option<f64>>>>,
    ) -> AnalyticsResult<Self> {
        if fields.len() != columns.len() {
            return Err(AnalyticsError::LabelMismatch {
                labels: fields.len(),
                columns: columns.len(),
            });
        }

        for (field, per_ticker) in fields.iter().zip(&columns) {
            if per_ticker.len() != tickers.len() {
                return Err(AnalyticsError::LabelMismatch {
                    labels: tickers.len(),
                    columns: per_ticker.len(),
                });
            }
            for (ticker, column) in tickers.iter().zip(per_ticker) {
                if column.len() != dates.len() {
                    return Err(AnalyticsError::ShapeMismatch {
                        dates: dates.len(),
                        values: column.len(),
                        column: format!("({field}, {ticker})"),
                    });
                }
            }
        }

        Ok(RawPriceTable::MultiTicker {
            dates,
            tickers,
            fields,
            columns,
        })
    }

    /// Build a flat single-ticker table, validating column shapes.
    pub fn single(
        ticker: String,
        dates: Vec<NaiveDate>,
        fields: Vec<PriceField>,
        columns: Vec<Vec<Option<f64>>>,
    ) -> AnalyticsResult<Self> {
        if fields.len() != columns.len() {
            return Err(AnalyticsError::LabelMismatch {
                labels: fields.len(),
                columns: columns.len(),
            });
        }

        for (field, column) in fields.iter().zip(&columns) {
            if column.len() != dates.len() {
                return Err(AnalyticsError::ShapeMismatch {
                    dates: dates.len(),
                    values: column.len(),
                    column: field.to_string(),
                });
            }
        }

        Ok(RawPriceTable::SingleTicker {
            ticker,
            dates,
            fields,
            columns,
        })
    }

    /// The date axis.
    pub fn dates(&self) -> &[NaiveDate] {
        match self {
            RawPriceTable::MultiTicker { dates, .. } => dates,
            RawPriceTable::SingleTicker { dates, .. } => dates,
        }
    }

    /// True when the table holds no rows.
    ///
    /// Callers must check this before running the pipeline: an empty
    /// fetch result short-circuits the whole analysis.
    pub fn is_empty(&self) -> bool {
        self.dates().is_empty()
    }

    /// A new table with every row removed whose cells are missing
    /// across all fields and tickers.
    pub fn drop_empty_rows(&self) -> Self {
        match self {
            RawPriceTable::MultiTicker {
                dates,
                tickers,
                fields,
                columns,
            } => {
                let keep: Vec<usize> = (0..dates.len())
                    .filter(|&row| {
                        columns
                            .iter()
                            .flatten()
                            .any(|column| column[row].is_some())
                    })
                    .collect();

                RawPriceTable::MultiTicker {
                    dates: keep.iter().map(|&i| dates[i]).collect(),
                    tickers: tickers.clone(),
                    fields: fields.clone(),
                    columns: columns
                        .iter()
                        .map(|per_ticker| {
                            per_ticker
                                .iter()
                                .map(|column| keep.iter().map(|&i| column[i]).collect())
                                .collect()
                        })
                        .collect(),
                }
            }
            RawPriceTable::SingleTicker {
                ticker,
                dates,
                fields,
                columns,
            } => {
                let keep: Vec<usize> = (0..dates.len())
                    .filter(|&row| columns.iter().any(|column| column[row].is_some()))
                    .collect();

                RawPriceTable::SingleTicker {
                    ticker: ticker.clone(),
                    dates: keep.iter().map(|&i| dates[i]).collect(),
                    fields: fields.clone(),
                    columns: columns
                        .iter()
                        .map(|column| keep.iter().map(|&i| column[i]).collect())
                        .collect(),
                }
            }
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
    fn test_empty_table() {
        let table = RawPriceTable::empty();
        assert!(table.is_empty());
        assert!(table.dates().is_empty());
    }

    #[test]
    fn test_multi_shape_validation() {
        let result = RawPriceTable::multi(
            vec![date(2024, 1, 2)],
            vec!["AAPL".to_string()],
            vec![PriceField::Close],
            vec![vec![vec![Some(100.0), Some(101.0)]]],
        );
        assert!(matches!(result, Err(AnalyticsError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_single_shape_validation() {
        let result = RawPriceTable::single(
            "AAPL".to_string(),
            vec![date(2024, 1, 2), date(2024, 1, 3)],
            vec![PriceField::Close, PriceField::Open],
            vec![vec![Some(100.0), Some(101.0)]],
        );
        assert!(matches!(result, Err(AnalyticsError::LabelMismatch { .. })));
    }

    #[test]
    fn test_drop_empty_rows() {
        let table = RawPriceTable::multi(
            vec![date(2024, 1, 2), date(2024, 1, 3)],
            vec!["AAPL".to_string()],
            vec![PriceField::Close, PriceField::Open],
            vec![
                vec![vec![Some(100.0), None]],
                vec![vec![Some(99.0), None]],
            ],
        )
        .unwrap()
        .drop_empty_rows();

        assert_eq!(table.dates(), &[date(2024, 1, 2)]);
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(PriceField::AdjClose.as_str(), "Adj Close");
        assert_eq!(PriceField::Close.to_string(), "Close");
    }
}
