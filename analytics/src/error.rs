//! Error types for the analytics pipeline

use thiserror::Error;

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Analytics pipeline error types
///
/// The arithmetic stages (returns, cumulative, volatility, drawdown)
/// are total functions and never return these; errors only arise at
/// the data-model boundary.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Requested price field is absent from the raw table
    #[error("price field '{field}' not found in raw data columns")]
    FieldNotFound {
        /// Name of the missing field
        field: String,
    },

    /// Table construction received columns of inconsistent length
    #[error("table shape mismatch: {dates} dates vs {values} values in column '{column}'")]
    ShapeMismatch {
        /// Length of the date axis
        dates: usize,
        /// Length of the offending column
        values: usize,
        /// Label of the offending column
        column: String,
    },

    /// Number of column labels does not match the number of columns
    #[error("label mismatch: {labels} labels for {columns} columns")]
    LabelMismatch {
        /// Number of labels supplied
        labels: usize,
        /// Number of columns supplied
        columns: usize,
    },
}
