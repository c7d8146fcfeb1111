//! Price extraction
//!
//! First stage of the pipeline: selects one price field from a raw
//! provider table, producing a clean single-level table with one
//! column per ticker, sorted ascending by date and with all-missing
//! rows removed.

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::raw::{PriceField, RawPriceTable};
use crate::table::TimeTable;

/// Extract a clean price table for one price field.
///
/// For a two-level raw table the field must be present among the
/// first-level labels; for a flat single-ticker table the field's
/// column is selected and re-labeled with the ticker symbol. Either
/// way an absent field fails with [`AnalyticsError::FieldNotFound`].
///
/// Pure transform: the raw table is never modified.
pub fn extract_price_table(
    raw: &RawPriceTable,
    field: PriceField,
) -> AnalyticsResult<TimeTable> {
    let table = match raw {
        RawPriceTable::MultiTicker {
            dates,
            tickers,
            fields,
            columns,
        } => {
            let field_idx = fields
                .iter()
                .position(|f| *f == field)
                .ok_or_else(|| AnalyticsError::FieldNotFound {
                    field: field.to_string(),
                })?;

            TimeTable::new(
                dates.clone(),
                tickers.clone(),
                columns[field_idx].clone(),
            )?
        }
        RawPriceTable::SingleTicker {
            ticker,
            dates,
            fields,
            columns,
        } => {
            let field_idx = fields
                .iter()
                .position(|f| *f == field)
                .ok_or_else(|| AnalyticsError::FieldNotFound {
                    field: field.to_string(),
                })?;

            TimeTable::new(
                dates.clone(),
                vec![ticker.clone()],
                vec![columns[field_idx].clone()],
            )?
        }
    };

    Ok(table.sorted_by_date().drop_empty_rows())
}
