//! Missing-value overview.

use polars::prelude::DataFrame;
use serde::Serialize;

/// One row of the missing-value overview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingColumn {
    pub name: String,
    pub missing: usize,
    /// Share of rows missing, 0..=100.
    pub percent: f64,
}

/// Per-column null counts, restricted to columns with nonzero missingness.
///
/// Fully populated columns get no row; the overview is empty for a frame
/// without nulls. Column order follows the frame.
pub fn missing_overview(df: &DataFrame) -> Vec<MissingColumn> {
    let height = df.height();
    let mut rows = Vec::new();
    for column in df.get_columns() {
        let missing = column.null_count();
        if missing == 0 {
            continue;
        }
        let percent = if height == 0 {
            0.0
        } else {
            missing as f64 / height as f64 * 100.0
        };
        rows.push(MissingColumn {
            name: column.name().to_string(),
            missing,
            percent,
        });
    }
    rows
}
