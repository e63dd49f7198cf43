//! Column profiling for the dashboard's descriptive sections.
//!
//! Everything here is a pure read over a borrowed frame: the missing-value
//! overview, dtype summary, numeric descriptive statistics, categorical
//! cardinality, and the fixed survival summaries. No caching; each render
//! recomputes from the frame it is given.

pub mod describe;
pub mod missing;
pub mod survival;

pub use describe::{DtypeEntry, NumericSummary, describe_numeric, dtype_summary};
pub use missing::{MissingColumn, missing_overview};
pub use survival::{SurvivalGroup, survival_by};

use indexmap::IndexSet;
use polars::prelude::DataFrame;
use titanic_model::values::cell_text;

/// Distinct non-null values of a column, in first-encountered row order.
///
/// The order matters: categorical integer codes and tie-breaks downstream
/// are defined in terms of it.
pub fn distinct_values(df: &DataFrame, name: &str) -> Vec<String> {
    let Ok(column) = df.column(name) else {
        return Vec::new();
    };
    let mut seen: IndexSet<String> = IndexSet::new();
    for idx in 0..df.height() {
        let value = cell_text(&column.get(idx).unwrap_or(polars::prelude::AnyValue::Null));
        if !value.is_empty() {
            seen.insert(value);
        }
    }
    seen.into_iter().collect()
}

/// Number of distinct non-null values in a column.
pub fn distinct_count(df: &DataFrame, name: &str) -> usize {
    distinct_values(df, name).len()
}
