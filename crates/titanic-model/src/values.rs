//! Row-level value extraction helpers over polars frames.
//!
//! Aggregations in this workspace walk frames row by row through `AnyValue`
//! rather than dtype-specialized accessors, so the same code path handles
//! raw (numeric) and cleaned (retyped) columns.

use polars::prelude::{AnyValue, DataFrame};

/// String form of a cell. Null becomes the empty string; numeric values
/// drop trailing fractional zeros so `3.0` prints as `3`.
pub fn cell_text(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float32(v) => format_number(f64::from(*v)),
        AnyValue::Float64(v) => format_number(*v),
        AnyValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        other => other.to_string(),
    }
}

/// Numeric value of a cell, if it has one. Textual cells are not parsed;
/// a string column must be coded explicitly before numeric use.
pub fn cell_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Int8(v) => Some(f64::from(*v)),
        AnyValue::Int16(v) => Some(f64::from(*v)),
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt8(v) => Some(f64::from(*v)),
        AnyValue::UInt16(v) => Some(f64::from(*v)),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        _ => None,
    }
}

/// Integer value of a cell, if it has one.
pub fn cell_i64(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(i64::from(*v)),
        AnyValue::Int16(v) => Some(i64::from(*v)),
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int64(v) => Some(*v),
        AnyValue::UInt8(v) => Some(i64::from(*v)),
        AnyValue::UInt16(v) => Some(i64::from(*v)),
        AnyValue::UInt32(v) => Some(i64::from(*v)),
        AnyValue::UInt64(v) => i64::try_from(*v).ok(),
        _ => None,
    }
}

/// Cell at (`name`, `idx`) as display text; empty when the column is
/// missing or the cell is null.
pub fn column_text(df: &DataFrame, name: &str, idx: usize) -> String {
    match df.column(name) {
        Ok(column) => cell_text(&column.get(idx).unwrap_or(AnyValue::Null)),
        Err(_) => String::new(),
    }
}

/// Cell at (`name`, `idx`) as f64; `None` for nulls, text, or a missing
/// column.
pub fn column_f64(df: &DataFrame, name: &str, idx: usize) -> Option<f64> {
    let column = df.column(name).ok()?;
    cell_f64(&column.get(idx).ok()?)
}

/// Format a float without trailing fractional zeros.
pub fn format_number(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_text_formats_values() {
        assert_eq!(cell_text(&AnyValue::Null), "");
        assert_eq!(cell_text(&AnyValue::Int64(3)), "3");
        assert_eq!(cell_text(&AnyValue::Float64(7.25)), "7.25");
        assert_eq!(cell_text(&AnyValue::Float64(3.0)), "3");
        assert_eq!(cell_text(&AnyValue::String("male")), "male");
    }

    #[test]
    fn cell_f64_rejects_text() {
        assert_eq!(cell_f64(&AnyValue::Int64(2)), Some(2.0));
        assert_eq!(cell_f64(&AnyValue::Float64(1.5)), Some(1.5));
        assert_eq!(cell_f64(&AnyValue::String("2")), None);
        assert_eq!(cell_f64(&AnyValue::Null), None);
    }

    #[test]
    fn format_number_trims_trailing_zeros() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.50), "3.5");
        assert_eq!(format_number(0.0), "0");
    }
}
