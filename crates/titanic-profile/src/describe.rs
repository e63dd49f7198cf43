//! Descriptive statistics and dtype summary.

use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;

use titanic_model::schema::{ColumnKind, is_numeric_dtype};
use titanic_model::values::cell_f64;

/// One row of the dtype summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DtypeEntry {
    pub name: String,
    pub dtype: String,
    pub kind: ColumnKind,
}

/// Name, polars dtype, and kind for every column, in frame order.
pub fn dtype_summary(df: &DataFrame) -> Vec<DtypeEntry> {
    df.get_columns()
        .iter()
        .map(|column| DtypeEntry {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            kind: if is_numeric_dtype(column.dtype()) {
                ColumnKind::Numeric
            } else {
                ColumnKind::Categorical
            },
        })
        .collect()
}

/// Descriptive statistics of one numeric column, over non-null values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; 0 when fewer than two values.
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summaries for every numeric column of the frame, in frame order.
/// Columns whose non-null values are empty are skipped.
pub fn describe_numeric(df: &DataFrame) -> Vec<NumericSummary> {
    let mut summaries = Vec::new();
    for column in df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let mut values: Vec<f64> = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            if let Some(v) = cell_f64(&column.get(idx).unwrap_or(AnyValue::Null)) {
                values.push(v);
            }
        }
        if values.is_empty() {
            continue;
        }
        values.sort_by(|a, b| a.total_cmp(b));
        summaries.push(NumericSummary {
            name: column.name().to_string(),
            count: values.len(),
            mean: mean(&values),
            std: sample_std(&values),
            min: values[0],
            q25: quantile_sorted(&values, 0.25),
            median: quantile_sorted(&values, 0.5),
            q75: quantile_sorted(&values, 0.75),
            max: values[values.len() - 1],
        });
    }
    summaries
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

/// Linear-interpolation quantile over an ascending slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = pos - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_skips_text_and_handles_nulls() {
        let df = polars::df![
            "Age" => [Some(20.0), Some(30.0), None, Some(40.0)],
            "Sex" => ["a", "b", "c", "d"],
        ]
        .unwrap();

        let summaries = describe_numeric(&df);
        assert_eq!(summaries.len(), 1);
        let age = &summaries[0];
        assert_eq!(age.name, "Age");
        assert_eq!(age.count, 3);
        assert!((age.mean - 30.0).abs() < 1e-9);
        assert!((age.std - 10.0).abs() < 1e-9);
        assert!((age.min - 20.0).abs() < 1e-9);
        assert!((age.median - 30.0).abs() < 1e-9);
        assert!((age.max - 40.0).abs() < 1e-9);
    }

    #[test]
    fn quantiles_interpolate() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile_sorted(&values, 0.25) - 1.75).abs() < 1e-9);
        assert!((quantile_sorted(&values, 0.5) - 2.5).abs() < 1e-9);
        assert!((quantile_sorted(&values, 0.75) - 3.25).abs() < 1e-9);
    }

    #[test]
    fn dtype_summary_classifies_kinds() {
        let df = polars::df![
            "Fare" => [7.25],
            "Sex" => ["male"],
        ]
        .unwrap();
        let entries = dtype_summary(&df);
        assert_eq!(entries[0].kind, ColumnKind::Numeric);
        assert_eq!(entries[1].kind, ColumnKind::Categorical);
    }
}
