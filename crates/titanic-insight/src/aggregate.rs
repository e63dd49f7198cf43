//! Aggregations backing each chart kind.
//!
//! All aggregations walk the frame row by row and key their results in
//! first-encountered order: tie-breaks ("largest group"), categorical
//! integer codes, and axis label order are all defined in terms of the
//! order rows appear in the table.

use indexmap::{IndexMap, IndexSet};
use polars::prelude::{AnyValue, DataFrame, DataType};
use serde::Serialize;

use titanic_model::schema::{ColumnKind, is_numeric_dtype};
use titanic_model::values::{cell_f64, cell_text};

use crate::error::{InsightError, Result};

/// One category of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry {
    pub label: String,
    pub count: u64,
}

/// Category → count over the non-null values of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub column: String,
    pub entries: Vec<FrequencyEntry>,
    pub total: u64,
}

impl FrequencyTable {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Share of `entry` in the total, 0..=100.
    pub fn percent(&self, entry: &FrequencyEntry) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            entry.count as f64 / self.total as f64 * 100.0
        }
    }

    /// Entry with the highest count; ties resolve to the entry seen first.
    pub fn largest(&self) -> Option<&FrequencyEntry> {
        let mut best: Option<&FrequencyEntry> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        best
    }
}

/// Frequency of each distinct non-null value of `column`.
pub fn frequency_table(df: &DataFrame, column: &str) -> Result<FrequencyTable> {
    let series = df
        .column(column)
        .map_err(|_| InsightError::UnknownColumn(column.to_string()))?;

    let mut counts: IndexMap<String, u64> = IndexMap::new();
    for idx in 0..df.height() {
        let label = cell_text(&series.get(idx).unwrap_or(AnyValue::Null));
        if label.is_empty() {
            continue;
        }
        *counts.entry(label).or_insert(0) += 1;
    }

    let total = counts.values().sum();
    Ok(FrequencyTable {
        column: column.to_string(),
        entries: counts
            .into_iter()
            .map(|(label, count)| FrequencyEntry { label, count })
            .collect(),
        total,
    })
}

/// Co-occurrence counts of two columns: rows keyed by the y column,
/// columns by the x column, absent combinations zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PivotTable {
    pub x_column: String,
    pub y_column: String,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// `counts[row][col]` pairs `y_labels[row]` with `x_labels[col]`.
    pub counts: Vec<Vec<u64>>,
    pub total: u64,
}

impl PivotTable {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Per-x-label column sums.
    pub fn column_totals(&self) -> Vec<u64> {
        let mut totals = vec![0u64; self.x_labels.len()];
        for row in &self.counts {
            for (col, count) in row.iter().enumerate() {
                totals[col] += count;
            }
        }
        totals
    }

    /// Each column rescaled to sum to 100. Columns with no observations
    /// stay all-zero.
    pub fn normalize_columns(&self) -> Vec<Vec<f64>> {
        let totals = self.column_totals();
        self.counts
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, count)| {
                        if totals[col] == 0 {
                            0.0
                        } else {
                            *count as f64 / totals[col] as f64 * 100.0
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Cell with the highest count as `(row, col, count)`; ties resolve to
    /// the earlier row, then the earlier column.
    pub fn largest_cell(&self) -> Option<(usize, usize, u64)> {
        let mut best: Option<(usize, usize, u64)> = None;
        for (row, cols) in self.counts.iter().enumerate() {
            for (col, count) in cols.iter().enumerate() {
                if best.is_none_or(|(_, _, b)| *count > b) {
                    best = Some((row, col, *count));
                }
            }
        }
        best.filter(|(_, _, count)| *count > 0)
    }
}

/// Cross-tabulate two columns over rows where both are non-null.
pub fn pivot_counts(df: &DataFrame, x: &str, y: &str) -> Result<PivotTable> {
    let x_series = df
        .column(x)
        .map_err(|_| InsightError::UnknownColumn(x.to_string()))?;
    let y_series = df
        .column(y)
        .map_err(|_| InsightError::UnknownColumn(y.to_string()))?;

    let mut x_labels: IndexSet<String> = IndexSet::new();
    let mut y_labels: IndexSet<String> = IndexSet::new();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for idx in 0..df.height() {
        let xv = cell_text(&x_series.get(idx).unwrap_or(AnyValue::Null));
        let yv = cell_text(&y_series.get(idx).unwrap_or(AnyValue::Null));
        if xv.is_empty() || yv.is_empty() {
            continue;
        }
        let (xi, _) = x_labels.insert_full(xv);
        let (yi, _) = y_labels.insert_full(yv);
        pairs.push((xi, yi));
    }

    let mut counts = vec![vec![0u64; x_labels.len()]; y_labels.len()];
    for (xi, yi) in &pairs {
        counts[*yi][*xi] += 1;
    }

    Ok(PivotTable {
        x_column: x.to_string(),
        y_column: y.to_string(),
        x_labels: x_labels.into_iter().collect(),
        y_labels: y_labels.into_iter().collect(),
        counts,
        total: pairs.len() as u64,
    })
}

/// One equal-width histogram bin, inclusive of `lower`, exclusive of
/// `upper` except for the last bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Equal-width binning of a numeric column's non-null values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    pub total: u64,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Bin with the highest count; ties resolve to the lower bin.
    pub fn fullest_bin(&self) -> Option<&HistogramBin> {
        let mut best: Option<&HistogramBin> = None;
        for bin in &self.bins {
            if best.is_none_or(|b| bin.count > b.count) {
                best = Some(bin);
            }
        }
        best.filter(|bin| bin.count > 0)
    }
}

/// Bin the non-null values of a numeric column into `bin_count` equal-width
/// bins. A degenerate range (all values equal) produces a single bin.
pub fn histogram(df: &DataFrame, column: &str, bin_count: usize) -> Result<Histogram> {
    let series = df
        .column(column)
        .map_err(|_| InsightError::UnknownColumn(column.to_string()))?;

    let mut values: Vec<f64> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let Some(v) = cell_f64(&series.get(idx).unwrap_or(AnyValue::Null)) {
            values.push(v);
        }
    }
    if values.is_empty() {
        return Ok(Histogram {
            column: column.to_string(),
            bins: Vec::new(),
            total: 0,
        });
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return Ok(Histogram {
            column: column.to_string(),
            bins: vec![HistogramBin {
                lower: min,
                upper: max,
                count: values.len() as u64,
            }],
            total: values.len() as u64,
        });
    }

    let width = (max - min) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bin_count {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();
    for v in &values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    Ok(Histogram {
        column: column.to_string(),
        bins,
        total: values.len() as u64,
    })
}

/// Label-to-code mapping applied to a categorical axis before plotting.
/// The code of a label is its index; codes follow first-encounter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisCoding {
    pub column: String,
    pub labels: Vec<String>,
}

/// Paired non-null values of two axes, plus their Pearson correlation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterData {
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<(f64, f64)>,
    pub x_coding: Option<AxisCoding>,
    pub y_coding: Option<AxisCoding>,
    /// `None` with fewer than two pairs or a zero-variance axis.
    pub correlation: Option<f64>,
}

/// Scatter points split by the distinct values of a hue column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterGroup {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HuedScatter {
    pub x_column: String,
    pub y_column: String,
    pub hue_column: String,
    pub groups: Vec<ScatterGroup>,
    pub x_coding: Option<AxisCoding>,
    pub y_coding: Option<AxisCoding>,
}

impl HuedScatter {
    pub fn point_count(&self) -> usize {
        self.groups.iter().map(|g| g.points.len()).sum()
    }

    /// Group holding the most points; ties resolve to the group seen first.
    pub fn largest_group(&self) -> Option<&ScatterGroup> {
        let mut best: Option<&ScatterGroup> = None;
        for group in &self.groups {
            if best.is_none_or(|b| group.points.len() > b.points.len()) {
                best = Some(group);
            }
        }
        best
    }
}

/// Pair the non-null values of two axes, coding categorical axes to stable
/// integers.
pub fn scatter_data(df: &DataFrame, x: &str, y: &str) -> Result<ScatterData> {
    let (xs, x_coding) = axis_values(df, x)?;
    let (ys, y_coding) = axis_values(df, y)?;

    let points: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(xv, yv)| Some(((*xv)?, (*yv)?)))
        .collect();
    let correlation = pearson(&points);

    Ok(ScatterData {
        x_column: x.to_string(),
        y_column: y.to_string(),
        points,
        x_coding,
        y_coding,
        correlation,
    })
}

/// Same pairing as [`scatter_data`], additionally grouped by a hue column.
/// Rows with a null hue are dropped.
pub fn hued_scatter(df: &DataFrame, x: &str, y: &str, hue: &str) -> Result<HuedScatter> {
    let (xs, x_coding) = axis_values(df, x)?;
    let (ys, y_coding) = axis_values(df, y)?;
    let hue_series = df
        .column(hue)
        .map_err(|_| InsightError::UnknownColumn(hue.to_string()))?;

    let mut groups: IndexMap<String, Vec<(f64, f64)>> = IndexMap::new();
    for idx in 0..df.height() {
        let (Some(xv), Some(yv)) = (xs[idx], ys[idx]) else {
            continue;
        };
        let label = cell_text(&hue_series.get(idx).unwrap_or(AnyValue::Null));
        if label.is_empty() {
            continue;
        }
        groups.entry(label).or_default().push((xv, yv));
    }

    Ok(HuedScatter {
        x_column: x.to_string(),
        y_column: y.to_string(),
        hue_column: hue.to_string(),
        groups: groups
            .into_iter()
            .map(|(label, points)| ScatterGroup { label, points })
            .collect(),
        x_coding,
        y_coding,
    })
}

/// Per-row numeric values of one axis. Numeric columns pass through;
/// text columns are coded by first-encounter label index.
fn axis_values(df: &DataFrame, column: &str) -> Result<(Vec<Option<f64>>, Option<AxisCoding>)> {
    let series = df
        .column(column)
        .map_err(|_| InsightError::UnknownColumn(column.to_string()))?;

    if is_numeric_dtype(series.dtype()) {
        let mut values = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            values.push(cell_f64(&series.get(idx).unwrap_or(AnyValue::Null)));
        }
        return Ok((values, None));
    }

    if series.dtype() != &DataType::String {
        return Err(InsightError::TypeMismatch {
            column: column.to_string(),
            expected: ColumnKind::Numeric,
        });
    }

    let mut codes: IndexMap<String, usize> = IndexMap::new();
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let label = cell_text(&series.get(idx).unwrap_or(AnyValue::Null));
        if label.is_empty() {
            values.push(None);
            continue;
        }
        let next = codes.len();
        let code = *codes.entry(label).or_insert(next);
        values.push(Some(code as f64));
    }
    Ok((
        values,
        Some(AxisCoding {
            column: column.to_string(),
            labels: codes.into_keys().collect(),
        }),
    ))
}

/// Pearson correlation coefficient of paired points.
///
/// `None` with fewer than two pairs or when either coordinate has zero
/// variance.
pub fn pearson(points: &[(f64, f64)]) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in points {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Pairwise Pearson correlations over every numeric column of the frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `cells[i][j]` correlates `columns[i]` with `columns[j]`; `None`
    /// where undefined (zero variance or fewer than two paired rows).
    pub cells: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Correlations of every other column against `target`, in matrix
    /// order. `None` when `target` is not a numeric column of the frame.
    pub fn against(&self, target: &str) -> Option<Vec<(String, Option<f64>)>> {
        let t = self.columns.iter().position(|c| c == target)?;
        Some(
            self.columns
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != t)
                .map(|(i, name)| (name.clone(), self.cells[t][i]))
                .collect(),
        )
    }
}

/// Correlation matrix over all numeric columns of the frame.
pub fn correlation_matrix(df: &DataFrame) -> CorrelationMatrix {
    let mut numeric: Vec<String> = Vec::new();
    let mut value_columns: Vec<Vec<Option<f64>>> = Vec::new();
    for series in df.get_columns() {
        if !is_numeric_dtype(series.dtype()) {
            continue;
        }
        let mut values = Vec::with_capacity(df.height());
        for idx in 0..df.height() {
            values.push(cell_f64(&series.get(idx).unwrap_or(AnyValue::Null)));
        }
        numeric.push(series.name().to_string());
        value_columns.push(values);
    }

    let mut cells = vec![vec![None; numeric.len()]; numeric.len()];
    for i in 0..numeric.len() {
        for j in i..numeric.len() {
            let points: Vec<(f64, f64)> = value_columns[i]
                .iter()
                .zip(value_columns[j].iter())
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .collect();
            let r = pearson(&points);
            cells[i][j] = r;
            cells[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: numeric,
        cells,
    }
}
