//! The render dispatcher: selection in, chart spec and insight out.

use polars::prelude::DataFrame;
use tracing::warn;

use titanic_model::schema::{ColumnKind, column_kind};

use crate::aggregate::{
    correlation_matrix, frequency_table, histogram, hued_scatter, pivot_counts, scatter_data,
};
use crate::error::{InsightError, Result};
use crate::insight;
use crate::selection::ChartSelection;
use crate::spec::{ChartRender, ChartSpec, RenderWarning};

/// Fixed bin count for numeric histograms.
pub const HISTOGRAM_BINS: usize = 20;

/// A pivot larger than this on either axis gets an oversize warning.
pub const PIVOT_DISPLAY_LIMIT: usize = 50;

/// One render pass over `df` for `selection`.
///
/// Pure with respect to the frame: recomputes everything from scratch and
/// emits nothing itself. The caller hands the returned spec to a sink.
pub fn render(df: &DataFrame, selection: &ChartSelection) -> Result<ChartRender> {
    match selection {
        ChartSelection::Pie { category } => {
            let data = frequency_table(df, category)?;
            if data.is_empty() {
                return Ok(empty(format!("no data available for {category}")));
            }
            let insight = insight::pie(&data);
            Ok(ChartRender {
                spec: ChartSpec::Pie { data },
                insight,
                warnings: Vec::new(),
            })
        }
        ChartSelection::Bar { category, group } => {
            let data = pivot_counts(df, category, group)?;
            if data.is_empty() {
                return Ok(empty(format!(
                    "no data available for {category} by {group}"
                )));
            }
            let insight = insight::bar(&data);
            Ok(ChartRender {
                spec: ChartSpec::Bar { data },
                insight,
                warnings: Vec::new(),
            })
        }
        ChartSelection::Histogram { column } => match column_kind(df, column) {
            None => Err(InsightError::UnknownColumn(column.clone())),
            Some(ColumnKind::Numeric) => {
                let data = histogram(df, column, HISTOGRAM_BINS)?;
                if data.is_empty() {
                    return Ok(empty(format!("no data available for {column}")));
                }
                let insight = insight::numeric_histogram(&data);
                Ok(ChartRender {
                    spec: ChartSpec::NumericHistogram { data },
                    insight,
                    warnings: Vec::new(),
                })
            }
            Some(ColumnKind::Categorical) => {
                let data = frequency_table(df, column)?;
                if data.is_empty() {
                    return Ok(empty(format!("no data available for {column}")));
                }
                let insight = insight::categorical_histogram(&data);
                Ok(ChartRender {
                    spec: ChartSpec::CategoricalHistogram { data },
                    insight,
                    warnings: Vec::new(),
                })
            }
        },
        ChartSelection::ScatterSimple { x, y } => {
            let data = scatter_data(df, x, y)?;
            if data.points.is_empty() {
                return Ok(empty(format!("no paired data for {x} and {y}")));
            }
            let insight = Some(insight::scatter(&data));
            Ok(ChartRender {
                spec: ChartSpec::Scatter { data },
                insight,
                warnings: Vec::new(),
            })
        }
        ChartSelection::ScatterComplex { x, y, hue } => {
            let data = hued_scatter(df, x, y, hue)?;
            if data.point_count() == 0 {
                return Ok(empty(format!("no paired data for {x} and {y} by {hue}")));
            }
            let insight = insight::scatter_by_hue(&data);
            Ok(ChartRender {
                spec: ChartSpec::ScatterByHue { data },
                insight,
                warnings: Vec::new(),
            })
        }
        ChartSelection::HeatmapCategoricalCounts { x, y } => {
            let data = pivot_counts(df, x, y)?;
            if data.is_empty() {
                return Ok(empty(format!("no data for {y} by {x}")));
            }
            let warnings = pivot_warnings(data.y_labels.len(), data.x_labels.len());
            let insight = insight::heatmap_counts(&data);
            Ok(ChartRender {
                spec: ChartSpec::HeatmapCounts { data },
                insight,
                warnings,
            })
        }
        ChartSelection::HeatmapCategoricalPercentage { x, y } => {
            let data = pivot_counts(df, x, y)?;
            if data.is_empty() {
                return Ok(empty(format!("no data for {y} by {x}")));
            }
            let warnings = pivot_warnings(data.y_labels.len(), data.x_labels.len());
            let percentages = data.normalize_columns();
            let insight = insight::heatmap_percentage(&data, &percentages);
            Ok(ChartRender {
                spec: ChartSpec::HeatmapPercentage { data, percentages },
                insight,
                warnings,
            })
        }
        ChartSelection::HeatmapCorrelation => {
            let data = correlation_matrix(df);
            if data.is_empty() {
                return Ok(empty("no numeric columns to correlate".to_string()));
            }
            let insight = insight::correlation(&data);
            Ok(ChartRender {
                spec: ChartSpec::HeatmapCorrelation { data },
                insight,
                warnings: Vec::new(),
            })
        }
    }
}

fn empty(message: String) -> ChartRender {
    ChartRender {
        spec: ChartSpec::Empty { message },
        insight: None,
        warnings: Vec::new(),
    }
}

fn pivot_warnings(rows: usize, columns: usize) -> Vec<RenderWarning> {
    if rows > PIVOT_DISPLAY_LIMIT || columns > PIVOT_DISPLAY_LIMIT {
        warn!(rows, columns, "pivot exceeds display threshold");
        vec![RenderWarning::OversizedPivot { rows, columns }]
    } else {
        Vec::new()
    }
}
