//! Chart descriptions handed to the rendering sink.
//!
//! A [`ChartSpec`] is pure data: the renderer computes it, and whichever
//! sink is attached (terminal tables, JSON emission) decides how to draw
//! it. [`ChartSpec::Empty`] is the designed fallback when no rows survive
//! null-dropping; it renders as text where the chart would have been.

use std::fmt;

use serde::Serialize;

use crate::aggregate::{
    CorrelationMatrix, FrequencyTable, Histogram, HuedScatter, PivotTable, ScatterData,
};

/// A fully described chart, ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie {
        data: FrequencyTable,
    },
    Bar {
        data: PivotTable,
    },
    CategoricalHistogram {
        data: FrequencyTable,
    },
    NumericHistogram {
        data: Histogram,
    },
    Scatter {
        data: ScatterData,
    },
    ScatterByHue {
        data: HuedScatter,
    },
    HeatmapCounts {
        data: PivotTable,
    },
    HeatmapPercentage {
        data: PivotTable,
        /// Column-normalized form of `data.counts`; each column sums to 100.
        percentages: Vec<Vec<f64>>,
    },
    HeatmapCorrelation {
        data: CorrelationMatrix,
    },
    /// Text fallback shown in place of a chart.
    Empty {
        message: String,
    },
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Non-fatal conditions noticed while aggregating; the chart still renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "warning", rename_all = "snake_case")]
pub enum RenderWarning {
    /// The pivot exceeds the comfortable display size.
    OversizedPivot { rows: usize, columns: usize },
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedPivot { rows, columns } => write!(
                f,
                "pivot result is large ({rows} x {columns}); rendering may be expensive"
            ),
        }
    }
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRender {
    pub spec: ChartSpec,
    /// Omitted when the aggregation was empty or the sentence's inputs are
    /// unavailable (e.g. no numeric outcome column for correlations).
    pub insight: Option<String>,
    pub warnings: Vec<RenderWarning>,
}
