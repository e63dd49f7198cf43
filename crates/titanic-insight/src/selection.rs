//! The user's chart selection for one render pass.

use serde::Serialize;

/// Closed set of chart kinds, each variant carrying exactly the column
/// references it needs. Constructed fresh from user input per render and
/// discarded afterwards; the dispatcher matches exhaustively, so every
/// kind is guaranteed a handler and every handler its required fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartSelection {
    Pie {
        category: String,
    },
    Bar {
        category: String,
        group: String,
    },
    Histogram {
        column: String,
    },
    ScatterSimple {
        x: String,
        y: String,
    },
    ScatterComplex {
        x: String,
        y: String,
        hue: String,
    },
    HeatmapCategoricalCounts {
        x: String,
        y: String,
    },
    HeatmapCategoricalPercentage {
        x: String,
        y: String,
    },
    /// Uses every numeric column of the table; no explicit selection.
    HeatmapCorrelation,
}

impl ChartSelection {
    /// Human-facing chart name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pie { .. } => "Pie Chart",
            Self::Bar { .. } => "Bar Chart",
            Self::Histogram { .. } => "Histogram",
            Self::ScatterSimple { .. } => "Scatter Plot",
            Self::ScatterComplex { .. } => "Scatter Plot (by hue)",
            Self::HeatmapCategoricalCounts { .. } => "Heatmap (Categorical Counts)",
            Self::HeatmapCategoricalPercentage { .. } => "Heatmap (Categorical Percentages)",
            Self::HeatmapCorrelation => "Heatmap (Correlation)",
        }
    }

    /// The column references this selection carries, in slot order.
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Self::Pie { category } => vec![category],
            Self::Bar { category, group } => vec![category, group],
            Self::Histogram { column } => vec![column],
            Self::ScatterSimple { x, y } => vec![x, y],
            Self::ScatterComplex { x, y, hue } => vec![x, y, hue],
            Self::HeatmapCategoricalCounts { x, y }
            | Self::HeatmapCategoricalPercentage { x, y } => vec![x, y],
            Self::HeatmapCorrelation => Vec::new(),
        }
    }
}
