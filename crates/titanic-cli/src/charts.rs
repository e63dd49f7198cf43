//! Chart rendering sinks.
//!
//! The renderer describes a chart as data ([`ChartSpec`]); a sink decides
//! how to draw it. [`TerminalSink`] draws bar-glyph tables and character
//! grids to stdout; [`JsonSink`] emits the spec itself for downstream
//! tooling. [`ChartSpec::Empty`] renders as an inline text fallback where
//! the chart would have been, matching the designed no-data branch.

use std::io::Write;

use anyhow::Result;
use comfy_table::{Cell, CellAlignment, Table};

use titanic_insight::{
    ChartRender, ChartSpec, CorrelationMatrix, FrequencyTable, Histogram, HuedScatter, PivotTable,
    ScatterData,
};
use titanic_model::values::format_number;

use crate::sections::apply_table_style;

/// Maximum width of a bar glyph run.
const BAR_WIDTH: usize = 30;
/// Character grid dimensions for scatter plots.
const GRID_COLUMNS: usize = 56;
const GRID_ROWS: usize = 18;
/// Glyphs assigned to hue groups, in group order.
const HUE_GLYPHS: &[char] = &['o', 'x', '+', '#', '@', '%', '&', '*'];

/// Where one chart render goes.
pub trait ChartSink {
    fn emit(&mut self, title: &str, render: &ChartRender) -> Result<()>;
}

/// Draws charts as text into any writer (stdout in production).
pub struct TerminalSink<W: Write> {
    writer: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ChartSink for TerminalSink<W> {
    fn emit(&mut self, title: &str, render: &ChartRender) -> Result<()> {
        writeln!(self.writer, "{title}")?;
        for warning in &render.warnings {
            writeln!(self.writer, "warning: {warning}")?;
        }
        let body = chart_to_string(&render.spec);
        writeln!(self.writer, "{body}")?;
        if let Some(insight) = &render.insight {
            writeln!(self.writer, "Insight: {insight}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Emits the machine-readable chart spec as pretty JSON.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ChartSink for JsonSink<W> {
    fn emit(&mut self, _title: &str, render: &ChartRender) -> Result<()> {
        let json = serde_json::to_string_pretty(render)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

/// Render a chart spec to its terminal text form.
pub fn chart_to_string(spec: &ChartSpec) -> String {
    match spec {
        ChartSpec::Pie { data } => pie_chart(data),
        ChartSpec::Bar { data } => bar_chart(data),
        ChartSpec::CategoricalHistogram { data } => frequency_chart(data),
        ChartSpec::NumericHistogram { data } => histogram_chart(data),
        ChartSpec::Scatter { data } => scatter_chart(data),
        ChartSpec::ScatterByHue { data } => hued_scatter_chart(data),
        ChartSpec::HeatmapCounts { data } => heatmap_counts(data),
        ChartSpec::HeatmapPercentage { data, percentages } => heatmap_percentage(data, percentages),
        ChartSpec::HeatmapCorrelation { data } => correlation_heatmap(data),
        ChartSpec::Empty { message } => format!("[no chart] {message}"),
    }
}

fn bar_glyphs(count: u64, max: u64) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let width = ((count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width.max(1))
}

fn pie_chart(data: &FrequencyTable) -> String {
    let max = data.entries.iter().map(|e| e.count).max().unwrap_or(0);
    let mut table = Table::new();
    table.set_header(vec![data.column.as_str(), "Count", "Share", ""]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for entry in &data.entries {
        table.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.count),
            Cell::new(format!("{:.1}%", data.percent(entry))),
            Cell::new(bar_glyphs(entry.count, max)),
        ]);
    }
    table.to_string()
}

fn frequency_chart(data: &FrequencyTable) -> String {
    let max = data.entries.iter().map(|e| e.count).max().unwrap_or(0);
    let mut table = Table::new();
    table.set_header(vec![data.column.as_str(), "Count", ""]);
    apply_table_style(&mut table);
    for entry in &data.entries {
        table.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(entry.count),
            Cell::new(bar_glyphs(entry.count, max)),
        ]);
    }
    table.to_string()
}

fn bar_chart(data: &PivotTable) -> String {
    let max = data
        .counts
        .iter()
        .flatten()
        .copied()
        .max()
        .unwrap_or(0);
    let mut table = Table::new();
    table.set_header(vec![
        data.x_column.as_str(),
        data.y_column.as_str(),
        "Count",
        "",
    ]);
    apply_table_style(&mut table);
    for (col, x_label) in data.x_labels.iter().enumerate() {
        for (row, y_label) in data.y_labels.iter().enumerate() {
            let count = data.counts[row][col];
            table.add_row(vec![
                Cell::new(x_label),
                Cell::new(y_label),
                Cell::new(count),
                Cell::new(bar_glyphs(count, max)),
            ]);
        }
    }
    table.to_string()
}

fn histogram_chart(data: &Histogram) -> String {
    let max = data.bins.iter().map(|b| b.count).max().unwrap_or(0);
    let mut table = Table::new();
    table.set_header(vec![data.column.as_str(), "Count", ""]);
    apply_table_style(&mut table);
    for bin in &data.bins {
        table.add_row(vec![
            Cell::new(format!(
                "{} to {}",
                format_number(bin.lower),
                format_number(bin.upper)
            )),
            Cell::new(bin.count),
            Cell::new(bar_glyphs(bin.count, max)),
        ]);
    }
    table.to_string()
}

fn heatmap_counts(data: &PivotTable) -> String {
    let mut table = Table::new();
    let mut header = vec![format!("{} \\ {}", data.y_column, data.x_column)];
    header.extend(data.x_labels.iter().cloned());
    table.set_header(header);
    apply_table_style(&mut table);
    for (row, y_label) in data.y_labels.iter().enumerate() {
        let mut cells = vec![Cell::new(y_label)];
        for count in &data.counts[row] {
            cells.push(Cell::new(count).set_alignment(CellAlignment::Right));
        }
        table.add_row(cells);
    }
    table.to_string()
}

fn heatmap_percentage(data: &PivotTable, percentages: &[Vec<f64>]) -> String {
    let mut table = Table::new();
    let mut header = vec![format!("{} \\ {}", data.y_column, data.x_column)];
    header.extend(data.x_labels.iter().cloned());
    table.set_header(header);
    apply_table_style(&mut table);
    for (row, y_label) in data.y_labels.iter().enumerate() {
        let mut cells = vec![Cell::new(y_label)];
        for pct in &percentages[row] {
            cells.push(Cell::new(format!("{pct:.1}%")).set_alignment(CellAlignment::Right));
        }
        table.add_row(cells);
    }
    table.to_string()
}

fn correlation_heatmap(data: &CorrelationMatrix) -> String {
    let mut table = Table::new();
    let mut header = vec![String::new()];
    header.extend(data.columns.iter().cloned());
    table.set_header(header);
    apply_table_style(&mut table);
    for (row, name) in data.columns.iter().enumerate() {
        let mut cells = vec![Cell::new(name)];
        for cell in &data.cells[row] {
            let text = match cell {
                Some(r) => format!("{r:.2}"),
                None => "-".to_string(),
            };
            cells.push(Cell::new(text).set_alignment(CellAlignment::Right));
        }
        table.add_row(cells);
    }
    table.to_string()
}

fn scatter_chart(data: &ScatterData) -> String {
    let mut out = point_grid(&[('*', data.points.as_slice())]);
    out.push_str(&axis_note(&data.x_column, &data.y_column, &data.points));
    if let Some(coding) = &data.x_coding {
        out.push_str(&coding_note(&coding.column, &coding.labels));
    }
    if let Some(coding) = &data.y_coding {
        out.push_str(&coding_note(&coding.column, &coding.labels));
    }
    out
}

fn hued_scatter_chart(data: &HuedScatter) -> String {
    let layers: Vec<(char, &[(f64, f64)])> = data
        .groups
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            (
                HUE_GLYPHS[idx % HUE_GLYPHS.len()],
                group.points.as_slice(),
            )
        })
        .collect();
    let all_points: Vec<(f64, f64)> = data
        .groups
        .iter()
        .flat_map(|group| group.points.iter().copied())
        .collect();

    let mut out = point_grid(&layers);
    out.push_str(&axis_note(&data.x_column, &data.y_column, &all_points));
    for (idx, group) in data.groups.iter().enumerate() {
        out.push_str(&format!(
            "  {} {} = {} ({} points)\n",
            HUE_GLYPHS[idx % HUE_GLYPHS.len()],
            data.hue_column,
            group.label,
            group.points.len()
        ));
    }
    if let Some(coding) = &data.x_coding {
        out.push_str(&coding_note(&coding.column, &coding.labels));
    }
    if let Some(coding) = &data.y_coding {
        out.push_str(&coding_note(&coding.column, &coding.labels));
    }
    out
}

/// Plot point layers onto a fixed-size character grid. Later layers win
/// on collision.
fn point_grid(layers: &[(char, &[(f64, f64)])]) -> String {
    let all: Vec<(f64, f64)> = layers
        .iter()
        .flat_map(|(_, points)| points.iter().copied())
        .collect();
    let (min_x, max_x) = extent(all.iter().map(|(x, _)| *x));
    let (min_y, max_y) = extent(all.iter().map(|(_, y)| *y));

    let mut grid = vec![vec![' '; GRID_COLUMNS]; GRID_ROWS];
    for (glyph, points) in layers {
        for (x, y) in *points {
            let col = scale(*x, min_x, max_x, GRID_COLUMNS);
            let row = scale(*y, min_y, max_y, GRID_ROWS);
            // Row 0 is the top of the grid.
            grid[GRID_ROWS - 1 - row][col] = *glyph;
        }
    }

    let mut out = String::new();
    for row in &grid {
        out.push('|');
        out.extend(row.iter());
        out.push('\n');
    }
    out.push('+');
    out.push_str(&"-".repeat(GRID_COLUMNS));
    out.push('\n');
    out
}

fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max == min {
        return 0;
    }
    (((value - min) / (max - min)) * (cells - 1) as f64).round() as usize
}

fn axis_note(x_column: &str, y_column: &str, points: &[(f64, f64)]) -> String {
    let (min_x, max_x) = extent(points.iter().map(|(x, _)| *x));
    let (min_y, max_y) = extent(points.iter().map(|(_, y)| *y));
    format!(
        "x: {} [{} to {}], y: {} [{} to {}]\n",
        x_column,
        format_number(min_x),
        format_number(max_x),
        y_column,
        format_number(min_y),
        format_number(max_y)
    )
}

fn coding_note(column: &str, labels: &[String]) -> String {
    let coded: Vec<String> = labels
        .iter()
        .enumerate()
        .map(|(code, label)| format!("{label} = {code}"))
        .collect();
    format!("  {column} coded as: {}\n", coded.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanic_insight::{ChartSelection, render};

    fn fixture() -> polars::prelude::DataFrame {
        polars::df![
            "Survived" => [0i64, 1, 1, 0],
            "Sex" => ["male", "female", "female", "male"],
            "Age" => [22.0, 38.0, 26.0, 35.0],
            "Fare" => [7.25, 71.28, 7.92, 53.1],
        ]
        .unwrap()
    }

    #[test]
    fn pie_chart_shows_percent_shares() {
        let result = render(
            &fixture(),
            &ChartSelection::Pie {
                category: "Sex".to_string(),
            },
        )
        .unwrap();
        let text = chart_to_string(&result.spec);
        assert!(text.contains("50.0%"));
        assert!(text.contains("█"));
    }

    #[test]
    fn empty_spec_renders_inline_fallback() {
        let spec = ChartSpec::Empty {
            message: "no data available for Cabin".to_string(),
        };
        assert_eq!(
            chart_to_string(&spec),
            "[no chart] no data available for Cabin"
        );
    }

    #[test]
    fn scatter_grid_reports_codings() {
        let df = polars::df![
            "Sex" => ["male", "female", "male"],
            "Age" => [22.0, 38.0, 26.0],
        ]
        .unwrap();
        let result = render(
            &df,
            &ChartSelection::ScatterSimple {
                x: "Sex".to_string(),
                y: "Age".to_string(),
            },
        )
        .unwrap();
        let text = chart_to_string(&result.spec);
        assert!(text.contains("male = 0"));
        assert!(text.contains("female = 1"));
    }

    #[test]
    fn terminal_sink_writes_insight_and_warnings() {
        let result = render(
            &fixture(),
            &ChartSelection::Pie {
                category: "Sex".to_string(),
            },
        )
        .unwrap();
        let mut buffer = Vec::new();
        TerminalSink::new(&mut buffer)
            .emit("Pie Chart: Sex", &result)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Pie Chart: Sex"));
        assert!(text.contains("Insight: "));
    }

    #[test]
    fn json_sink_emits_the_spec() {
        let result = render(
            &fixture(),
            &ChartSelection::Pie {
                category: "Sex".to_string(),
            },
        )
        .unwrap();
        let mut buffer = Vec::new();
        JsonSink::new(&mut buffer)
            .emit("Pie Chart: Sex", &result)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"kind\": \"pie\""));
        assert!(text.contains("\"insight\""));
    }
}
