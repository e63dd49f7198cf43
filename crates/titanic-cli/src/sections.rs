//! Dashboard page sections rendered as terminal tables.
//!
//! Each builder returns a `comfy_table::Table`; the command layer decides
//! ordering and surrounding headings. Builders never mutate the frame.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use titanic_model::schema::COLUMN_SPECS;
use titanic_model::values::{column_text, format_number};
use titanic_profile::{MissingColumn, NumericSummary, SurvivalGroup, dtype_summary};

/// Shared table styling for all dashboard sections.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// The first `limit` rows of the frame, all columns.
pub fn preview_table(df: &DataFrame, limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect();
    for idx in 0..df.height().min(limit) {
        let row: Vec<Cell> = names
            .iter()
            .map(|name| {
                let text = column_text(df, name, idx);
                if text.is_empty() {
                    dim_cell("-")
                } else {
                    Cell::new(text)
                }
            })
            .collect();
        table.add_row(row);
    }
    table
}

/// The static column-description table.
pub fn description_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Description")]);
    apply_table_style(&mut table);
    for spec in COLUMN_SPECS {
        table.add_row(vec![
            Cell::new(spec.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(spec.description),
        ]);
    }
    table
}

/// Name, dtype, and kind per column.
pub fn dtype_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Dtype"),
        header_cell("Kind"),
    ]);
    apply_table_style(&mut table);
    for entry in dtype_summary(df) {
        table.add_row(vec![
            Cell::new(entry.name),
            Cell::new(entry.dtype),
            dim_cell(entry.kind.label()),
        ]);
    }
    table
}

/// Descriptive statistics of the numeric columns, one row per column.
pub fn describe_table(summaries: &[NumericSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Mean"),
        header_cell("Std"),
        header_cell("Min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("Max"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..=8 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(summary.count),
            Cell::new(format!("{:.2}", summary.mean)),
            Cell::new(format!("{:.2}", summary.std)),
            Cell::new(format_number(summary.min)),
            Cell::new(format_number(summary.q25)),
            Cell::new(format_number(summary.median)),
            Cell::new(format_number(summary.q75)),
            Cell::new(format_number(summary.max)),
        ]);
    }
    table
}

/// Missing-value overview; only columns with nonzero missingness appear.
pub fn missing_table(overview: &[MissingColumn]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Missing Count"),
        header_cell("Missing %"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in overview {
        let count_cell = Cell::new(row.missing)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold);
        table.add_row(vec![
            Cell::new(&row.name),
            count_cell,
            Cell::new(format!("{:.1}%", row.percent)),
        ]);
    }
    table
}

/// Survival rate per group of one column.
pub fn survival_table(groups: &[SurvivalGroup]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Passengers"),
        header_cell("Survivors"),
        header_cell("Survival Rate"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..=3 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for group in groups {
        table.add_row(vec![
            Cell::new(&group.label)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(group.passengers),
            Cell::new(group.survivors),
            Cell::new(format!("{:.1}%", group.rate_percent)),
        ]);
    }
    table
}
