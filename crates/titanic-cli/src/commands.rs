//! Subcommand implementations.

use std::io;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::info_span;

use titanic_clean::clean_dataset;
use titanic_cli::charts::{ChartSink, JsonSink, TerminalSink};
use titanic_cli::sections;
use titanic_cli::selection::{ChartChoice, ColumnFlags, resolve};
use titanic_ingest::load_dataset;
use titanic_insight::{ChartSelection, render};
use titanic_model::schema::{PCLASS, SEX};
use titanic_profile::{describe_numeric, missing_overview, survival_by};

use crate::cli::{ChartTypeArg, DashboardArgs, EmitSpecArg};

pub fn run_columns() -> Result<()> {
    println!("{}", sections::description_table());
    Ok(())
}

/// Render the full dashboard page: one invocation is one render pass over
/// the raw and cleaned tables.
pub fn run_dashboard(args: &DashboardArgs) -> Result<()> {
    let span = info_span!("dashboard", data = %args.data.display());
    let _guard = span.enter();

    // Dataset retrieval failure is the one fatal error; everything below
    // is contained to its own section.
    let df = load_dataset(&args.data)
        .with_context(|| format!("load dataset from {}", args.data.display()))?;
    let (rows, cols) = df.shape();

    heading("Titanic Passenger Dataset");
    println!("{}", sections::preview_table(&df, args.preview_rows));
    println!("Showing the first {} of {rows} rows.", args.preview_rows.min(rows));

    heading("Column Overview");
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    println!("The columns in the dataset are: {}.", names.join(", "));

    heading("Column Descriptions");
    println!("{}", sections::description_table());

    heading("First Rows");
    println!("{}", sections::preview_table(&df, 5));
    println!("The dataset has {rows} rows and {cols} columns.");

    heading("Dtype Summary");
    println!("{}", sections::dtype_table(&df));

    heading("Descriptive Statistics");
    println!("{}", sections::describe_table(&describe_numeric(&df)));

    heading("Chart");
    let raw_flags = ColumnFlags {
        column: args.column.clone(),
        x: args.x.clone(),
        y: args.y.clone(),
        hue: args.hue.clone(),
        group_by: args.group_by.clone(),
    };
    chart_section(&df, chart_choice(args.chart), &raw_flags, args.emit_spec)?;

    heading("Missing Values Overview");
    print_missing(&df);

    heading("Data Cleaning");
    let cleaned = clean_dataset(&df).context("derive the cleaned table")?;
    let (cleaned_rows, cleaned_cols) = cleaned.shape();
    println!("{}", sections::preview_table(&cleaned, args.preview_rows));
    println!("The cleaned table has {cleaned_rows} rows and {cleaned_cols} columns.");
    print_missing(&cleaned);

    heading("Cleaned Chart");
    let cleaned_flags = ColumnFlags {
        column: args.cleaned_column.clone(),
        x: args.cleaned_x.clone(),
        y: args.cleaned_y.clone(),
        hue: args.cleaned_hue.clone(),
        group_by: args.cleaned_group_by.clone(),
    };
    chart_section(
        &cleaned,
        chart_choice(args.cleaned_chart),
        &cleaned_flags,
        args.emit_spec,
    )?;

    heading("Survival by Sex");
    println!("{}", sections::survival_table(&survival_by(&cleaned, SEX)));

    heading("Survival by Class");
    println!("{}", sections::survival_table(&survival_by(&cleaned, PCLASS)));

    Ok(())
}

fn heading(title: &str) {
    println!();
    println!("== {title} ==");
    println!();
}

fn print_missing(df: &DataFrame) {
    let overview = missing_overview(df);
    if overview.is_empty() {
        println!("No missing values.");
    } else {
        println!("{}", sections::missing_table(&overview));
        println!("There are missing values in the dataset.");
    }
}

/// One chart render. Resolution and render failures are reported inline
/// where the chart would have appeared; they never abort the dashboard.
fn chart_section(
    df: &DataFrame,
    choice: ChartChoice,
    flags: &ColumnFlags,
    emit: EmitSpecArg,
) -> Result<()> {
    let selection = match resolve(df, choice, flags) {
        Ok(selection) => selection,
        Err(error) => {
            println!("[no chart] {error}");
            return Ok(());
        }
    };
    match render(df, &selection) {
        Ok(result) => {
            let title = chart_title(&selection);
            TerminalSink::new(io::stdout().lock()).emit(&title, &result)?;
            if emit == EmitSpecArg::Json {
                JsonSink::new(io::stdout().lock()).emit(&title, &result)?;
            }
        }
        Err(error) => {
            println!("[no chart] render failed: {error}");
        }
    }
    Ok(())
}

fn chart_title(selection: &ChartSelection) -> String {
    let columns = selection.columns();
    if columns.is_empty() {
        selection.display_name().to_string()
    } else {
        format!("{}: {}", selection.display_name(), columns.join(" / "))
    }
}

fn chart_choice(arg: ChartTypeArg) -> ChartChoice {
    match arg {
        ChartTypeArg::Pie => ChartChoice::Pie,
        ChartTypeArg::Bar => ChartChoice::Bar,
        ChartTypeArg::Histogram => ChartChoice::Histogram,
        ChartTypeArg::Scatter => ChartChoice::Scatter,
        ChartTypeArg::ScatterHue => ChartChoice::ScatterHue,
        ChartTypeArg::HeatmapCounts => ChartChoice::HeatmapCounts,
        ChartTypeArg::HeatmapPercentage => ChartChoice::HeatmapPercentage,
        ChartTypeArg::HeatmapCorrelation => ChartChoice::HeatmapCorrelation,
    }
}
