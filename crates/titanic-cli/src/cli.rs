//! CLI argument definitions for the Titanic explorer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "titanic-explorer",
    version,
    about = "Explore the Titanic passenger dataset from the terminal",
    long_about = "Explore the Titanic passenger dataset to uncover survival insights.\n\n\
                  Renders descriptive statistics, a selectable chart with a derived\n\
                  insight sentence, and a cleaned view of the dataset with its own\n\
                  chart selection."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Render the full dashboard for a dataset file.
    Dashboard(DashboardArgs),

    /// Print the static column descriptions.
    Columns,
}

#[derive(Parser)]
pub struct DashboardArgs {
    /// Path to the Titanic passenger CSV.
    #[arg(value_name = "DATA_CSV")]
    pub data: PathBuf,

    /// Chart to render for the raw table.
    #[arg(long = "chart", value_enum, default_value = "pie")]
    pub chart: ChartTypeArg,

    /// Category column for pie charts and bar charts, or the single column
    /// for histograms (default: first offered column).
    #[arg(long = "column", value_name = "COLUMN")]
    pub column: Option<String>,

    /// X axis column for scatter plots and categorical heatmaps.
    #[arg(long = "x", value_name = "COLUMN")]
    pub x: Option<String>,

    /// Y axis column for scatter plots and categorical heatmaps.
    #[arg(long = "y", value_name = "COLUMN")]
    pub y: Option<String>,

    /// Hue column for scatter-hue charts.
    #[arg(long = "hue", value_name = "COLUMN")]
    pub hue: Option<String>,

    /// Group-by column for bar charts.
    #[arg(long = "group-by", value_name = "COLUMN")]
    pub group_by: Option<String>,

    /// Chart to render for the cleaned table.
    #[arg(long = "cleaned-chart", value_enum, default_value = "pie")]
    pub cleaned_chart: ChartTypeArg,

    /// Category/single column for the cleaned-table chart.
    #[arg(long = "cleaned-column", value_name = "COLUMN")]
    pub cleaned_column: Option<String>,

    /// X axis column for the cleaned-table chart.
    #[arg(long = "cleaned-x", value_name = "COLUMN")]
    pub cleaned_x: Option<String>,

    /// Y axis column for the cleaned-table chart.
    #[arg(long = "cleaned-y", value_name = "COLUMN")]
    pub cleaned_y: Option<String>,

    /// Hue column for the cleaned-table chart.
    #[arg(long = "cleaned-hue", value_name = "COLUMN")]
    pub cleaned_hue: Option<String>,

    /// Group-by column for the cleaned-table chart.
    #[arg(long = "cleaned-group-by", value_name = "COLUMN")]
    pub cleaned_group_by: Option<String>,

    /// Additionally emit the chart specs in a machine-readable form.
    #[arg(long = "emit-spec", value_enum, default_value = "none")]
    pub emit_spec: EmitSpecArg,

    /// Rows shown in the dataset preview.
    #[arg(long = "preview-rows", value_name = "N", default_value_t = 10)]
    pub preview_rows: usize,
}

/// CLI chart kind choices. One spelling per kind; the dispatcher's closed
/// enum guarantees each maps to exactly one handler.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartTypeArg {
    Pie,
    Bar,
    Histogram,
    Scatter,
    ScatterHue,
    HeatmapCounts,
    HeatmapPercentage,
    HeatmapCorrelation,
}

/// Machine-readable chart spec emission.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmitSpecArg {
    None,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
