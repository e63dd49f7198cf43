//! Column offering and selection resolution.
//!
//! This is the upstream guard the renderer relies on: every chart slot
//! offers only columns of the right kind (mirroring a dropdown restricted
//! to valid choices), and a flag naming anything outside the offered set
//! is rejected here, before the renderer runs. Omitted flags default to
//! the first offered column, like a dropdown's preselected option.

use anyhow::{Result, bail};
use polars::prelude::DataFrame;

use titanic_insight::ChartSelection;
use titanic_model::schema::{ColumnKind, column_kind};
use titanic_profile::distinct_count;

/// Columns with more distinct values than this are not offered as
/// categories (free text and identifiers make unreadable axes).
pub const CATEGORY_CARDINALITY_LIMIT: usize = 10;

/// Chart choice as picked on the command line, before columns resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartChoice {
    Pie,
    Bar,
    Histogram,
    Scatter,
    ScatterHue,
    HeatmapCounts,
    HeatmapPercentage,
    HeatmapCorrelation,
}

/// Column flags accompanying one chart choice.
#[derive(Debug, Clone, Default)]
pub struct ColumnFlags {
    pub column: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
    pub hue: Option<String>,
    pub group_by: Option<String>,
}

/// Low-cardinality columns offered for category, group, and hue slots,
/// in frame order.
pub fn offered_category_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.as_str())
        .filter(|name| {
            let distinct = distinct_count(df, name);
            distinct > 0 && distinct <= CATEGORY_CARDINALITY_LIMIT
        })
        .map(String::from)
        .collect()
}

/// Numeric columns offered for scatter axes, in frame order.
pub fn offered_numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.as_str())
        .filter(|name| column_kind(df, name) == Some(ColumnKind::Numeric))
        .map(String::from)
        .collect()
}

/// Every column is offered for histograms; numeric ones bin, the rest
/// fall back to frequency counts.
pub fn offered_histogram_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.as_str().to_string())
        .collect()
}

/// Resolve a chart choice plus column flags into a [`ChartSelection`].
pub fn resolve(df: &DataFrame, choice: ChartChoice, flags: &ColumnFlags) -> Result<ChartSelection> {
    match choice {
        ChartChoice::Pie => {
            let offered = offered_category_columns(df);
            let category = pick(flags.column.as_deref(), &offered, "category", 0)?;
            Ok(ChartSelection::Pie { category })
        }
        ChartChoice::Bar => {
            let offered = offered_category_columns(df);
            let category = pick(flags.column.as_deref(), &offered, "category", 0)?;
            let group = pick(
                flags.group_by.as_deref(),
                &offered,
                "group-by",
                first_other(&offered, &category),
            )?;
            Ok(ChartSelection::Bar { category, group })
        }
        ChartChoice::Histogram => {
            let offered = offered_histogram_columns(df);
            let column = pick(flags.column.as_deref(), &offered, "column", 0)?;
            Ok(ChartSelection::Histogram { column })
        }
        ChartChoice::Scatter => {
            let (x, y) = scatter_axes(df, flags)?;
            Ok(ChartSelection::ScatterSimple { x, y })
        }
        ChartChoice::ScatterHue => {
            let (x, y) = scatter_axes(df, flags)?;
            let categories = offered_category_columns(df);
            let hue = pick(flags.hue.as_deref(), &categories, "hue", 0)?;
            Ok(ChartSelection::ScatterComplex { x, y, hue })
        }
        ChartChoice::HeatmapCounts => {
            let (x, y) = heatmap_axes(df, flags)?;
            Ok(ChartSelection::HeatmapCategoricalCounts { x, y })
        }
        ChartChoice::HeatmapPercentage => {
            let (x, y) = heatmap_axes(df, flags)?;
            Ok(ChartSelection::HeatmapCategoricalPercentage { x, y })
        }
        ChartChoice::HeatmapCorrelation => Ok(ChartSelection::HeatmapCorrelation),
    }
}

fn scatter_axes(df: &DataFrame, flags: &ColumnFlags) -> Result<(String, String)> {
    let offered = offered_numeric_columns(df);
    let x = pick(flags.x.as_deref(), &offered, "x", 0)?;
    let y = pick(flags.y.as_deref(), &offered, "y", first_other(&offered, &x))?;
    Ok((x, y))
}

fn heatmap_axes(df: &DataFrame, flags: &ColumnFlags) -> Result<(String, String)> {
    let offered = offered_category_columns(df);
    let x = pick(flags.x.as_deref(), &offered, "x", 0)?;
    let y = pick(flags.y.as_deref(), &offered, "y", first_other(&offered, &x))?;
    Ok((x, y))
}

/// Index of the first offered column differing from `taken`, so two-slot
/// charts default to two distinct columns where possible.
fn first_other(offered: &[String], taken: &str) -> usize {
    offered.iter().position(|name| name != taken).unwrap_or(0)
}

/// Take the requested column if it is offered, or default to
/// `offered[default_index]`.
fn pick(
    requested: Option<&str>,
    offered: &[String],
    slot: &str,
    default_index: usize,
) -> Result<String> {
    if offered.is_empty() {
        bail!("no columns can be offered for the {slot} slot");
    }
    match requested {
        None => Ok(offered[default_index.min(offered.len() - 1)].clone()),
        Some(name) => {
            if let Some(found) = offered.iter().find(|candidate| *candidate == name) {
                Ok(found.clone())
            } else {
                bail!(
                    "column {name:?} cannot be used for the {slot} slot; choose one of: {}",
                    offered.join(", ")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> DataFrame {
        polars::df![
            "PassengerId" => (1i64..=12).collect::<Vec<_>>(),
            "Survived" => [0i64, 1, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1],
            "Sex" => ["male", "female", "female", "male", "female", "male",
                      "male", "female", "male", "female", "male", "female"],
            "Age" => [22.0, 38.0, 26.0, 35.0, 36.0, 27.0, 54.0, 2.0, 28.0, 14.0, 4.0, 58.0],
            "Name" => ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l"],
        ]
        .unwrap()
    }

    #[test]
    fn high_cardinality_columns_are_not_offered_as_categories() {
        let offered = offered_category_columns(&fixture());
        assert_eq!(offered, vec!["Survived", "Sex"]);
    }

    #[test]
    fn scatter_slots_offer_numeric_columns_only() {
        let offered = offered_numeric_columns(&fixture());
        assert_eq!(offered, vec!["PassengerId", "Survived", "Age"]);
    }

    #[test]
    fn omitted_flags_default_to_first_offered_columns() {
        let df = fixture();
        let selection = resolve(&df, ChartChoice::Bar, &ColumnFlags::default()).unwrap();
        assert_eq!(
            selection,
            ChartSelection::Bar {
                category: "Survived".to_string(),
                group: "Sex".to_string(),
            }
        );
    }

    #[test]
    fn off_menu_column_is_rejected_before_rendering() {
        let df = fixture();
        let flags = ColumnFlags {
            x: Some("Sex".to_string()),
            ..ColumnFlags::default()
        };
        let err = resolve(&df, ChartChoice::Scatter, &flags).unwrap_err();
        assert!(err.to_string().contains("x slot"), "{err}");
    }

    #[test]
    fn heatmap_defaults_pick_two_distinct_categories() {
        let df = fixture();
        let selection = resolve(&df, ChartChoice::HeatmapCounts, &ColumnFlags::default()).unwrap();
        assert_eq!(
            selection,
            ChartSelection::HeatmapCategoricalCounts {
                x: "Survived".to_string(),
                y: "Sex".to_string(),
            }
        );
    }
}
