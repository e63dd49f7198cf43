//! Fixed survival summaries (by sex, by class).

use indexmap::IndexMap;
use polars::prelude::{AnyValue, DataFrame};
use serde::Serialize;

use titanic_model::schema::SURVIVED;
use titanic_model::values::{cell_f64, cell_text};

/// Survival outcome of one group of passengers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivalGroup {
    pub label: String,
    pub passengers: usize,
    pub survivors: usize,
    /// Share of survivors in the group, 0..=100.
    pub rate_percent: f64,
}

/// Survival rate per distinct value of `group_column`.
///
/// Works on the raw frame (`Survived` numeric) and the cleaned frame
/// (`Survived` retyped to text "0"/"1"). Rows where either the group value
/// or the outcome is null are skipped. Groups appear in first-encountered
/// row order.
pub fn survival_by(df: &DataFrame, group_column: &str) -> Vec<SurvivalGroup> {
    let Ok(groups) = df.column(group_column) else {
        return Vec::new();
    };
    let Ok(outcomes) = df.column(SURVIVED) else {
        return Vec::new();
    };

    let mut tally: IndexMap<String, (usize, usize)> = IndexMap::new();
    for idx in 0..df.height() {
        let label = cell_text(&groups.get(idx).unwrap_or(AnyValue::Null));
        if label.is_empty() {
            continue;
        }
        let Some(survived) = survived_flag(&outcomes.get(idx).unwrap_or(AnyValue::Null)) else {
            continue;
        };
        let entry = tally.entry(label).or_insert((0, 0));
        entry.0 += 1;
        if survived {
            entry.1 += 1;
        }
    }

    tally
        .into_iter()
        .map(|(label, (passengers, survivors))| SurvivalGroup {
            label,
            passengers,
            survivors,
            rate_percent: survivors as f64 / passengers as f64 * 100.0,
        })
        .collect()
}

/// Interpret a `Survived` cell, numeric or retyped to text.
fn survived_flag(value: &AnyValue<'_>) -> Option<bool> {
    if let Some(v) = cell_f64(value) {
        return Some(v != 0.0);
    }
    match cell_text(value).as_str() {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}
