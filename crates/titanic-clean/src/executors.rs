//! Cleaning step executor functions.
//!
//! Each function corresponds to a [`CleaningStep`](crate::CleaningStep)
//! variant and edits the frame in place. All executors are no-ops when the
//! frame already satisfies the step's outcome, which is what makes the
//! pipeline idempotent.

use indexmap::IndexMap;
use polars::prelude::{AnyValue, Column, DataFrame, DataType};

use titanic_model::schema::{FAMILY_SIZE, IS_ALONE, PARCH, SIBSP};
use titanic_model::values::{cell_f64, cell_i64};

use crate::error::{CleanError, Result};

/// Fill nulls of a numeric column with the median of its non-null values.
///
/// Returns the number of cells filled. No-op when the column is absent,
/// fully populated, or entirely null.
pub fn impute_median(df: &mut DataFrame, column_name: &str) -> Result<usize> {
    let Ok(column) = df.column(column_name) else {
        return Ok(0);
    };
    let nulls = column.null_count();
    if nulls == 0 {
        return Ok(0);
    }

    let mut values: Vec<f64> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        if let Some(v) = cell_f64(&column.get(idx).unwrap_or(AnyValue::Null)) {
            values.push(v);
        }
    }
    if values.is_empty() {
        return Ok(0);
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let median = median_sorted(&values);

    let mut filled: Vec<f64> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        filled.push(cell_f64(&column.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(median));
    }
    df.with_column(Column::new(column_name.into(), filled))?;
    Ok(nulls)
}

/// Fill nulls of a text column with its most frequent value.
///
/// Frequency ties resolve to the value encountered first. Returns the
/// number of cells filled; no-op when the column is absent, fully
/// populated, or entirely null.
pub fn impute_mode(df: &mut DataFrame, column_name: &str) -> Result<usize> {
    let Ok(column) = df.column(column_name) else {
        return Ok(0);
    };
    let nulls = column.null_count();
    if nulls == 0 {
        return Ok(0);
    }

    let strings = column.str()?;
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for value in strings.into_iter().flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }
    let Some(mode) = counts
        .iter()
        .max_by_key(|(_, count)| **count)
        .map(|(value, _)| (*value).to_string())
    else {
        return Ok(0);
    };

    let mut filled: Vec<String> = Vec::with_capacity(df.height());
    for value in strings {
        filled.push(value.map_or_else(|| mode.clone(), ToString::to_string));
    }
    df.with_column(Column::new(column_name.into(), filled))?;
    Ok(nulls)
}

/// Remove a column if it is present.
pub fn drop_column(df: &mut DataFrame, column_name: &str) -> Result<bool> {
    if df.column(column_name).is_err() {
        return Ok(false);
    }
    df.drop_in_place(column_name)?;
    Ok(true)
}

/// Derive `FamilySize = SibSp + Parch + 1`.
///
/// No-op when the column already exists; requires `SibSp` and `Parch`
/// otherwise.
pub fn derive_family_size(df: &mut DataFrame) -> Result<bool> {
    if df.column(FAMILY_SIZE).is_ok() {
        return Ok(false);
    }
    let sibsp = df
        .column(SIBSP)
        .map_err(|_| CleanError::MissingColumn(SIBSP.to_string()))?;
    let parch = df
        .column(PARCH)
        .map_err(|_| CleanError::MissingColumn(PARCH.to_string()))?;

    let mut values: Vec<i64> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let s = cell_i64(&sibsp.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0);
        let p = cell_i64(&parch.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0);
        values.push(s + p + 1);
    }
    df.with_column(Column::new(FAMILY_SIZE.into(), values))?;
    Ok(true)
}

/// Derive `IsAlone = 1` iff `FamilySize == 1`, else 0.
///
/// No-op when the column already exists; requires `FamilySize` otherwise.
pub fn derive_is_alone(df: &mut DataFrame) -> Result<bool> {
    if df.column(IS_ALONE).is_ok() {
        return Ok(false);
    }
    let family = df
        .column(FAMILY_SIZE)
        .map_err(|_| CleanError::MissingColumn(FAMILY_SIZE.to_string()))?;

    let mut values: Vec<i64> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let size = cell_i64(&family.get(idx).unwrap_or(AnyValue::Null)).unwrap_or(0);
        values.push(i64::from(size == 1));
    }
    df.with_column(Column::new(IS_ALONE.into(), values))?;
    Ok(true)
}

/// Retype a column to categorical text. No-op when already text or absent.
pub fn retype_categorical(df: &mut DataFrame, column_name: &str) -> Result<bool> {
    let Ok(column) = df.column(column_name) else {
        return Ok(false);
    };
    if column.dtype() == &DataType::String {
        return Ok(false);
    }
    let casted = column.cast(&DataType::String)?;
    df.with_column(casted)?;
    Ok(true)
}

fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impute_median_fills_only_nulls() {
        let mut df = polars::df!["Age" => [Some(20.0), None, Some(40.0), Some(30.0)]].unwrap();
        let filled = impute_median(&mut df, "Age").unwrap();
        assert_eq!(filled, 1);
        let col = df.column("Age").unwrap();
        assert_eq!(col.null_count(), 0);
        // Median of {20, 30, 40} is 30.
        assert_eq!(cell_f64(&col.get(1).unwrap()), Some(30.0));
        assert_eq!(cell_f64(&col.get(0).unwrap()), Some(20.0));
    }

    #[test]
    fn impute_mode_breaks_ties_by_first_encounter() {
        let mut df =
            polars::df!["Embarked" => [Some("C"), Some("S"), Some("S"), Some("C"), None]].unwrap();
        impute_mode(&mut df, "Embarked").unwrap();
        let col = df.column("Embarked").unwrap();
        let strings = col.str().unwrap();
        // "C" and "S" both occur twice; "C" was seen first.
        assert_eq!(strings.get(4), Some("C"));
    }

    #[test]
    fn derive_family_size_and_is_alone() {
        let mut df = polars::df![
            "SibSp" => [1i64, 0],
            "Parch" => [0i64, 0],
        ]
        .unwrap();
        assert!(derive_family_size(&mut df).unwrap());
        assert!(derive_is_alone(&mut df).unwrap());

        let family = df.column("FamilySize").unwrap();
        let alone = df.column("IsAlone").unwrap();
        assert_eq!(cell_i64(&family.get(0).unwrap()), Some(2));
        assert_eq!(cell_i64(&alone.get(0).unwrap()), Some(0));
        assert_eq!(cell_i64(&family.get(1).unwrap()), Some(1));
        assert_eq!(cell_i64(&alone.get(1).unwrap()), Some(1));

        // Re-running is a no-op.
        assert!(!derive_family_size(&mut df).unwrap());
        assert!(!derive_is_alone(&mut df).unwrap());
    }

    #[test]
    fn retype_turns_ints_into_text() {
        let mut df = polars::df!["Survived" => [0i64, 1]].unwrap();
        assert!(retype_categorical(&mut df, "Survived").unwrap());
        let col = df.column("Survived").unwrap();
        assert_eq!(col.dtype(), &DataType::String);
        assert_eq!(col.str().unwrap().get(1), Some("1"));
        assert!(!retype_categorical(&mut df, "Survived").unwrap());
    }

    #[test]
    fn drop_column_is_noop_when_absent() {
        let mut df = polars::df!["A" => [1i64]].unwrap();
        assert!(!drop_column(&mut df, "Cabin").unwrap());
        assert!(drop_column(&mut df, "A").unwrap());
        assert_eq!(df.width(), 0);
    }
}
