//! CSV loading with schema verification and dtype normalization.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, DataType, SerReader};
use tracing::info;

use titanic_model::schema::{
    AGE, FARE, PARCH, PASSENGER_ID, PCLASS, SIBSP, SURVIVED, raw_column_names,
};

use crate::error::{IngestError, Result};

/// Load the passenger dataset from `path`.
///
/// Verifies the header against the fixed twelve-column schema, then
/// normalizes dtypes so downstream code sees a stable frame regardless of
/// what the CSV sniffer inferred: the integer-valued columns become
/// `Int64`, `Age` and `Fare` become `Float64`, everything else stays text.
pub fn load_dataset(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    verify_header(&df)?;
    if df.height() == 0 {
        return Err(IngestError::EmptyDataset);
    }

    let df = normalize_dtypes(df)?;
    info!(
        rows = df.height(),
        columns = df.width(),
        path = %path.display(),
        "loaded passenger dataset"
    );
    Ok(df)
}

/// Check that the frame carries exactly the expected columns, in order.
fn verify_header(df: &DataFrame) -> Result<()> {
    let expected = raw_column_names();
    let found = df.get_column_names();
    if found.len() != expected.len() {
        return Err(IngestError::ColumnCountMismatch {
            expected: expected.len(),
            found: found.len(),
        });
    }
    for (position, (want, got)) in expected.iter().zip(found.iter()).enumerate() {
        if got.as_str() != *want {
            return Err(IngestError::SchemaMismatch {
                position,
                expected: (*want).to_string(),
                found: got.as_str().to_string(),
            });
        }
    }
    Ok(())
}

/// Cast the known numeric columns to their canonical dtypes.
fn normalize_dtypes(mut df: DataFrame) -> Result<DataFrame> {
    for name in [PASSENGER_ID, SURVIVED, PCLASS, SIBSP, PARCH] {
        let casted = df.column(name)?.cast(&DataType::Int64)?;
        df.with_column(casted)?;
    }
    for name in [AGE, FARE] {
        let casted = df.column(name)?.cast(&DataType::Float64)?;
        df.with_column(casted)?;
    }
    Ok(df)
}
