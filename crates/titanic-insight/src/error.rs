use thiserror::Error;

use titanic_model::schema::ColumnKind;

/// Failures of a single render pass.
///
/// These abort the current render only; the next selection gets a fresh
/// pass. `TypeMismatch` is normally unreachable because the column choices
/// offered upstream are restricted by kind; the renderer does not
/// re-validate beyond what the aggregation itself touches.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("column {0:?} does not exist in the selected table")]
    UnknownColumn(String),

    #[error("column {column:?} cannot be used here, a {expected} column is required")]
    TypeMismatch {
        column: String,
        expected: ColumnKind,
    },

    #[error(transparent)]
    Polars(#[from] polars::error::PolarsError),
}

pub type Result<T> = std::result::Result<T, InsightError>;
