use thiserror::Error;

/// Failures while retrieving the dataset at startup.
///
/// All of these are fatal: the explorer has nothing to render without the
/// dataset, so the caller aborts instead of retrying.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read dataset: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("dataset header mismatch: expected column {expected:?} at position {position}, found {found:?}")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("dataset has {found} columns, expected {expected}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("dataset contains no rows")]
    EmptyDataset,
}

pub type Result<T> = std::result::Result<T, IngestError>;
