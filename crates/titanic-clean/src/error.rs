use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("cleaning failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("cleaning step requires column {0:?} which is not in the frame")]
    MissingColumn(String),
}

pub type Result<T> = std::result::Result<T, CleanError>;
