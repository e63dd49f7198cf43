//! Dataset ingestion.
//!
//! Loads the Titanic passenger CSV into a polars `DataFrame` exactly once
//! at startup. The loaded frame is read-only for the rest of the process;
//! every downstream consumer borrows it.

pub mod error;
pub mod loader;

pub use error::IngestError;
pub use loader::load_dataset;
