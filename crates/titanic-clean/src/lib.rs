//! Cleaning pipeline for the passenger dataset.
//!
//! The cleaned table is derived exactly once from the raw table and is
//! immutable afterwards: missing `Age` imputed by median, missing
//! `Embarked` imputed by mode, `Cabin` dropped, `SibSp`/`Parch` merged
//! into `FamilySize` and `IsAlone`, and `Survived`/`Pclass` retyped to
//! categorical text. Every step is a no-op on input that is already clean,
//! so the pipeline is idempotent.

pub mod error;
pub mod executors;
pub mod pipeline;

pub use error::CleanError;
pub use pipeline::{CleaningPipeline, CleaningStep, clean_dataset};
