//! Shared schema definitions and value helpers for the Titanic explorer.
//!
//! The dataset schema is fixed: every crate in the workspace works against
//! the column names and kinds declared here rather than re-inferring them.

pub mod schema;
pub mod values;

pub use schema::{
    AGE, CABIN, COLUMN_SPECS, ColumnKind, ColumnSpec, EMBARKED, FAMILY_SIZE, FARE, IS_ALONE, NAME,
    PARCH, PASSENGER_ID, PCLASS, SEX, SIBSP, SURVIVED, TICKET, column_kind, describe_column,
    is_numeric_dtype, raw_column_names,
};
pub use values::{cell_f64, cell_i64, cell_text, column_f64, column_text, format_number};
