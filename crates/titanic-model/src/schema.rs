//! Fixed schema of the Titanic passenger dataset.
//!
//! Column names, kinds, and user-facing descriptions are declared once here.
//! The raw CSV always carries the twelve [`COLUMN_SPECS`] columns in order;
//! the cleaned table drops some and adds [`FAMILY_SIZE`] and [`IS_ALONE`].

use polars::prelude::{DataFrame, DataType};
use serde::{Deserialize, Serialize};

pub const PASSENGER_ID: &str = "PassengerId";
pub const SURVIVED: &str = "Survived";
pub const PCLASS: &str = "Pclass";
pub const NAME: &str = "Name";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";
pub const SIBSP: &str = "SibSp";
pub const PARCH: &str = "Parch";
pub const TICKET: &str = "Ticket";
pub const FARE: &str = "Fare";
pub const CABIN: &str = "Cabin";
pub const EMBARKED: &str = "Embarked";

/// Derived in the cleaning pipeline: `SibSp + Parch + 1`.
pub const FAMILY_SIZE: &str = "FamilySize";
/// Derived in the cleaning pipeline: `1` iff `FamilySize == 1`.
pub const IS_ALONE: &str = "IsAlone";

/// Broad column classification used for chart slot restrictions.
///
/// Everything that is not a numeric dtype counts as categorical/text; the
/// finer distinction (free text vs. low-cardinality category) is made at
/// the point where columns are offered for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl ColumnKind {
    /// Display label used in dtype summaries and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static description of one raw dataset column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub description: &'static str,
}

/// The twelve columns of the raw dataset, in file order.
pub const COLUMN_SPECS: [ColumnSpec; 12] = [
    ColumnSpec {
        name: PASSENGER_ID,
        kind: ColumnKind::Numeric,
        description: "Unique identifier for each passenger",
    },
    ColumnSpec {
        name: SURVIVED,
        kind: ColumnKind::Numeric,
        description: "Survival indicator (0 = No, 1 = Yes)",
    },
    ColumnSpec {
        name: PCLASS,
        kind: ColumnKind::Numeric,
        description: "Ticket class (1 = Upper, 2 = Middle, 3 = Lower)",
    },
    ColumnSpec {
        name: NAME,
        kind: ColumnKind::Categorical,
        description: "Full name, includes titles",
    },
    ColumnSpec {
        name: SEX,
        kind: ColumnKind::Categorical,
        description: "Gender of the passenger",
    },
    ColumnSpec {
        name: AGE,
        kind: ColumnKind::Numeric,
        description: "Age in years (may contain missing values)",
    },
    ColumnSpec {
        name: SIBSP,
        kind: ColumnKind::Numeric,
        description: "Number of siblings/spouses aboard",
    },
    ColumnSpec {
        name: PARCH,
        kind: ColumnKind::Numeric,
        description: "Number of parents/children aboard",
    },
    ColumnSpec {
        name: TICKET,
        kind: ColumnKind::Categorical,
        description: "Ticket number",
    },
    ColumnSpec {
        name: FARE,
        kind: ColumnKind::Numeric,
        description: "Price paid for the ticket",
    },
    ColumnSpec {
        name: CABIN,
        kind: ColumnKind::Categorical,
        description: "Cabin number (many missing values)",
    },
    ColumnSpec {
        name: EMBARKED,
        kind: ColumnKind::Categorical,
        description: "Port of embarkation (C, Q, S)",
    },
];

/// Column names of the raw dataset in file order.
pub fn raw_column_names() -> Vec<&'static str> {
    COLUMN_SPECS.iter().map(|spec| spec.name).collect()
}

/// Static description for a raw or derived column, if known.
pub fn describe_column(name: &str) -> Option<&'static str> {
    match name {
        FAMILY_SIZE => Some("Family members aboard including the passenger"),
        IS_ALONE => Some("1 if the passenger travelled without family, else 0"),
        _ => COLUMN_SPECS
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.description),
    }
}

/// Whether a polars dtype counts as numeric for chart slot purposes.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Classify a column of `df` by its current dtype.
///
/// Returns `None` when the column does not exist. Retyped columns (e.g.
/// `Survived` after cleaning) classify by their new dtype, not the raw
/// schema.
pub fn column_kind(df: &DataFrame, name: &str) -> Option<ColumnKind> {
    let column = df.column(name).ok()?;
    if is_numeric_dtype(column.dtype()) {
        Some(ColumnKind::Numeric)
    } else {
        Some(ColumnKind::Categorical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_schema_has_twelve_unique_columns() {
        let names = raw_column_names();
        assert_eq!(names.len(), 12);
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), 12);
    }

    #[test]
    fn descriptions_cover_raw_and_derived_columns() {
        for spec in COLUMN_SPECS {
            assert!(describe_column(spec.name).is_some(), "{}", spec.name);
        }
        assert!(describe_column(FAMILY_SIZE).is_some());
        assert!(describe_column(IS_ALONE).is_some());
        assert!(describe_column("NotAColumn").is_none());
    }

    #[test]
    fn numeric_dtype_classification() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn column_kind_serializes_round_trip() {
        let json = serde_json::to_string(&ColumnKind::Numeric).expect("serialize kind");
        let round: ColumnKind = serde_json::from_str(&json).expect("deserialize kind");
        assert_eq!(round, ColumnKind::Numeric);
    }
}
