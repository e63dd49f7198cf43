//! Ordered cleaning steps and the standard pipeline.

use polars::prelude::DataFrame;
use tracing::debug;

use titanic_model::schema::{AGE, CABIN, EMBARKED, PARCH, PCLASS, SIBSP, SURVIVED};

use crate::error::Result;
use crate::executors::{
    derive_family_size, derive_is_alone, drop_column, impute_median, impute_mode,
    retype_categorical,
};

/// One cleaning operation. Variants carry exactly the column references
/// they need; derivations are fixed by the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleaningStep {
    ImputeMedian { column: String },
    ImputeMode { column: String },
    DropColumn { column: String },
    DeriveFamilySize,
    DeriveIsAlone,
    RetypeCategorical { column: String },
}

impl CleaningStep {
    /// Short display name for logs and reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ImputeMedian { .. } => "impute median",
            Self::ImputeMode { .. } => "impute mode",
            Self::DropColumn { .. } => "drop column",
            Self::DeriveFamilySize => "derive FamilySize",
            Self::DeriveIsAlone => "derive IsAlone",
            Self::RetypeCategorical { .. } => "retype categorical",
        }
    }
}

/// An ordered list of cleaning steps applied to a copy of the raw frame.
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    steps: Vec<CleaningStep>,
}

impl CleaningPipeline {
    pub fn new(steps: Vec<CleaningStep>) -> Self {
        Self { steps }
    }

    /// The fixed pipeline producing the cleaned passenger table.
    ///
    /// Step order matters: `FamilySize` must exist before `IsAlone` is
    /// derived and before its inputs are dropped.
    pub fn standard() -> Self {
        Self::new(vec![
            CleaningStep::ImputeMedian {
                column: AGE.to_string(),
            },
            CleaningStep::ImputeMode {
                column: EMBARKED.to_string(),
            },
            CleaningStep::DropColumn {
                column: CABIN.to_string(),
            },
            CleaningStep::DeriveFamilySize,
            CleaningStep::DeriveIsAlone,
            CleaningStep::DropColumn {
                column: SIBSP.to_string(),
            },
            CleaningStep::DropColumn {
                column: PARCH.to_string(),
            },
            CleaningStep::RetypeCategorical {
                column: SURVIVED.to_string(),
            },
            CleaningStep::RetypeCategorical {
                column: PCLASS.to_string(),
            },
        ])
    }

    pub fn steps(&self) -> &[CleaningStep] {
        &self.steps
    }

    /// Apply every step, in order, to a copy of `df`.
    ///
    /// The input frame is never modified. Applying the pipeline to its own
    /// output returns an identical frame.
    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut cleaned = df.clone();
        for step in &self.steps {
            let changed = match step {
                CleaningStep::ImputeMedian { column } => impute_median(&mut cleaned, column)? > 0,
                CleaningStep::ImputeMode { column } => impute_mode(&mut cleaned, column)? > 0,
                CleaningStep::DropColumn { column } => drop_column(&mut cleaned, column)?,
                CleaningStep::DeriveFamilySize => derive_family_size(&mut cleaned)?,
                CleaningStep::DeriveIsAlone => derive_is_alone(&mut cleaned)?,
                CleaningStep::RetypeCategorical { column } => {
                    retype_categorical(&mut cleaned, column)?
                }
            };
            debug!(step = step.display_name(), changed, "cleaning step");
        }
        Ok(cleaned)
    }
}

/// Derive the cleaned table with the standard pipeline.
pub fn clean_dataset(df: &DataFrame) -> Result<DataFrame> {
    CleaningPipeline::standard().apply(df)
}
