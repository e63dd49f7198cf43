//! Integration tests for the standard cleaning pipeline.

use polars::prelude::{DataFrame, DataType};

use titanic_clean::clean_dataset;
use titanic_model::values::{cell_i64, column_f64, column_text};

/// A raw-shaped frame with the full twelve-column schema and the usual
/// missingness pattern (Age, Cabin, Embarked).
fn raw_fixture() -> DataFrame {
    polars::df![
        "PassengerId" => [1i64, 2, 3, 4, 5],
        "Survived" => [0i64, 1, 1, 1, 0],
        "Pclass" => [3i64, 1, 3, 1, 3],
        "Name" => ["Braund", "Cumings", "Heikkinen", "Futrelle", "Allen"],
        "Sex" => ["male", "female", "female", "female", "male"],
        "Age" => [Some(22.0), Some(38.0), None, Some(35.0), Some(35.0)],
        "SibSp" => [1i64, 1, 0, 1, 0],
        "Parch" => [0i64, 0, 0, 0, 0],
        "Ticket" => ["A/5 21171", "PC 17599", "STON/O2.", "113803", "373450"],
        "Fare" => [7.25, 71.2833, 7.925, 53.1, 8.05],
        "Cabin" => [None::<&str>, Some("C85"), None, Some("C123"), None],
        "Embarked" => [Some("S"), Some("C"), Some("S"), None, Some("S")],
    ]
    .unwrap()
}

#[test]
fn cleaned_frame_has_eleven_columns() {
    let raw = raw_fixture();
    let cleaned = clean_dataset(&raw).unwrap();

    // 12 - Cabin - SibSp - Parch + FamilySize + IsAlone = 11
    assert_eq!(cleaned.width(), 11);
    assert_eq!(cleaned.height(), raw.height());
    assert!(cleaned.column("Cabin").is_err());
    assert!(cleaned.column("SibSp").is_err());
    assert!(cleaned.column("Parch").is_err());
    assert!(cleaned.column("FamilySize").is_ok());
    assert!(cleaned.column("IsAlone").is_ok());
}

#[test]
fn imputation_removes_all_missingness() {
    let cleaned = clean_dataset(&raw_fixture()).unwrap();

    for column in cleaned.get_columns() {
        assert_eq!(column.null_count(), 0, "{} still has nulls", column.name());
    }
    // Median of {22, 35, 35, 38} is 35.
    assert_eq!(column_f64(&cleaned, "Age", 2), Some(35.0));
    // Mode of {S, C, S, S} is "S".
    assert_eq!(column_text(&cleaned, "Embarked", 3), "S");
}

#[test]
fn family_columns_satisfy_their_invariants() {
    let raw = raw_fixture();
    let cleaned = clean_dataset(&raw).unwrap();

    let sibsp = raw.column("SibSp").unwrap();
    let parch = raw.column("Parch").unwrap();
    let family = cleaned.column("FamilySize").unwrap();
    let alone = cleaned.column("IsAlone").unwrap();

    for idx in 0..raw.height() {
        let s = cell_i64(&sibsp.get(idx).unwrap()).unwrap();
        let p = cell_i64(&parch.get(idx).unwrap()).unwrap();
        let f = cell_i64(&family.get(idx).unwrap()).unwrap();
        let a = cell_i64(&alone.get(idx).unwrap()).unwrap();
        assert_eq!(f, s + p + 1);
        assert_eq!(a == 1, f == 1);
    }
}

#[test]
fn outcome_and_class_are_retyped_to_text() {
    let cleaned = clean_dataset(&raw_fixture()).unwrap();

    assert_eq!(
        cleaned.column("Survived").unwrap().dtype(),
        &DataType::String
    );
    assert_eq!(cleaned.column("Pclass").unwrap().dtype(), &DataType::String);
    assert_eq!(column_text(&cleaned, "Survived", 1), "1");
    assert_eq!(column_text(&cleaned, "Pclass", 0), "3");
}

#[test]
fn cleaning_is_idempotent() {
    let cleaned = clean_dataset(&raw_fixture()).unwrap();
    let again = clean_dataset(&cleaned).unwrap();
    assert!(cleaned.equals(&again));
}
