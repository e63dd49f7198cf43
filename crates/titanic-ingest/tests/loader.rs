//! Integration tests for dataset loading.

use std::path::PathBuf;

use polars::prelude::DataType;

use titanic_ingest::{IngestError, load_dataset};

const HEADER: &str = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

fn write_fixture(name: &str, body: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "titanic-ingest-test-{}-{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("titanic.csv");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn loads_and_normalizes_dtypes() {
    let body = format!(
        "{HEADER}\n\
         1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S\n\
         2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C\n\
         3,1,3,\"Heikkinen, Miss. Laina\",female,,0,0,STON/O2. 3101282,7.925,,S\n"
    );
    let path = write_fixture("load", &body);

    let df = load_dataset(&path).unwrap();
    assert_eq!(df.shape(), (3, 12));
    assert_eq!(df.column("Survived").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("Age").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("Fare").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("Sex").unwrap().dtype(), &DataType::String);
    // Missing cells stay null rather than defaulting.
    assert_eq!(df.column("Age").unwrap().null_count(), 1);
    assert_eq!(df.column("Cabin").unwrap().null_count(), 2);
}

#[test]
fn rejects_wrong_header() {
    let body = "PassengerId,Lived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked\n\
                1,0,3,A,male,22,1,0,T1,7.25,,S\n";
    let path = write_fixture("header", body);

    match load_dataset(&path) {
        Err(IngestError::SchemaMismatch {
            position,
            expected,
            found,
        }) => {
            assert_eq!(position, 1);
            assert_eq!(expected, "Survived");
            assert_eq!(found, "Lived");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn rejects_empty_dataset() {
    let path = write_fixture("empty", &format!("{HEADER}\n"));
    assert!(matches!(load_dataset(&path), Err(IngestError::EmptyDataset)));
}

#[test]
fn missing_file_is_a_polars_error() {
    let path = PathBuf::from("/nonexistent/titanic.csv");
    assert!(matches!(load_dataset(&path), Err(IngestError::Polars(_))));
}
