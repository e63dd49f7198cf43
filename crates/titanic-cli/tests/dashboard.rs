//! End-to-end flow: ingest, clean, resolve a selection, render, emit.

use std::path::PathBuf;

use titanic_clean::clean_dataset;
use titanic_cli::charts::{ChartSink, TerminalSink};
use titanic_cli::selection::{ChartChoice, ColumnFlags, resolve};
use titanic_ingest::load_dataset;
use titanic_insight::render;
use titanic_profile::survival_by;

const HEADER: &str = "PassengerId,Survived,Pclass,Name,Sex,Age,SibSp,Parch,Ticket,Fare,Cabin,Embarked";

fn fixture_csv() -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "titanic-cli-test-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("titanic.csv");
    let body = format!(
        "{HEADER}\n\
         1,0,3,\"Braund, Mr. Owen Harris\",male,22,1,0,A/5 21171,7.25,,S\n\
         2,1,1,\"Cumings, Mrs. John Bradley\",female,38,1,0,PC 17599,71.2833,C85,C\n\
         3,1,3,\"Heikkinen, Miss. Laina\",female,26,0,0,STON/O2. 3101282,7.925,,S\n\
         4,1,1,\"Futrelle, Mrs. Jacques Heath\",female,35,1,0,113803,53.1,C123,S\n\
         5,0,3,\"Allen, Mr. William Henry\",male,35,0,0,373450,8.05,,S\n\
         6,0,3,\"Moran, Mr. James\",male,,0,0,330877,8.4583,,Q\n"
    );
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn default_selection_renders_a_pie_over_the_raw_table() {
    let df = load_dataset(&fixture_csv()).unwrap();
    let selection = resolve(&df, ChartChoice::Pie, &ColumnFlags::default()).unwrap();
    let result = render(&df, &selection).unwrap();

    let mut buffer = Vec::new();
    TerminalSink::new(&mut buffer)
        .emit("Pie Chart", &result)
        .unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.contains("Insight: "), "{text}");
}

#[test]
fn cleaned_table_supports_its_own_selection() {
    let df = load_dataset(&fixture_csv()).unwrap();
    let cleaned = clean_dataset(&df).unwrap();
    assert_eq!(cleaned.width(), 11);

    // Survived is categorical after cleaning, so it is offered for pie.
    let flags = ColumnFlags {
        column: Some("Survived".to_string()),
        ..ColumnFlags::default()
    };
    let selection = resolve(&cleaned, ChartChoice::Pie, &flags).unwrap();
    let result = render(&cleaned, &selection).unwrap();
    let insight = result.insight.unwrap();
    assert!(insight.contains("Survived"), "{insight}");
}

#[test]
fn correlation_insight_disappears_after_cleaning() {
    let df = load_dataset(&fixture_csv()).unwrap();
    let raw = render(
        &df,
        &resolve(&df, ChartChoice::HeatmapCorrelation, &ColumnFlags::default()).unwrap(),
    )
    .unwrap();
    assert!(raw.insight.is_some());

    let cleaned = clean_dataset(&df).unwrap();
    let after = render(
        &cleaned,
        &resolve(
            &cleaned,
            ChartChoice::HeatmapCorrelation,
            &ColumnFlags::default(),
        )
        .unwrap(),
    )
    .unwrap();
    assert!(after.insight.is_none());
}

#[test]
fn survival_summaries_cover_both_fixed_groupings() {
    let df = load_dataset(&fixture_csv()).unwrap();
    let cleaned = clean_dataset(&df).unwrap();

    let by_sex = survival_by(&cleaned, "Sex");
    assert_eq!(by_sex.len(), 2);
    let female = by_sex.iter().find(|g| g.label == "female").unwrap();
    assert_eq!(female.survivors, 3);
    assert!((female.rate_percent - 100.0).abs() < 1e-9);

    let by_class = survival_by(&cleaned, "Pclass");
    assert_eq!(by_class.len(), 2);
}
