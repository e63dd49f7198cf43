//! Insight sentence derivation.
//!
//! Each sentence is templated from the extremum of the aggregation that
//! backs the chart: the largest share, the fullest bin, the strongest
//! correlation. Correlations and means print to two decimal places,
//! percentages to one.

use titanic_model::schema::SURVIVED;
use titanic_model::values::format_number;

use crate::aggregate::{
    CorrelationMatrix, FrequencyTable, Histogram, HuedScatter, PivotTable, ScatterData,
};

/// Largest share of a pie chart's frequency table.
pub fn pie(table: &FrequencyTable) -> Option<String> {
    let largest = table.largest()?;
    Some(format!(
        "{} = {} accounts for {:.1}% of passengers.",
        table.column,
        largest.label,
        table.percent(largest)
    ))
}

/// Largest cross-tabulated cell of a bar chart.
pub fn bar(pivot: &PivotTable) -> Option<String> {
    let (row, col, count) = pivot.largest_cell()?;
    Some(format!(
        "The largest group is {} = {} with {} = {} ({} passengers).",
        pivot.x_column, pivot.x_labels[col], pivot.y_column, pivot.y_labels[row], count
    ))
}

/// Most frequent value of a categorical histogram.
pub fn categorical_histogram(table: &FrequencyTable) -> Option<String> {
    let largest = table.largest()?;
    Some(format!(
        "The most frequent value of {} is {} ({} rows).",
        table.column, largest.label, largest.count
    ))
}

/// Fullest bin of a numeric histogram.
pub fn numeric_histogram(hist: &Histogram) -> Option<String> {
    let bin = hist.fullest_bin()?;
    Some(format!(
        "Most values of {} fall between {} and {} ({} rows).",
        hist.column,
        format_number(bin.lower),
        format_number(bin.upper),
        bin.count
    ))
}

/// Correlation of the two scatter axes, or a not-enough-data note.
pub fn scatter(data: &ScatterData) -> String {
    match data.correlation {
        Some(r) => format!(
            "Pearson correlation between {} and {} is {:.2}.",
            data.x_column, data.y_column, r
        ),
        None => format!(
            "Not enough data to estimate a correlation between {} and {}.",
            data.x_column, data.y_column
        ),
    }
}

/// Point count and dominant hue group of a hued scatter.
pub fn scatter_by_hue(data: &HuedScatter) -> Option<String> {
    let largest = data.largest_group()?;
    Some(format!(
        "{} paired observations; {} = {} holds the most points ({}).",
        data.point_count(),
        data.hue_column,
        largest.label,
        largest.points.len()
    ))
}

/// Most common combination of a counts heatmap.
pub fn heatmap_counts(pivot: &PivotTable) -> Option<String> {
    let (row, col, count) = pivot.largest_cell()?;
    Some(format!(
        "The most common combination is {} = {} with {} = {} ({} passengers).",
        pivot.y_column, pivot.y_labels[row], pivot.x_column, pivot.x_labels[col], count
    ))
}

/// Highest column-share cell of a percentage heatmap.
pub fn heatmap_percentage(pivot: &PivotTable, percentages: &[Vec<f64>]) -> Option<String> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (row, cols) in percentages.iter().enumerate() {
        for (col, pct) in cols.iter().enumerate() {
            if best.is_none_or(|(_, _, b)| *pct > b) {
                best = Some((row, col, *pct));
            }
        }
    }
    let (row, col, pct) = best.filter(|(_, _, pct)| *pct > 0.0)?;
    Some(format!(
        "Within {} = {}, {} = {} accounts for {:.1}%.",
        pivot.x_column, pivot.x_labels[col], pivot.y_column, pivot.y_labels[row], pct
    ))
}

/// Strongest positive and negative correlates of the outcome column.
///
/// Omitted entirely when `Survived` is absent from the matrix (e.g. on the
/// cleaned table, where it was retyped to categorical).
pub fn correlation(matrix: &CorrelationMatrix) -> Option<String> {
    let against = matrix.against(SURVIVED)?;
    let defined: Vec<(&str, f64)> = against
        .iter()
        .filter_map(|(name, r)| Some((name.as_str(), (*r)?)))
        .collect();
    if defined.is_empty() {
        return None;
    }

    let mut max = defined[0];
    let mut min = defined[0];
    for entry in &defined[1..] {
        if entry.1 > max.1 {
            max = *entry;
        }
        if entry.1 < min.1 {
            min = *entry;
        }
    }

    if max.0 == min.0 {
        return Some(format!(
            "{} correlates with {SURVIVED} at {:.2}.",
            max.0, max.1
        ));
    }
    Some(format!(
        "{} has the strongest positive correlation with {SURVIVED} ({:.2}); {} the strongest negative ({:.2}).",
        max.0, max.1, min.0, min.1
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{frequency_table, pivot_counts};

    #[test]
    fn pie_reports_largest_share_to_one_decimal() {
        let df = polars::df!["Sex" => ["male", "male", "female"]].unwrap();
        let table = frequency_table(&df, "Sex").unwrap();
        assert_eq!(
            pie(&table).unwrap(),
            "Sex = male accounts for 66.7% of passengers."
        );
    }

    #[test]
    fn empty_frequency_table_yields_no_insight() {
        let df = polars::df!["Cabin" => [None::<&str>, None]].unwrap();
        let table = frequency_table(&df, "Cabin").unwrap();
        assert!(pie(&table).is_none());
    }

    #[test]
    fn heatmap_percentage_names_the_column_context() {
        let df = polars::df![
            "Pclass" => ["1", "1", "1", "3"],
            "Survived" => ["1", "1", "0", "0"],
        ]
        .unwrap();
        let pivot = pivot_counts(&df, "Pclass", "Survived").unwrap();
        let pct = pivot.normalize_columns();
        let sentence = heatmap_percentage(&pivot, &pct).unwrap();
        assert_eq!(
            sentence,
            "Within Pclass = 3, Survived = 0 accounts for 100.0%."
        );
    }

    #[test]
    fn correlation_sentence_is_omitted_without_the_outcome() {
        let df = polars::df![
            "Age" => [22.0, 38.0],
            "Fare" => [7.25, 71.28],
        ]
        .unwrap();
        let matrix = crate::aggregate::correlation_matrix(&df);
        assert!(correlation(&matrix).is_none());
    }

    #[test]
    fn correlation_sentence_reports_extremes() {
        let df = polars::df![
            "Survived" => [0i64, 0, 1, 1],
            "Fare" => [5.0, 10.0, 50.0, 60.0],
            "Pclass" => [3i64, 3, 1, 1],
        ]
        .unwrap();
        let matrix = crate::aggregate::correlation_matrix(&df);
        let sentence = correlation(&matrix).unwrap();
        assert!(sentence.contains("Fare has the strongest positive correlation"));
        assert!(sentence.contains("Pclass the strongest negative"));
    }
}
