use bar_chart_rs::ChartError;
use bar_chart_rs::core::{SourceRow, SourceTable, TableSource, extract_table};

fn quarterly_sales() -> SourceTable {
    SourceTable::new(["North", "South", "West"])
        .with_caption("Sales")
        .with_row("Q1", ["10", "20", "30"])
        .with_row("Q2", ["40", "50", "60"])
}

#[test]
fn extraction_reads_values_row_major_and_groups_by_column() {
    let data = extract_table(&quarterly_sales()).expect("extract");

    assert_eq!(data.caption, "Sales");
    assert_eq!(data.row_labels, vec!["Q1", "Q2"]);
    assert_eq!(data.column_labels, vec!["North", "South", "West"]);
    assert_eq!(data.values, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    assert_eq!(
        data.column_groups,
        vec![vec![10.0, 40.0], vec![20.0, 50.0], vec![30.0, 60.0]]
    );
    assert_eq!(data.row_count(), 2);
    assert_eq!(data.column_count(), 3);
    assert_eq!(data.value_at(1, 2), Some(60.0));
    assert_eq!(data.value_at(2, 0), None);
}

#[test]
fn missing_caption_becomes_empty_string() {
    let source = SourceTable::new(["Total"]).with_row("Q1", ["5"]);
    let data = extract_table(&source).expect("extract");
    assert_eq!(data.caption, "");
}

#[test]
fn labels_and_cells_are_trimmed() {
    let source = SourceTable::new([" Revenue "])
        .with_caption("  Yearly \n")
        .with_row(" 2024 ", [" 1200.5 "]);
    let data = extract_table(&source).expect("extract");
    assert_eq!(data.caption, "Yearly");
    assert_eq!(data.column_labels, vec!["Revenue"]);
    assert_eq!(data.row_labels, vec!["2024"]);
    assert_eq!(data.values, vec![1200.5]);
}

#[test]
fn missing_column_headers_is_malformed() {
    let source = SourceTable::default().with_row("Q1", Vec::<String>::new());
    let err = extract_table(&source).expect_err("no headers");
    assert!(matches!(err, ChartError::MalformedSource(_)));
    assert!(format!("{err}").contains("column headers"));
}

#[test]
fn missing_rows_is_malformed() {
    let source = SourceTable::new(["A", "B"]).with_caption("Empty");
    let err = extract_table(&source).expect_err("no rows");
    assert!(matches!(err, ChartError::MalformedSource(_)));
    assert!(format!("{err}").contains("data rows"));
}

#[test]
fn ragged_row_is_malformed() {
    let source = SourceTable::new(["A", "B"])
        .with_row("r0", ["1", "2"])
        .with_row("r1", ["3"]);
    let err = extract_table(&source).expect_err("ragged row");
    assert!(matches!(err, ChartError::MalformedSource(_)));
    assert!(format!("{err}").contains("row 1"));
}

#[test]
fn non_numeric_cell_reports_position_and_text() {
    let source = SourceTable::new(["A", "B"])
        .with_row("r0", ["1", "2"])
        .with_row("r1", ["3", "n/a"]);
    let err = extract_table(&source).expect_err("invalid cell");
    assert_eq!(
        err,
        ChartError::InvalidCellValue {
            row: 1,
            column: 1,
            text: "n/a".to_owned(),
        }
    );
}

#[test]
fn csv_source_feeds_extraction() {
    let input = "Region,2023,2024\nNorth,120,340\nSouth,90,410\n";
    let source = SourceTable::from_csv_reader(input.as_bytes(), None).expect("csv");
    let data = extract_table(&source).expect("extract");

    assert_eq!(data.caption, "");
    assert_eq!(data.column_labels, vec!["2023", "2024"]);
    assert_eq!(data.row_labels, vec!["North", "South"]);
    assert_eq!(data.column_groups, vec![vec![120.0, 90.0], vec![340.0, 410.0]]);
}

#[test]
fn json_source_feeds_extraction() {
    let input = r#"{
        "caption": "Visits",
        "column_headers": ["Mon", "Tue"],
        "rows": [
            { "header": "Web", "cells": ["100", "150"] },
            { "header": "App", "cells": ["80", "95"] }
        ]
    }"#;
    let source = SourceTable::from_json_str(input).expect("json");
    let data = extract_table(&source).expect("extract");
    assert_eq!(data.caption, "Visits");
    assert_eq!(data.column_groups, vec![vec![100.0, 80.0], vec![150.0, 95.0]]);
}

struct BorrowedTable<'a> {
    headers: &'a [&'a str],
    rows: &'a [(&'a str, &'a [&'a str])],
}

impl TableSource for BorrowedTable<'_> {
    fn caption(&self) -> Option<&str> {
        None
    }

    fn column_headers(&self) -> Vec<&str> {
        self.headers.to_vec()
    }

    fn rows(&self) -> Vec<SourceRow<'_>> {
        self.rows
            .iter()
            .map(|&(header, cells)| SourceRow {
                header,
                cells: cells.to_vec(),
            })
            .collect()
    }
}

#[test]
fn custom_sources_are_supported_through_the_trait() {
    let source = BorrowedTable {
        headers: &["X"],
        rows: &[("a", &["1"][..]), ("b", &["2"][..])],
    };
    let data = extract_table(&source).expect("extract");
    assert_eq!(data.column_groups, vec![vec![1.0, 2.0]]);
}
