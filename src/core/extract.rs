use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TableSource;
use crate::error::{ChartError, ChartResult};

/// Normalized chart data read out of a [`TableSource`].
///
/// `column_groups[c][r]` is the value at row `r`, column `c`. The group count
/// always equals `column_labels.len()` and every group holds
/// `row_labels.len()` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub values: Vec<f64>,
    pub caption: String,
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub column_groups: Vec<Vec<f64>>,
}

impl TableData {
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_labels.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_labels.len()
    }

    #[must_use]
    pub fn value_at(&self, row: usize, column: usize) -> Option<f64> {
        self.column_groups.get(column)?.get(row).copied()
    }
}

/// Reads a table source into [`TableData`].
///
/// A missing caption becomes an empty string. Missing column headers, missing
/// body rows, or ragged rows fail with [`ChartError::MalformedSource`]; a data
/// cell that is not a finite number fails with
/// [`ChartError::InvalidCellValue`].
pub fn extract_table<S: TableSource + ?Sized>(source: &S) -> ChartResult<TableData> {
    let column_labels: Vec<String> = source
        .column_headers()
        .into_iter()
        .map(|header| header.trim().to_owned())
        .collect();
    if column_labels.is_empty() {
        return Err(ChartError::MalformedSource(
            "table has no column headers".to_owned(),
        ));
    }

    let rows = source.rows();
    if rows.is_empty() {
        return Err(ChartError::MalformedSource(
            "table has no data rows".to_owned(),
        ));
    }

    let column_count = column_labels.len();
    let mut values = Vec::with_capacity(rows.len() * column_count);
    let mut row_labels = Vec::with_capacity(rows.len());
    for (row_index, row) in rows.iter().enumerate() {
        if row.cells.len() != column_count {
            return Err(ChartError::MalformedSource(format!(
                "row {row_index} ({:?}) has {} cells, expected {column_count}",
                row.header.trim(),
                row.cells.len()
            )));
        }
        row_labels.push(row.header.trim().to_owned());
        for (column_index, cell) in row.cells.iter().enumerate() {
            values.push(parse_cell(cell, row_index, column_index)?);
        }
    }

    let column_groups = (0..column_count)
        .map(|column| {
            (0..row_labels.len())
                .map(|row| values[row * column_count + column])
                .collect()
        })
        .collect();

    let caption = source
        .caption()
        .map(|caption| caption.trim().to_owned())
        .unwrap_or_default();

    debug!(
        rows = row_labels.len(),
        columns = column_count,
        caption = %caption,
        "extracted table data"
    );

    Ok(TableData {
        values,
        caption,
        row_labels,
        column_labels,
        column_groups,
    })
}

fn parse_cell(text: &str, row: usize, column: usize) -> ChartResult<f64> {
    let invalid = || ChartError::InvalidCellValue {
        row,
        column,
        text: text.to_owned(),
    };
    let value: f64 = text.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value)
}
