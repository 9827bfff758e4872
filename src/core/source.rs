use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Borrowed view of one body row: its header text followed by its data cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow<'a> {
    pub header: &'a str,
    pub cells: Vec<&'a str>,
}

/// Abstract tabular source the extractor reads from.
///
/// Implementations only expose raw text; numeric coercion and structural
/// validation belong to [`crate::core::extract_table`].
pub trait TableSource {
    fn caption(&self) -> Option<&str>;
    fn column_headers(&self) -> Vec<&str>;
    fn rows(&self) -> Vec<SourceRow<'_>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceTableRow {
    pub header: String,
    pub cells: Vec<String>,
}

/// Owned in-memory table source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceTable {
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub column_headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<SourceTableRow>,
}

impl SourceTable {
    #[must_use]
    pub fn new<I, S>(column_headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            caption: None,
            column_headers: column_headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_row<I, S>(mut self, header: impl Into<String>, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(SourceTableRow {
            header: header.into(),
            cells: cells.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse source table json: {e}")))
    }

    /// Reads a CSV table.
    ///
    /// The first record is the header row; its first cell is the corner label
    /// and is discarded. Every following record starts with the row header.
    pub fn from_csv_reader<R: Read>(reader: R, caption: Option<&str>) -> ChartResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ChartError::MalformedSource(format!("unreadable csv header row: {e}")))?;
        let column_headers = headers.iter().skip(1).map(str::to_owned).collect();

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record.map_err(|e| {
                ChartError::MalformedSource(format!("unreadable csv record {index}: {e}"))
            })?;
            let mut fields = record.iter();
            let Some(header) = fields.next() else {
                continue;
            };
            rows.push(SourceTableRow {
                header: header.to_owned(),
                cells: fields.map(str::to_owned).collect(),
            });
        }

        Ok(Self {
            caption: caption.map(str::to_owned),
            column_headers,
            rows,
        })
    }
}

impl TableSource for SourceTable {
    fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    fn column_headers(&self) -> Vec<&str> {
        self.column_headers.iter().map(String::as_str).collect()
    }

    fn rows(&self) -> Vec<SourceRow<'_>> {
        self.rows
            .iter()
            .map(|row| SourceRow {
                header: &row.header,
                cells: row.cells.iter().map(String::as_str).collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_drops_corner_cell_and_splits_row_headers() {
        let input = "Quarter,North,South\nQ1,10,20\nQ2, 30 ,40\n";
        let table = SourceTable::from_csv_reader(input.as_bytes(), Some("Sales")).expect("csv");

        assert_eq!(table.caption(), Some("Sales"));
        assert_eq!(table.column_headers(), vec!["North", "South"]);
        let rows = table.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].header, "Q2");
        assert_eq!(rows[1].cells, vec!["30", "40"]);
    }

    #[test]
    fn json_source_defaults_missing_sections() {
        let table = SourceTable::from_json_str(r#"{"column_headers":["A"]}"#).expect("json");
        assert_eq!(table.caption(), None);
        assert!(table.rows().is_empty());

        let err = SourceTable::from_json_str("{").expect_err("broken json");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }
}
