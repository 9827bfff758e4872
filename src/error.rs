use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    /// The table source lacks a section the chart cannot be built without.
    #[error("malformed table source: {0}")]
    MalformedSource(String),

    #[error("invalid cell value at row {row}, column {column}: {text:?}")]
    InvalidCellValue {
        row: usize,
        column: usize,
        text: String,
    },

    #[error("dataset has no values to chart")]
    EmptyDataset,

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("renderer failure: {0}")]
    Renderer(String),
}
