use crate::core::models::error::ShapeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvIoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Inconsistent data: {0}")]
    Shape(#[from] ShapeError),
}

impl CsvIoError {
    pub(crate) fn parse(line: u64, message: impl Into<String>) -> Self {
        CsvIoError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub(crate) fn record_line(record: &csv::StringRecord, fallback: usize) -> u64 {
    record
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback as u64 + 1)
}

pub(crate) fn parse_float(field: &str, line: u64, column: usize) -> Result<f64, CsvIoError> {
    field.parse::<f64>().map_err(|_| {
        CsvIoError::parse(
            line,
            format!("invalid float in column {} (value: '{}')", column + 1, field),
        )
    })
}
