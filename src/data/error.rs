use thiserror::Error;

/// Errors raised while reading team statistics.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required column (or JSON key) is absent from the source.
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    /// A cell could not be interpreted as the column's type.
    #[error("row {row}: column '{column}' has invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    /// JSON input whose top level is not an array of record objects.
    #[error("expected a JSON array of records")]
    NotRecords,

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T> = std::result::Result<T, DataError>;
