use arrow::error::ArrowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    /// A mapping attribute did not parse as a JSON object of integers.
    #[error("failed to parse string mapping: {0}")]
    MappingParse(#[from] serde_json::Error),

    /// A coded value had no entry in the attached mapping.
    #[error("code {code} not present in string mapping")]
    UnmappedCode { code: i64 },

    /// The array passed for decoding was not integer-coded.
    #[error("expected an Int64 coded array, got {actual}")]
    NotCoded { actual: String },

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

/// Errors produced by [`TabularExporter`](crate::TabularExporter).
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Convert(#[from] ArrowConvertError),

    #[error(transparent)]
    Parquet(#[from] parquet::errors::ParquetError),
}
