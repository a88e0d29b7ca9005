//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV library error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] bulk_sheets_core::Error),
}

impl From<CsvError> for bulk_sheets_core::Error {
    fn from(err: CsvError) -> Self {
        match err {
            CsvError::Core(e) => e,
            other => bulk_sheets_core::Error::source(other.to_string()),
        }
    }
}
