//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while writing XLSX
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Shared string table error
    #[error("Shared strings error: {0}")]
    SharedStrings(#[from] bulk_sheets_sst::SstError),

    /// Core error (data source failure, limits, pagination)
    #[error("Core error: {0}")]
    Core(#[from] bulk_sheets_core::Error),

    /// A cell refers to a shared string the table does not hold
    #[error("Cell {cell} refers to shared string {index}, but the table holds {count}")]
    SharedStringOutOfRange { cell: String, index: u32, count: u32 },

    /// A workbook must contain at least one sheet
    #[error("Workbook has no sheets")]
    EmptyWorkbook,
}
