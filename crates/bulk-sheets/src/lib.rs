//! # bulk-sheets
//!
//! Streaming export of large tabular datasets to XLSX workbooks.
//!
//! Rows are pulled from [`DataSource`]s one block at a time and written
//! straight into the archive, so memory stays bounded however many rows are
//! exported. Text goes through a disk-backed shared string table, and sheets
//! larger than the row limit are split into `"Name (1)"`, `"Name (2)"`, ...
//! siblings.
//!
//! ## Features
//!
//! - Eager (`VecSource`) and incremental (`IterSource`, `FnSource`,
//!   `CsvSource`) data sources
//! - Automatic pagination at the Excel row limit (or any configured limit)
//! - Shared string deduplication with a bounded memory footprint
//! - CSV import (feature `csv`, on by default)
//!
//! ## Example
//!
//! ```rust,no_run
//! use bulk_sheets::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let rows = (0..100_000).map(|i| vec![CellValue::from(i as i64), CellValue::from(format!("item {}", i))]);
//! workbook
//!     .add_sheet("Items", vec![Column::new("id"), Column::new("name")], IterSource::new(rows, 1_000))
//!     .unwrap();
//!
//! let report = workbook.save("items.xlsx").unwrap();
//! println!("{} rows in {} sheets", report.stats.rows, report.stats.sheets);
//! ```

pub mod prelude;

// Re-export core types
pub use bulk_sheets_core::{
    plan_pages,
    stream_workbook,
    Cell,
    // Cell types
    CellValue,
    Column,
    // Data sources
    DataSource,
    // Error types
    Error,
    FnSource,
    IterSource,
    Record,
    Result,
    Row,
    RowBlock,
    RowRange,
    SheetConfig,
    SheetPaginator,
    SheetSink,
    StreamStats,
    VecSource,
    // Main types
    Workbook,
    WorkbookSettings,
    Worksheet,

    DEFAULT_ROW_BLOCK_SIZE,
    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};

// Re-export shared string types
pub use bulk_sheets_sst::{InternerOptions, InternerStats, StringInterner};

// Re-export I/O types
#[cfg(feature = "csv")]
pub use bulk_sheets_csv::{CsvError, CsvReadOptions, CsvSource};
pub use bulk_sheets_xlsx::{XlsxError, XlsxReport, XlsxSink, XlsxWriteOptions, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Stream the workbook to an `.xlsx` file with default options
    fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<XlsxReport>;

    /// Stream the workbook to an `.xlsx` file
    fn save_with<P: AsRef<Path>>(&mut self, path: P, options: &XlsxWriteOptions)
        -> Result<XlsxReport>;

    /// Add a sheet fed by a CSV file, with columns taken from its header
    #[cfg(feature = "csv")]
    fn add_csv_sheet<P: AsRef<Path>>(
        &mut self,
        name: &str,
        path: P,
        options: &CsvReadOptions,
    ) -> Result<usize>;
}

impl WorkbookExt for Workbook {
    fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<XlsxReport> {
        self.save_with(path, &XlsxWriteOptions::default())
    }

    fn save_with<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &XlsxWriteOptions,
    ) -> Result<XlsxReport> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") => XlsxWriter::write_file(self, path, options).map_err(|e| match e {
                XlsxError::Core(e) => e,
                other => Error::other(other.to_string()),
            }),
            _ => Err(Error::other(format!(
                "Unsupported file format: {}",
                path.display()
            ))),
        }
    }

    #[cfg(feature = "csv")]
    fn add_csv_sheet<P: AsRef<Path>>(
        &mut self,
        name: &str,
        path: P,
        options: &CsvReadOptions,
    ) -> Result<usize> {
        let mut source = CsvSource::open(path, options)?;
        let columns = source.columns()?;
        let config = SheetConfig {
            header: options.has_header,
            ..Default::default()
        };
        self.add_sheet_with_config(name, columns, config, source)
    }
}
