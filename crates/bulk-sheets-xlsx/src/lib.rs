//! # bulk-sheets-xlsx
//!
//! Streaming XLSX (Office Open XML) writer for bulk-sheets.
//!
//! Rows are serialized block by block while the workbook's data sources are
//! drained, so memory stays bounded by the row block size and the string
//! interner's cache regardless of how many rows are exported.
//!
//! ```rust,no_run
//! use bulk_sheets_core::{CellValue, Column, VecSource, Workbook};
//! use bulk_sheets_xlsx::{XlsxWriteOptions, XlsxWriter};
//!
//! let mut workbook = Workbook::new();
//! let rows = vec![vec![CellValue::from("Ada"), CellValue::from(36)]];
//! workbook
//!     .add_sheet("People", vec![Column::new("name"), Column::new("age")], VecSource::new(rows))
//!     .unwrap();
//!
//! let report = XlsxWriter::write_file(&mut workbook, "people.xlsx", &XlsxWriteOptions::default())
//!     .unwrap();
//! assert_eq!(report.stats.rows, 2);
//! ```

pub mod error;
pub mod styles;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use styles::CellFormat;
pub use writer::{XlsxReport, XlsxSink, XlsxWriteOptions, XlsxWriter};
