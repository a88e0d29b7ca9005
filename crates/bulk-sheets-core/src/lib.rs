//! # bulk-sheets-core
//!
//! Core data structures for the bulk-sheets streaming spreadsheet writer.
//!
//! This crate provides the format-independent half of a bulk export:
//! - [`CellValue`], [`Cell`] and [`Row`] - pooled, reusable cell storage
//! - [`RowBlock`] - the fixed-capacity window rows travel through
//! - [`DataSource`] - finite producers of records, eager or incremental
//! - [`Workbook`], [`Worksheet`] - the ordered sheet list and its sources
//! - [`paginate`] - splitting oversized sheets into `"Name (n)"` siblings
//! - [`stream_workbook`] - the fill/flip/drain loop feeding a [`SheetSink`]
//!
//! ## Example
//!
//! ```rust
//! use bulk_sheets_core::{CellValue, Column, RowBlock, SheetSink, VecSource, Workbook, Worksheet};
//!
//! struct Count(u64);
//!
//! impl SheetSink for Count {
//!     type Error = bulk_sheets_core::Error;
//!
//!     fn begin_sheet(&mut self, _: usize, _: &Worksheet) -> bulk_sheets_core::Result<()> {
//!         Ok(())
//!     }
//!
//!     fn write_rows(&mut self, _: &Worksheet, block: &mut RowBlock) -> bulk_sheets_core::Result<()> {
//!         self.0 += block.len() as u64;
//!         Ok(())
//!     }
//!
//!     fn end_sheet(&mut self, _: usize, _: &Worksheet, _: u64) -> bulk_sheets_core::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let mut workbook = Workbook::new();
//! let records = vec![vec![CellValue::from("Ada"), CellValue::from(36)]];
//! workbook
//!     .add_sheet("People", vec![Column::new("name"), Column::new("age")], VecSource::new(records))
//!     .unwrap();
//!
//! let mut sink = Count(0);
//! bulk_sheets_core::stream_workbook(&mut workbook, &mut sink).unwrap();
//! assert_eq!(sink.0, 2);
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod paginate;
pub mod row;
pub mod row_block;
pub mod source;
pub mod stream;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{column_to_letters, Cell, CellRefBuffer, CellValue};
pub use column::Column;
pub use error::{Error, Result};
pub use paginate::{plan_pages, SheetPaginator};
pub use row::Row;
pub use row_block::RowBlock;
pub use source::{DataSource, FnSource, IterSource, Record, SourceId, SourceRegistry, VecSource};
pub use stream::{stream_workbook, SheetSink, StreamStats};
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::{RowRange, SheetConfig, Worksheet};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Rows per fill/drain cycle unless configured otherwise
pub const DEFAULT_ROW_BLOCK_SIZE: usize = 32;
