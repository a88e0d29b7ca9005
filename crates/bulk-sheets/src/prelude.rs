//! Prelude module - common imports for bulk-sheets users
//!
//! ```rust
//! use bulk_sheets::prelude::*;
//! ```

#[cfg(feature = "csv")]
pub use crate::{CsvReadOptions, CsvSource};

pub use crate::{
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
    SheetConfig,
    VecSource,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    WorkbookSettings,
    Worksheet,

    // I/O types
    XlsxWriteOptions,
    XlsxWriter,
};
