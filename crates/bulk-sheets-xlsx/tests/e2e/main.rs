//! End-to-end tests for bulk-sheets-xlsx.
//!
//! Each test builds a workbook over in-memory sources, streams it into a
//! `Cursor`, then opens the archive with `zip::ZipArchive` and inspects the
//! parts it needs. Every part is checked for well-formedness with quick-xml.

mod common;
mod writing;

// Re-export common utilities for submodules
pub use common::*;
