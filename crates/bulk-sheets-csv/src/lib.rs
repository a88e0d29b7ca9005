//! # bulk-sheets-csv
//!
//! CSV data source for bulk-sheets.
//!
//! [`CsvSource`] reads a CSV stream in batches, so a file of any size can be
//! exported through the streaming writer without being loaded up front.

mod error;
mod options;
mod source;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use source::{detect_type, CsvSource};
