//! Error types for bulk-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bulk-sheets-core
#[derive(Debug, Error)]
pub enum Error {
    /// A physical sheet was configured with more columns than allowed.
    /// Columns are never split across sheets, so this is always fatal.
    #[error("Too many columns: {count} (max: {limit})")]
    TooManyColumns { count: usize, limit: usize },

    /// Row limit leaves no room for data rows
    #[error("Invalid row limit {limit}: {header_rows} header row(s) leave no room for data")]
    InvalidRowLimit { limit: usize, header_rows: usize },

    /// Sheet index out of bounds
    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// A sheet refers to a data source that was never registered or is already released
    #[error("Unknown data source: #{0}")]
    UnknownSource(usize),

    /// The data source failed to produce rows
    #[error("Data source error: {0}")]
    Source(String),

    /// IO error with the operation that failed
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a data source error
    pub fn source<S: Into<String>>(msg: S) -> Self {
        Error::Source(msg.into())
    }

    /// Wrap an IO error with context
    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Error::Io {
            context: context.into(),
            source,
        }
    }
}
