//! Error types for bulk-sheets-sst

use thiserror::Error;

/// Result type alias using [`SstError`]
pub type SstResult<T> = std::result::Result<T, SstError>;

/// Errors raised by the string table and its backing files.
///
/// Every I/O failure is fatal for the interner that raised it.
#[derive(Debug, Error)]
pub enum SstError {
    /// IO error on a backing file, with the operation that failed
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A record read back from the disk table is malformed
    #[error("Corrupt string table at offset {offset}: {reason}")]
    Corrupt { offset: u64, reason: String },

    /// A string does not fit the 4-byte record length
    #[error("String of {0} bytes is too large for the string table")]
    EntryTooLarge(usize),
}

/// Attach a static context to IO results
pub(crate) trait IoContext<T> {
    fn context(self, context: &'static str) -> SstResult<T>;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn context(self, context: &'static str) -> SstResult<T> {
        self.map_err(|source| SstError::Io { context, source })
    }
}
