//! # bulk-sheets-sst
//!
//! Shared string table for the bulk-sheets streaming writer.
//!
//! [`StringInterner`] hands out a stable, zero-based index for every distinct
//! string or character while keeping memory bounded: membership is tracked
//! by a bloom filter, recent lookups by an LRU cache, and the entries
//! themselves live in an append-only temp file that is scanned only when
//! both of those are inconclusive.
//!
//! ## Example
//!
//! ```rust
//! use bulk_sheets_sst::{StringInterner, INLINE};
//!
//! let mut interner = StringInterner::with_defaults().unwrap();
//! assert_eq!(interner.intern_string("abc").unwrap(), 0);
//! assert_eq!(interner.intern_string("中文").unwrap(), 1);
//! assert_eq!(interner.intern_string("abc").unwrap(), 0);
//! assert_ne!(interner.intern_char('x').unwrap(), INLINE);
//!
//! let mut xml = Vec::new();
//! interner.finalize_and_write(&mut xml).unwrap();
//! interner.close().unwrap();
//! ```

pub mod ascii;
pub mod cache;
pub mod entry;
pub mod error;
pub mod filter;
pub mod interner;
pub mod output;
pub mod table;
pub mod xml;

pub use ascii::AsciiFastPath;
pub use cache::RecencyCache;
pub use entry::{EntryRef, StringEntry, NULL_MARKER};
pub use error::{SstError, SstResult};
pub use filter::MembershipFilter;
pub use interner::{InternerOptions, InternerStats, StringInterner, INLINE};
pub use output::OutputLog;
pub use table::{DiskTable, TableIter, TablePosition};
