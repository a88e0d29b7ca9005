//! String table entries and their on-disk record codec
//!
//! Record layout (little-endian):
//!
//! ```text
//! [i32 length] [payload: `length` UTF-8 bytes, only when length >= 0]
//! ```
//!
//! A negative length is a single UTF-16 code unit stored as its bitwise
//! complement, so code units `0x0000..=0xFFFF` map to `-1..=-65536`. The
//! null marker sits just below that range.

use crate::error::{SstError, SstResult};

/// Length field of the explicit null marker
pub const NULL_MARKER: i32 = !0x1_0000;

/// Size of a record's length field
pub const RECORD_HEADER_LEN: usize = 4;

/// An owned table entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringEntry {
    /// A single UTF-16 code unit
    Char(u16),
    /// UTF-8 text
    Text(String),
    /// Explicit null / empty marker
    Null,
}

impl StringEntry {
    /// Borrow as an [`EntryRef`]
    pub fn borrowed(&self) -> EntryRef<'_> {
        match self {
            StringEntry::Char(c) => EntryRef::Char(*c),
            StringEntry::Text(s) => EntryRef::Text(s),
            StringEntry::Null => EntryRef::Null,
        }
    }
}

/// A borrowed table entry, used for lookups without allocating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryRef<'a> {
    Char(u16),
    Text(&'a str),
    Null,
}

impl EntryRef<'_> {
    /// Value of the record's length field
    pub fn length_field(&self) -> SstResult<i32> {
        match self {
            EntryRef::Char(c) => Ok(!(*c as i32)),
            EntryRef::Text(s) => {
                i32::try_from(s.len()).map_err(|_| SstError::EntryTooLarge(s.len()))
            }
            EntryRef::Null => Ok(NULL_MARKER),
        }
    }

    /// Payload bytes following the length field
    pub fn payload(&self) -> &[u8] {
        match self {
            EntryRef::Text(s) => s.as_bytes(),
            _ => &[],
        }
    }

    /// Encoded record size in bytes
    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_LEN + self.payload().len()
    }

    /// Convert to an owned entry
    pub fn into_owned(self) -> StringEntry {
        match self {
            EntryRef::Char(c) => StringEntry::Char(c),
            EntryRef::Text(s) => StringEntry::Text(s.to_string()),
            EntryRef::Null => StringEntry::Null,
        }
    }
}

/// What a record's length field announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordKind {
    Text(usize),
    Char(u16),
    Null,
}

impl RecordKind {
    pub(crate) fn decode(length: i32, offset: u64) -> SstResult<Self> {
        if length >= 0 {
            Ok(RecordKind::Text(length as usize))
        } else if length == NULL_MARKER {
            Ok(RecordKind::Null)
        } else if length >= !0xFFFF {
            Ok(RecordKind::Char(!length as u16))
        } else {
            Err(SstError::Corrupt {
                offset,
                reason: format!("invalid record length {}", length),
            })
        }
    }

    /// Payload bytes that follow the length field
    pub(crate) fn payload_len(&self) -> usize {
        match self {
            RecordKind::Text(n) => *n,
            _ => 0,
        }
    }
}
