//! Append-only disk table of string entries
//!
//! File layout: a 4-byte little-endian record count at offset 0 (written by
//! [`DiskTable::commit`]), followed by the records in append order. Records
//! are never rewritten once appended. The backing file is a temp file that
//! is deleted on [`DiskTable::close`] or when the table is dropped.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::entry::{EntryRef, RecordKind, StringEntry, RECORD_HEADER_LEN};
use crate::error::{IoContext, SstError, SstResult};

/// Size of the count header at the start of the file
pub const COUNT_HEADER_LEN: u64 = 4;

/// Where a scan starts: byte offset of a record and its ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePosition {
    pub offset: u64,
    pub ordinal: u32,
}

impl TablePosition {
    /// The first record of the table
    pub const START: TablePosition = TablePosition {
        offset: COUNT_HEADER_LEN,
        ordinal: 0,
    };
}

/// Append-only, linearly scanned table of [`StringEntry`] records
#[derive(Debug)]
pub struct DiskTable {
    file: NamedTempFile,
    writer: BufWriter<File>,
    reader: BufReader<File>,
    /// Payload buffer for comparisons; grows to fit the largest record seen
    scratch: Vec<u8>,
    /// End of the last appended record
    end: u64,
    count: u32,
    dirty: bool,
}

impl DiskTable {
    /// Create an empty table in `temp_dir` (or the system temp dir).
    ///
    /// `scan_buffer_size` is the read buffer used by scans.
    pub fn create(temp_dir: Option<&Path>, scan_buffer_size: usize) -> SstResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("bulk-sst-").suffix(".tbl");
        let file = match temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .context("create string table file")?;

        let mut writer = BufWriter::new(file.reopen().context("open string table for writing")?);
        writer
            .write_all(&0i32.to_le_bytes())
            .context("write string table header")?;
        let reader = BufReader::with_capacity(
            scan_buffer_size.max(64),
            file.reopen().context("open string table for scanning")?,
        );

        Ok(Self {
            file,
            writer,
            reader,
            scratch: vec![0u8; 256],
            end: COUNT_HEADER_LEN,
            count: 0,
            dirty: true,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of records appended
    pub fn len(&self) -> u32 {
        self.count
    }

    /// Check if no record has been appended
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Bytes in the table, count header included
    pub fn size_in_bytes(&self) -> u64 {
        self.end
    }

    /// Position just past the last record
    pub fn end_position(&self) -> TablePosition {
        TablePosition {
            offset: self.end,
            ordinal: self.count,
        }
    }

    /// Append a record and return its ordinal
    pub fn append(&mut self, entry: EntryRef<'_>) -> SstResult<u32> {
        let length = entry.length_field()?;
        self.writer
            .write_all(&length.to_le_bytes())
            .context("append to string table")?;
        self.writer
            .write_all(entry.payload())
            .context("append to string table")?;

        self.end += entry.encoded_len() as u64;
        self.dirty = true;
        let ordinal = self.count;
        self.count += 1;
        Ok(ordinal)
    }

    fn flush_writes(&mut self) -> SstResult<()> {
        if self.dirty {
            self.writer.flush().context("flush string table")?;
            self.dirty = false;
        }
        Ok(())
    }

    /// Find the first record equal to `entry`, scanning forward from `from`.
    ///
    /// Records are compared by length field first; payload bytes are only
    /// read for records whose length matches.
    pub fn scan_for(&mut self, entry: EntryRef<'_>, from: TablePosition) -> SstResult<Option<u32>> {
        self.flush_writes()?;
        let wanted_length = entry.length_field()?;
        let wanted = entry.payload();

        self.reader
            .seek(SeekFrom::Start(from.offset))
            .context("seek string table")?;
        let mut offset = from.offset;
        let mut ordinal = from.ordinal;
        let mut header = [0u8; RECORD_HEADER_LEN];

        while offset < self.end {
            self.reader
                .read_exact(&mut header)
                .context("read string table record")?;
            let length = i32::from_le_bytes(header);
            let payload_len = RecordKind::decode(length, offset)?.payload_len();

            if length == wanted_length {
                if payload_len == 0 {
                    return Ok(Some(ordinal));
                }
                if self.scratch.len() < payload_len {
                    self.scratch.resize(payload_len.next_power_of_two(), 0);
                }
                let buf = &mut self.scratch[..payload_len];
                self.reader
                    .read_exact(buf)
                    .context("read string table record")?;
                // Last byte first: most near-misses of equal length differ at the tail
                if buf[payload_len - 1] == wanted[payload_len - 1] && *buf == *wanted {
                    return Ok(Some(ordinal));
                }
            } else if payload_len > 0 {
                self.reader
                    .seek_relative(payload_len as i64)
                    .context("skip string table record")?;
            }

            offset += (RECORD_HEADER_LEN + payload_len) as u64;
            ordinal += 1;
        }
        Ok(None)
    }

    /// Lazily decode every record in append order.
    ///
    /// The iterator reads through its own file handle, so each call starts
    /// a fresh pass from the first record.
    pub fn iter(&mut self) -> SstResult<TableIter> {
        self.flush_writes()?;
        let mut reader = BufReader::new(self.file.reopen().context("open string table")?);
        reader
            .seek(SeekFrom::Start(COUNT_HEADER_LEN))
            .context("seek string table")?;
        Ok(TableIter {
            reader,
            offset: COUNT_HEADER_LEN,
            end: self.end,
            failed: false,
        })
    }

    /// Write the record count into the header
    pub fn commit(&mut self) -> SstResult<()> {
        let count = i32::try_from(self.count).map_err(|_| SstError::Corrupt {
            offset: 0,
            reason: format!("record count {} overflows the header", self.count),
        })?;
        self.writer
            .seek(SeekFrom::Start(0))
            .context("seek string table header")?;
        self.writer
            .write_all(&count.to_le_bytes())
            .context("write string table header")?;
        self.writer
            .seek(SeekFrom::End(0))
            .context("seek string table end")?;
        self.dirty = true;
        self.flush_writes()
    }

    /// Record count as stored in the header (after the last commit)
    pub fn committed_count(&mut self) -> SstResult<u32> {
        self.flush_writes()?;
        let mut header = [0u8; 4];
        self.reader
            .seek(SeekFrom::Start(0))
            .context("seek string table header")?;
        self.reader
            .read_exact(&mut header)
            .context("read string table header")?;
        Ok(i32::from_le_bytes(header).max(0) as u32)
    }

    /// Commit, then delete the backing file
    pub fn close(mut self) -> SstResult<()> {
        self.commit()?;
        let DiskTable {
            file,
            writer,
            reader,
            ..
        } = self;
        drop(writer);
        drop(reader);
        file.close().context("remove string table file")
    }
}

/// Single pass over the records of a [`DiskTable`]
#[derive(Debug)]
pub struct TableIter {
    reader: BufReader<File>,
    offset: u64,
    end: u64,
    failed: bool,
}

impl TableIter {
    fn read_entry(&mut self) -> SstResult<StringEntry> {
        let mut header = [0u8; RECORD_HEADER_LEN];
        self.reader
            .read_exact(&mut header)
            .context("read string table record")?;
        let kind = RecordKind::decode(i32::from_le_bytes(header), self.offset)?;

        let entry = match kind {
            RecordKind::Char(c) => StringEntry::Char(c),
            RecordKind::Null => StringEntry::Null,
            RecordKind::Text(n) => {
                let mut bytes = vec![0u8; n];
                self.reader
                    .read_exact(&mut bytes)
                    .context("read string table record")?;
                let text = String::from_utf8(bytes).map_err(|e| SstError::Corrupt {
                    offset: self.offset,
                    reason: e.to_string(),
                })?;
                StringEntry::Text(text)
            }
        };
        self.offset += (RECORD_HEADER_LEN + kind.payload_len()) as u64;
        Ok(entry)
    }
}

impl Iterator for TableIter {
    type Item = SstResult<StringEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.end {
            return None;
        }
        let result = self.read_entry();
        self.failed = result.is_err();
        Some(result)
    }
}
