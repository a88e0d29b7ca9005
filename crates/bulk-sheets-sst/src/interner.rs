//! Deduplicating string interner
//!
//! Assigns every distinct string or character a zero-based index in
//! first-seen order and writes its encoded `<si>` item exactly once.
//!
//! Lookup order for a value:
//!
//! 1. single ASCII characters: [`AsciiFastPath`];
//! 2. [`MembershipFilter`]: "definitely new" appends without further checks;
//! 3. "maybe seen": [`RecencyCache`], then a linear scan of the
//!    [`DiskTable`]. A scan that finds nothing was a filter false positive
//!    and the value is appended as new.
//!
//! Once `max_entries` distinct values exist, new values are no longer
//! interned and the caller must write them inline.

use std::io::Write;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::ascii::AsciiFastPath;
use crate::cache::RecencyCache;
use crate::entry::EntryRef;
use crate::error::{IoContext, SstResult};
use crate::filter::MembershipFilter;
use crate::output::OutputLog;
use crate::table::{DiskTable, TableIter, TablePosition};

/// Returned by [`StringInterner::intern_string`] and
/// [`StringInterner::intern_char`] for values that must be written inline
pub const INLINE: i64 = -1;

/// Interner sizing and placement options
#[derive(Debug, Clone)]
pub struct InternerOptions {
    /// Insertions the first filter generation is sized for
    pub expected_entries: usize,
    /// Target false-positive rate per filter generation
    pub false_positive_rate: f64,
    /// Entries kept in the recency cache (per kind: text and characters)
    pub cache_capacity: usize,
    /// Distinct values after which new values are written inline
    pub max_entries: u32,
    /// Read buffer used by disk table scans
    pub scan_buffer_size: usize,
    /// Directory for the temp files (None = system temp dir)
    pub temp_dir: Option<PathBuf>,
}

impl Default for InternerOptions {
    fn default() -> Self {
        Self {
            expected_entries: 65_536,
            false_positive_rate: 0.001,
            cache_capacity: 4_096,
            max_entries: 4_194_304,
            scan_buffer_size: 8_192,
            temp_dir: None,
        }
    }
}

/// Counters describing an interner's work so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InternerStats {
    /// Lookups that returned an index (the `count` of the string table)
    pub total_references: u64,
    /// Distinct values interned
    pub unique_count: u32,
    /// Values refused because the table reached `max_entries`
    pub inline_values: u64,
    /// Filter rebuilds
    pub filter_rebuilds: usize,
    /// Filter "maybe" answers resolved by the recency cache
    pub cache_hits: u64,
    /// Filter "maybe" answers that needed a disk scan
    pub disk_scans: u64,
    /// Disk scans that found nothing (filter false positives)
    pub false_positives: u64,
    /// Size of the disk table in bytes
    pub table_bytes: u64,
}

/// Disk-backed shared string table builder
#[derive(Debug)]
pub struct StringInterner {
    options: InternerOptions,
    ascii: AsciiFastPath,
    filter: MembershipFilter,
    cache: RecencyCache,
    table: DiskTable,
    output: OutputLog,
    unique: u32,
    references: u64,
    inline_values: u64,
    disk_scans: u64,
    false_positives: u64,
    ceiling_reported: bool,
}

impl StringInterner {
    /// Create an interner and its temp files
    pub fn new(options: InternerOptions) -> SstResult<Self> {
        let temp_dir = options.temp_dir.as_deref();
        let table = DiskTable::create(temp_dir, options.scan_buffer_size)?;
        let output = OutputLog::create(temp_dir)?;
        debug!(
            "string interner created: table {}, log {}",
            table.path().display(),
            output.path().display()
        );

        Ok(Self {
            ascii: AsciiFastPath::new(),
            filter: MembershipFilter::new(options.expected_entries, options.false_positive_rate),
            cache: RecencyCache::new(options.cache_capacity),
            table,
            output,
            unique: 0,
            references: 0,
            inline_values: 0,
            disk_scans: 0,
            false_positives: 0,
            ceiling_reported: false,
            options,
        })
    }

    /// Create an interner with default options
    pub fn with_defaults() -> SstResult<Self> {
        Self::new(InternerOptions::default())
    }

    /// Index of a single UTF-16 code unit; `None` means write it inline
    pub fn get_char(&mut self, code: u16) -> SstResult<Option<u32>> {
        if let Some(index) = self.ascii.get(code) {
            self.references += 1;
            return Ok(Some(index as u32));
        }
        let index = self.resolve(EntryRef::Char(code))?;
        if let Some(index) = index {
            if AsciiFastPath::covers(code) {
                self.ascii.set(code, index as i32);
            }
        }
        Ok(index)
    }

    /// Index of a string; `None` means write it inline
    pub fn get_string(&mut self, s: &str) -> SstResult<Option<u32>> {
        self.resolve(EntryRef::Text(s))
    }

    /// Index of `c`, or [`INLINE`].
    ///
    /// Characters outside the Basic Multilingual Plane are interned as text.
    pub fn intern_char(&mut self, c: char) -> SstResult<i64> {
        let mut units = [0u16; 2];
        let index = match c.encode_utf16(&mut units) {
            [unit] => self.get_char(*unit)?,
            _ => {
                let mut buf = [0u8; 4];
                self.get_string(c.encode_utf8(&mut buf))?
            }
        };
        Ok(index.map_or(INLINE, i64::from))
    }

    /// Index of `s`, or [`INLINE`]
    pub fn intern_string(&mut self, s: &str) -> SstResult<i64> {
        Ok(self.get_string(s)?.map_or(INLINE, i64::from))
    }

    fn resolve(&mut self, key: EntryRef<'_>) -> SstResult<Option<u32>> {
        if !self.filter.might_contain(key) {
            return self.push(key);
        }

        if let Some(index) = self.cache.get(key) {
            self.references += 1;
            return Ok(Some(index as u32));
        }

        self.disk_scans += 1;
        if let Some(index) = self.table.scan_for(key, TablePosition::START)? {
            self.cache.put(key, index as i32);
            self.references += 1;
            return Ok(Some(index));
        }

        self.false_positives += 1;
        self.push(key)
    }

    /// Assign the next index to a value not yet in the table
    fn push(&mut self, key: EntryRef<'_>) -> SstResult<Option<u32>> {
        if self.unique >= self.options.max_entries {
            self.inline_values += 1;
            if !self.ceiling_reported {
                self.ceiling_reported = true;
                warn!(
                    "shared string table reached {} entries; further new strings are written inline",
                    self.options.max_entries
                );
            }
            return Ok(None);
        }

        let index = self.table.append(key)?;
        self.output.push(key)?;
        self.filter.insert(key);
        self.cache.put(key, index as i32);
        self.unique += 1;
        self.references += 1;

        if self.filter.needs_rebuild() {
            self.filter.rebuild(self.cache.resident_keys());
        }
        Ok(Some(index))
    }

    /// Distinct values interned so far
    pub fn unique_count(&self) -> u32 {
        self.unique
    }

    /// Lookups that returned an index
    pub fn total_references(&self) -> u64 {
        self.references
    }

    /// Snapshot of the interner's counters
    pub fn stats(&self) -> InternerStats {
        InternerStats {
            total_references: self.references,
            unique_count: self.unique,
            inline_values: self.inline_values,
            filter_rebuilds: self.filter.rebuilds(),
            cache_hits: self.cache.hits(),
            disk_scans: self.disk_scans,
            false_positives: self.false_positives,
            table_bytes: self.table.size_in_bytes(),
        }
    }

    /// Interner options
    pub fn options(&self) -> &InternerOptions {
        &self.options
    }

    /// Iterate the disk table's entries in index order
    pub fn entries(&mut self) -> SstResult<TableIter> {
        self.table.iter()
    }

    /// Write the complete `sharedStrings.xml` part into `out`.
    ///
    /// The header carries the reference count and unique count, followed by
    /// every `<si>` item in index order.
    pub fn finalize_and_write<W: Write + ?Sized>(&mut self, out: &mut W) -> SstResult<()> {
        self.table.commit()?;
        write!(
            out,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "\n",
                r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#
            ),
            self.references, self.unique
        )
        .context("write shared strings header")?;
        let bytes = self.output.copy_to(out)?;
        out.write_all(b"</sst>")
            .context("write shared strings footer")?;

        let stats = self.stats();
        info!(
            "shared strings written: {} unique of {} references ({} bytes), {} inline, {} disk scans, {} cache hits, {} filter rebuilds",
            stats.unique_count,
            stats.total_references,
            bytes,
            stats.inline_values,
            stats.disk_scans,
            stats.cache_hits,
            stats.filter_rebuilds
        );
        Ok(())
    }

    /// Commit the table and delete both temp files
    pub fn close(self) -> SstResult<()> {
        self.table.close()?;
        self.output.close()
    }
}
