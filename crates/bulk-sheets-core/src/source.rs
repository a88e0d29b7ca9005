//! Data sources
//!
//! A [`DataSource`] produces records in batches. Sources are registered with
//! a [`Workbook`](crate::Workbook), which keeps them in a [`SourceRegistry`]
//! together with the buffer of fetched-but-unwritten records. Sheets refer to
//! a source by [`SourceId`]; paginated siblings share the id, and only the
//! sheet flagged as owner releases the source when it is done.

use log::warn;

use crate::cell::CellValue;
use crate::error::{Error, Result};

/// One logical row as produced by a data source (field `i` -> column `i`)
pub type Record = Vec<CellValue>;

/// A finite, non-restartable producer of records
pub trait DataSource {
    /// Append the next batch of records to `buf`.
    ///
    /// Returns the number of records appended; 0 means the source is exhausted.
    fn fetch_more(&mut self, buf: &mut Vec<Record>) -> Result<usize>;

    /// Total number of records when the whole dataset is known up front.
    ///
    /// Sources that answer `Some` are paginated eagerly.
    fn data_size(&self) -> Option<usize> {
        None
    }

    /// Release any external resources held by the source
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory records, known up front
#[derive(Debug, Default)]
pub struct VecSource {
    records: Option<Vec<Record>>,
    len: usize,
}

impl VecSource {
    /// Create a source over `records`
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            len: records.len(),
            records: Some(records),
        }
    }
}

impl DataSource for VecSource {
    fn fetch_more(&mut self, buf: &mut Vec<Record>) -> Result<usize> {
        match self.records.take() {
            Some(mut records) => {
                let n = records.len();
                buf.append(&mut records);
                Ok(n)
            }
            None => Ok(0),
        }
    }

    fn data_size(&self) -> Option<usize> {
        Some(self.len)
    }
}

/// Incremental source pulling fixed-size batches from an iterator
pub struct IterSource<I> {
    iter: I,
    batch_size: usize,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = Record>,
{
    /// Create a source that pulls up to `batch_size` records per fetch
    pub fn new(iter: I, batch_size: usize) -> Self {
        Self {
            iter,
            batch_size: batch_size.max(1),
        }
    }
}

impl<I> DataSource for IterSource<I>
where
    I: Iterator<Item = Record>,
{
    fn fetch_more(&mut self, buf: &mut Vec<Record>) -> Result<usize> {
        let before = buf.len();
        buf.extend(self.iter.by_ref().take(self.batch_size));
        Ok(buf.len() - before)
    }
}

/// Incremental source driven by a closure
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F>
where
    F: FnMut(&mut Vec<Record>) -> Result<usize>,
{
    /// Create a source from a fetch closure (same contract as [`DataSource::fetch_more`])
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

impl<F> DataSource for FnSource<F>
where
    F: FnMut(&mut Vec<Record>) -> Result<usize>,
{
    fn fetch_more(&mut self, buf: &mut Vec<Record>) -> Result<usize> {
        (self.fetch)(buf)
    }
}

/// Handle to a registered data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub(crate) usize);

impl SourceId {
    /// Raw slot number
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A registered source plus its window of fetched records
pub(crate) struct SourceSlot {
    source: Box<dyn DataSource>,
    /// Fetched records not yet compacted away
    buffer: Vec<Record>,
    /// Logical index of `buffer[0]`
    base: usize,
    exhausted: bool,
}

impl SourceSlot {
    fn new(source: Box<dyn DataSource>) -> Self {
        Self {
            source,
            buffer: Vec::new(),
            base: 0,
            exhausted: false,
        }
    }

    pub(crate) fn data_size(&self) -> Option<usize> {
        self.source.data_size()
    }

    /// Record at logical `index`, fetching more batches as needed.
    ///
    /// Returns `None` once the source is exhausted before `index`.
    pub(crate) fn record(&mut self, index: usize) -> Result<Option<&mut Record>> {
        if index < self.base {
            return Err(Error::other(format!(
                "record {} was already released (window starts at {})",
                index, self.base
            )));
        }
        while index >= self.base + self.buffer.len() && !self.exhausted {
            if self.source.fetch_more(&mut self.buffer)? == 0 {
                self.exhausted = true;
            }
        }
        Ok(self.buffer.get_mut(index - self.base))
    }

    /// Check whether a record exists at logical `index` (may fetch)
    pub(crate) fn has_record(&mut self, index: usize) -> Result<bool> {
        Ok(self.record(index)?.is_some())
    }

    /// Free every buffered record before logical `upto`
    pub(crate) fn compact(&mut self, upto: usize) {
        if upto <= self.base {
            return;
        }
        let n = (upto - self.base).min(self.buffer.len());
        self.buffer.drain(..n);
        self.base += n;
    }

    /// Records currently held in memory
    pub(crate) fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn close(&mut self) -> Result<()> {
        self.buffer.clear();
        self.source.close()
    }
}

/// Arena of data sources shared by a workbook's sheets
#[derive(Default)]
pub struct SourceRegistry {
    slots: Vec<Option<SourceSlot>>,
}

impl SourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source and return its handle
    pub fn register(&mut self, source: Box<dyn DataSource>) -> SourceId {
        let id = SourceId(self.slots.len());
        self.slots.push(Some(SourceSlot::new(source)));
        id
    }

    /// Check if a source is still registered
    pub fn contains(&self, id: SourceId) -> bool {
        matches!(self.slots.get(id.0), Some(Some(_)))
    }

    /// Number of sources not yet released
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Reported size of a source, if it knows it up front
    pub fn data_size(&self, id: SourceId) -> Result<Option<usize>> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .map(SourceSlot::data_size)
            .ok_or(Error::UnknownSource(id.0))
    }

    pub(crate) fn slot_mut(&mut self, id: SourceId) -> Result<&mut SourceSlot> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::UnknownSource(id.0))
    }

    /// Close and remove a source
    pub fn release(&mut self, id: SourceId) -> Result<()> {
        let mut slot = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(Error::UnknownSource(id.0))?;
        slot.close()
    }
}

impl std::fmt::Debug for SourceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceRegistry")
            .field("slots", &self.slots.len())
            .field("live", &self.live_count())
            .finish()
    }
}

impl Drop for SourceRegistry {
    fn drop(&mut self) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            if let Some(mut slot) = slot.take() {
                if let Err(e) = slot.close() {
                    warn!("failed to close data source #{}: {}", i, e);
                }
            }
        }
    }
}
