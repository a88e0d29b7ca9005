//! Fixed-capacity windowed row buffer
//!
//! A [`RowBlock`] sits between the step that materializes rows from a data
//! source and the step that serializes them. The producer may fill at most
//! one block before control returns to the consumer, which bounds resident
//! row and cell memory to `O(capacity)` regardless of how many rows flow
//! through the block over its lifetime.
//!
//! The cycle is:
//!
//! ```text
//! clear() -> next_row() x n (n <= capacity) -> flip() -> iterate -> clear() ...
//! ```

use crate::row::Row;
use crate::DEFAULT_ROW_BLOCK_SIZE;

/// A sliding window of pooled rows
#[derive(Debug)]
pub struct RowBlock {
    rows: Vec<Row>,
    /// Next slot to fill (write mode)
    write_pos: usize,
    /// Number of valid slots after `flip`
    read_limit: usize,
    /// Next slot to hand out (read mode)
    read_pos: usize,
    /// Rows handed to the consumer over the block's lifetime
    total_emitted: u64,
    eof: bool,
    reading: bool,
}

impl RowBlock {
    /// Create a block of `capacity` rows, each `width` cells wide
    pub fn new(capacity: usize, width: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            rows: (0..capacity).map(|_| Row::new(width)).collect(),
            write_pos: 0,
            read_limit: 0,
            read_pos: 0,
            total_emitted: 0,
            eof: false,
            reading: false,
        }
    }

    /// Create a block with the default window size
    pub fn with_default_capacity(width: usize) -> Self {
        Self::new(DEFAULT_ROW_BLOCK_SIZE, width)
    }

    /// Maximum rows per fill cycle
    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// Cells per pooled row
    pub fn width(&self) -> usize {
        self.rows.first().map(Row::width).unwrap_or(0)
    }

    /// Reset the write cursor for the next batch.
    ///
    /// Pooled rows are kept; only their per-row attributes are reset.
    pub fn clear(&mut self) {
        let used = self.write_pos.max(self.read_limit);
        for row in &mut self.rows[..used] {
            row.clear_attributes();
        }
        self.write_pos = 0;
        self.read_limit = 0;
        self.read_pos = 0;
        self.eof = false;
        self.reading = false;
    }

    /// Clear the block and zero the emitted-row counter (start of a new sheet)
    pub fn reset(&mut self) {
        self.clear();
        self.total_emitted = 0;
    }

    /// Hand out the next pooled row for filling.
    ///
    /// Calling this more than `capacity()` times between two `clear()`
    /// calls is a caller bug.
    pub fn next_row(&mut self) -> &mut Row {
        debug_assert!(!self.reading, "next_row() called on a flipped block");
        debug_assert!(
            self.write_pos < self.rows.len(),
            "row block overflow: capacity {}",
            self.rows.len()
        );
        let row = &mut self.rows[self.write_pos];
        self.write_pos += 1;
        row
    }

    /// Rows filled so far in this cycle
    pub fn filled(&self) -> usize {
        self.write_pos
    }

    /// Check if the write window is full
    pub fn is_full(&self) -> bool {
        self.write_pos >= self.rows.len()
    }

    /// Switch to read mode.
    ///
    /// Marks end-of-data when the cycle produced fewer rows than the capacity.
    pub fn flip(&mut self) -> &mut Self {
        self.read_limit = self.write_pos;
        self.read_pos = 0;
        self.total_emitted += self.write_pos as u64;
        self.eof = self.write_pos < self.rows.len();
        self.write_pos = 0;
        self.reading = true;
        self
    }

    /// Mark the current read window as the producer's last
    pub fn mark_eof(&mut self) {
        self.eof = true;
    }

    /// Check if unread rows remain (read mode)
    pub fn has_next(&self) -> bool {
        self.reading && self.read_pos < self.read_limit
    }

    /// Next unread row (read mode)
    pub fn advance(&mut self) -> Option<&Row> {
        if !self.has_next() {
            return None;
        }
        let row = &self.rows[self.read_pos];
        self.read_pos += 1;
        Some(row)
    }

    /// The valid rows of the current read window
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        let limit = if self.reading { self.read_limit } else { 0 };
        self.rows[..limit].iter()
    }

    /// Number of readable rows after `flip`
    pub fn len(&self) -> usize {
        self.read_limit
    }

    /// Check if the read window is empty
    pub fn is_empty(&self) -> bool {
        self.read_limit == 0
    }

    /// Check if the last fill cycle exhausted the producer
    pub fn is_eof(&self) -> bool {
        self.eof
    }

    /// Rows emitted across all flips since creation (or the last `reset`)
    pub fn total_emitted(&self) -> u64 {
        self.total_emitted
    }
}

impl<'a> IntoIterator for &'a RowBlock {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
