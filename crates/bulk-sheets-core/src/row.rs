//! Row types

use crate::cell::{Cell, CellValue};

/// A pooled row: a fixed-width sequence of cell slots plus row metadata.
///
/// Rows live inside a [`RowBlock`](crate::RowBlock) and are reused on every
/// fill cycle. The cell vector keeps its length for the whole cycle; only
/// [`Row::resize`] changes it.
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// Row index (0-based, relative to the physical sheet)
    pub index: u32,
    /// Custom height (None = default)
    pub height: Option<f64>,
    /// Row is hidden
    pub hidden: bool,
    /// Outline/grouping level (0-7)
    pub outline_level: u8,
    cells: Vec<Cell>,
}

impl Row {
    /// Create a new row with `width` blank cells
    pub fn new(width: usize) -> Self {
        let mut row = Self::default();
        row.resize(width);
        row
    }

    /// Number of cell slots
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Change the number of cell slots, keeping existing ones
    pub fn resize(&mut self, width: usize) {
        self.cells.resize_with(width, Cell::new);
    }

    /// Reset height/hidden/outline. Cells are left as they are.
    pub fn clear_attributes(&mut self) {
        self.height = None;
        self.hidden = false;
        self.outline_level = 0;
    }

    /// Blank every cell, keeping the slots and their buffers
    pub fn clear_cells(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Cells in column order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable cells in column order
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Get a cell by column index
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Get a mutable cell by column index
    pub fn cell_mut(&mut self, col: usize) -> Option<&mut Cell> {
        self.cells.get_mut(col)
    }

    /// Fill the row from a record, moving values into the slots.
    ///
    /// Fields past the row width are dropped; missing fields leave blank cells.
    pub fn fill_from(&mut self, record: &mut [CellValue]) {
        let mut fields = record.iter_mut();
        for cell in &mut self.cells {
            match fields.next() {
                Some(value) => cell.set(std::mem::take(value)),
                None => cell.clear(),
            }
        }
    }

    /// Check if this row has any custom settings
    pub fn has_custom_settings(&self) -> bool {
        self.height.is_some() || self.hidden || self.outline_level > 0
    }

    /// Check if every cell is blank
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }
}
