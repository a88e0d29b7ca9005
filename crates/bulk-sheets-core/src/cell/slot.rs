//! Pooled cell slots

use super::CellValue;

/// A single cell slot owned by a pooled [`Row`](crate::Row).
///
/// Slots are cleared and refilled on every row-block cycle rather than
/// reallocated, so a text slot keeps its `String` buffer across cycles.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    value: CellValue,
    /// Spare text buffer kept while the slot holds a non-text value
    spare: Option<String>,
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// The cell's value
    pub fn value(&self) -> &CellValue {
        &self.value
    }

    /// Mutable access to the cell's value
    pub fn value_mut(&mut self) -> &mut CellValue {
        &mut self.value
    }

    /// Check if the cell is blank
    pub fn is_blank(&self) -> bool {
        self.value.is_blank()
    }

    /// Reset to blank, keeping any text buffer for reuse
    pub fn clear(&mut self) {
        self.park();
    }

    /// Replace the value
    pub fn set(&mut self, value: CellValue) {
        match value {
            CellValue::String(s) => self.set_string(&s),
            other => {
                self.park();
                self.value = other;
            }
        }
    }

    /// Set a text value, reusing the slot's existing buffer
    pub fn set_string(&mut self, s: &str) {
        let mut buf = match std::mem::take(&mut self.value) {
            CellValue::String(buf) => buf,
            other => {
                self.value = other;
                self.park();
                self.spare.take().unwrap_or_default()
            }
        };
        buf.clear();
        buf.push_str(s);
        self.value = CellValue::String(buf);
    }

    /// Take the value out, leaving the slot blank
    pub fn take(&mut self) -> CellValue {
        std::mem::take(&mut self.value)
    }

    /// Move a text buffer into the spare slot and blank the value
    fn park(&mut self) {
        if let CellValue::String(buf) = std::mem::take(&mut self.value) {
            self.spare = Some(buf);
        }
    }
}

impl From<CellValue> for Cell {
    fn from(value: CellValue) -> Self {
        Self { value, spare: None }
    }
}
