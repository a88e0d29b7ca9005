//! Direct-indexed cache for ASCII characters

const UNASSIGNED: i32 = -1;

/// Table of string-table indices for the 128 ASCII code points.
///
/// Single ASCII characters skip the filter, cache and disk table entirely
/// once they have been seen.
#[derive(Debug, Clone)]
pub struct AsciiFastPath {
    slots: [i32; 128],
}

impl AsciiFastPath {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            slots: [UNASSIGNED; 128],
        }
    }

    /// Index assigned to `code`, if it is ASCII and already interned
    #[inline]
    pub fn get(&self, code: u16) -> Option<i32> {
        match self.slots.get(code as usize) {
            Some(&index) if index != UNASSIGNED => Some(index),
            _ => None,
        }
    }

    /// Remember the index of an ASCII character; other code units are ignored
    #[inline]
    pub fn set(&mut self, code: u16, index: i32) {
        if let Some(slot) = self.slots.get_mut(code as usize) {
            *slot = index;
        }
    }

    /// Check if `code` is handled by this table
    #[inline]
    pub fn covers(code: u16) -> bool {
        code < 128
    }
}

impl Default for AsciiFastPath {
    fn default() -> Self {
        Self::new()
    }
}
