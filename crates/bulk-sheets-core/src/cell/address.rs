//! Cell reference formatting

use crate::MAX_COLS;

/// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn column_to_letters(col: u16) -> String {
    let mut result = String::new();
    let mut n = col as u32 + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// Reusable scratch state for producing A1-style cell references.
///
/// Column letters are computed once for the sheet width and the reference
/// is assembled in a buffer owned by the caller, so a serializer can
/// format millions of references without per-cell allocation.
#[derive(Debug, Default)]
pub struct CellRefBuffer {
    letters: Vec<String>,
    buf: String,
    digits: Vec<u8>,
}

impl CellRefBuffer {
    /// Create a buffer sized for `width` columns
    pub fn new(width: usize) -> Self {
        let mut refs = Self::default();
        refs.ensure_width(width);
        refs
    }

    /// Grow the precomputed column letters to cover `width` columns
    pub fn ensure_width(&mut self, width: usize) {
        let width = width.min(MAX_COLS as usize);
        while self.letters.len() < width {
            let col = self.letters.len() as u16;
            self.letters.push(column_to_letters(col));
        }
    }

    /// Letters for a column (computed on demand past the precomputed width)
    pub fn letters(&mut self, col: u16) -> &str {
        self.ensure_width(col as usize + 1);
        &self.letters[col as usize]
    }

    /// Format a 0-based (row, col) pair as an A1 reference
    pub fn format(&mut self, row: u32, col: u16) -> &str {
        self.ensure_width(col as usize + 1);
        self.buf.clear();
        self.buf.push_str(&self.letters[col as usize]);

        // Excel rows are 1-based
        let mut n = row as u64 + 1;
        self.digits.clear();
        while n > 0 {
            self.digits.push(b'0' + (n % 10) as u8);
            n /= 10;
        }
        for &d in self.digits.iter().rev() {
            self.buf.push(d as char);
        }

        &self.buf
    }
}
