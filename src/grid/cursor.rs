//! Grid cursor position.

/// Write position inside a grid.
///
/// `col` may equal the grid's column count after the last cell of a row
/// has been written; the next append on that row is dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
}

impl Cursor {
    /// Cursor at (0, 0).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// `(row, col)` pair.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub(super) fn set(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }
}
