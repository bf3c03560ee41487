//! Fixed-shape character grid with cursor and dirty tracking.
//!
//! The `Grid` stores `rows x cols` characters in a single row-major buffer.
//! Its shape never changes after construction; edit operations live in the
//! `editing` submodule and never write outside the grid.

pub mod cursor;
pub mod editing;

pub use cursor::Cursor;

/// Sentinel stored in unset cells. Never rendered.
pub const EMPTY_CELL: char = '\0';

/// The 2D character grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major cell storage, `rows * cols` long.
    cells: Vec<char>,
    rows: usize,
    cols: usize,
    cursor: Cursor,
    /// Set by every mutation, cleared by the renderer.
    dirty: bool,
}

impl Grid {
    /// Create an empty grid. Both dimensions are clamped to at least 1.
    ///
    /// A fresh grid starts dirty so the first frame is always drawn.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: vec![EMPTY_CELL; rows * cols],
            rows,
            cols,
            cursor: Cursor::new(),
            dirty: true,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Character at `(row, col)`, or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// All cells of one row, or `None` when out of bounds.
    pub fn row(&self, row: usize) -> Option<&[char]> {
        let start = row.checked_mul(self.cols)?;
        self.cells.get(start..start.checked_add(self.cols)?)
    }

    /// Visible text of a row: trailing empties trimmed, interior empties as spaces.
    ///
    /// Empty for an out-of-bounds row.
    pub fn row_text(&self, row: usize) -> String {
        let cells = self.row(row).unwrap_or_default();
        let end = cells
            .iter()
            .rposition(|&c| c != EMPTY_CELL)
            .map_or(0, |i| i + 1);
        cells[..end]
            .iter()
            .map(|&c| if c == EMPTY_CELL { ' ' } else { c })
            .collect()
    }

    /// Non-empty cells in row-major order as `(row, col, char)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != EMPTY_CELL)
            .map(move |(i, &c)| (i / cols, i % cols, c))
    }

    /// Whether anything changed since the last `take_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw on the next frame (color or font change).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Return the dirty flag and reset it to clean.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}
