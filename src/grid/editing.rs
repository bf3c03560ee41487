//! Edit operations: text replacement, append, newline, backspace.
//!
//! None of these wrap or scroll. Writes that would land outside the grid are
//! dropped silently, since input can arrive for a shape the caller no longer
//! tracks.

use super::{Cursor, EMPTY_CELL, Grid};

impl Grid {
    /// Overwrite one cell. Out-of-bounds positions are ignored.
    ///
    /// Writing `EMPTY_CELL` clears the cell.
    pub fn set_cell(&mut self, row: usize, col: usize, ch: char) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = ch;
            self.dirty = true;
        }
    }

    /// Write `text` over the grid, one `'\n'`-separated line per row.
    ///
    /// Each line is written from column 0 and truncated at `cols`; a trailing
    /// `'\r'` on a line is dropped and lines past the last row are discarded.
    /// Cells the text does not reach keep their previous contents. The cursor
    /// ends up after the last written character of the last written line, so
    /// empty text leaves it at (0, 0).
    pub fn set_text(&mut self, text: &str) {
        let mut last = (0, 0);
        for (row, line) in text.split('\n').take(self.rows).enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let start = row * self.cols;
            let mut written = 0;
            for (slot, ch) in self.cells[start..start + self.cols]
                .iter_mut()
                .zip(line.chars())
            {
                *slot = ch;
                written += 1;
            }
            last = (row, written);
        }

        self.cursor.set(last.0, last.1);
        self.dirty = true;
    }

    /// Write `ch` at the cursor and advance one column.
    ///
    /// Dropped when the cursor is already past the last column.
    pub fn append_char(&mut self, ch: char) {
        let (row, col) = self.cursor.position();
        if col >= self.cols {
            return;
        }
        self.cells[row * self.cols + col] = ch;
        self.cursor.set(row, col + 1);
        self.dirty = true;
    }

    /// Move to column 0 of the next row. No-op on the last row.
    pub fn new_line(&mut self) {
        let row = self.cursor.row();
        if row + 1 < self.rows {
            self.cursor.set(row + 1, 0);
            self.dirty = true;
        }
    }

    /// Delete backwards.
    ///
    /// Inside a row this clears the cell left of the cursor. At column 0 it
    /// moves to the previous row and lands just after that row's last
    /// non-empty cell, clearing nothing. At (0, 0) it does nothing.
    ///
    /// The scan for the last non-empty cell starts past the end of the row,
    /// so a completely full row lands the cursor at `cols`, not `cols - 1`.
    /// The following backspace then removes the row's last character instead
    /// of its second to last.
    pub fn backspace(&mut self) {
        let (row, col) = self.cursor.position();
        if col > 0 {
            let col = col - 1;
            self.cells[row * self.cols + col] = EMPTY_CELL;
            self.cursor.set(row, col);
            self.dirty = true;
        } else if row > 0 {
            let row = row - 1;
            let start = row * self.cols;
            let col = self.cells[start..start + self.cols]
                .iter()
                .rposition(|&c| c != EMPTY_CELL)
                .map_or(0, |i| i + 1);
            self.cursor.set(row, col);
            self.dirty = true;
        } else {
            // Already at the origin.
        }
    }

    /// Empty every cell and home the cursor.
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY_CELL);
        self.cursor = Cursor::new();
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests;
