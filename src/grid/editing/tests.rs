use crate::grid::{EMPTY_CELL, Grid};

/// Grid with `text` typed in through `append_char`.
fn typed(rows: usize, cols: usize, text: &str) -> Grid {
    let mut grid = Grid::new(rows, cols);
    for ch in text.chars() {
        grid.append_char(ch);
    }
    grid
}

// --- set_cell ---

#[test]
fn set_cell_writes_and_marks_dirty() {
    let mut grid = Grid::new(2, 2);
    grid.take_dirty();
    grid.set_cell(1, 1, 'x');
    assert_eq!(grid.cell(1, 1), Some('x'));
    assert!(grid.is_dirty());
}

#[test]
fn set_cell_out_of_bounds_is_noop() {
    let mut grid = Grid::new(2, 2);
    grid.take_dirty();
    let before = grid.clone();
    grid.set_cell(2, 0, 'x');
    grid.set_cell(0, 2, 'x');
    grid.set_cell(usize::MAX, usize::MAX, 'x');
    assert_eq!(grid, before);
    assert!(!grid.is_dirty());
}

#[test]
fn set_cell_does_not_move_cursor() {
    let mut grid = Grid::new(2, 2);
    grid.set_cell(1, 1, 'x');
    assert_eq!(grid.cursor().position(), (0, 0));
}

#[test]
fn set_cell_with_sentinel_clears() {
    let mut grid = Grid::new(1, 1);
    grid.set_cell(0, 0, 'x');
    grid.set_cell(0, 0, EMPTY_CELL);
    assert!(grid.occupied().next().is_none());
}

// --- set_text ---

#[test]
fn set_text_scenario_hi_bye() {
    let mut grid = Grid::new(5, 10);
    grid.set_text("Hi\nBye");
    assert_eq!(&grid.row(0).expect("row 0")[..2], &['H', 'i']);
    assert!(grid.row(0).expect("row 0")[2..].iter().all(|&c| c == EMPTY_CELL));
    assert_eq!(&grid.row(1).expect("row 1")[..3], &['B', 'y', 'e']);
    assert!(grid.row(1).expect("row 1")[3..].iter().all(|&c| c == EMPTY_CELL));
    assert_eq!(grid.cursor().position(), (1, 3));
}

#[test]
fn set_text_empty_resets_cursor() {
    let mut grid = typed(3, 5, "abc");
    grid.set_text("");
    assert_eq!(grid.cursor().position(), (0, 0));
    assert!(grid.occupied().next().is_none());
}

#[test]
fn set_text_truncates_long_lines() {
    let mut grid = Grid::new(2, 4);
    grid.set_text("abcdefg");
    assert_eq!(grid.row_text(0), "abcd");
    assert_eq!(grid.cursor().position(), (0, 4));
}

#[test]
fn set_text_discards_extra_lines() {
    let mut grid = Grid::new(2, 4);
    grid.set_text("one\ntwo\nthree");
    assert_eq!(grid.row_text(0), "one");
    assert_eq!(grid.row_text(1), "two");
    assert_eq!(grid.cursor().position(), (1, 3));
}

#[test]
fn set_text_trailing_newline_lands_on_next_row() {
    let mut grid = Grid::new(3, 4);
    grid.set_text("ab\n");
    assert_eq!(grid.cursor().position(), (1, 0));
}

#[test]
fn set_text_strips_carriage_return() {
    let mut grid = Grid::new(2, 4);
    grid.set_text("ab\r\ncd");
    assert_eq!(grid.row_text(0), "ab");
    assert_eq!(grid.row_text(1), "cd");
}

#[test]
fn set_text_counts_chars_not_bytes() {
    let mut grid = Grid::new(1, 10);
    grid.set_text("héllo");
    assert_eq!(grid.cursor().position(), (0, 5));
    assert_eq!(grid.row_text(0), "héllo");
}

#[test]
fn set_text_keeps_cells_it_does_not_cover() {
    let mut grid = Grid::new(2, 6);
    grid.set_text("longer\nlines");
    grid.set_text("hi");
    assert_eq!(grid.row_text(0), "hinger");
    assert_eq!(grid.row_text(1), "lines");
    assert_eq!(grid.cursor().position(), (0, 2));
}

#[test]
fn set_text_twice_is_idempotent() {
    let mut grid = Grid::new(4, 8);
    grid.set_text("alpha\nbeta\ngamma");
    let first = grid.clone();
    grid.set_text("alpha\nbeta\ngamma");
    assert_eq!(grid, first);
    assert_eq!(grid.cursor().position(), (2, 5));
}

// --- append_char ---

#[test]
fn append_char_writes_and_advances() {
    let grid = typed(2, 4, "ab");
    assert_eq!(grid.row_text(0), "ab");
    assert_eq!(grid.cursor().position(), (0, 2));
}

#[test]
fn append_char_at_last_column_then_drops() {
    let mut grid = typed(2, 3, "ab");
    assert_eq!(grid.cursor().col(), 2);

    grid.append_char('c');
    assert_eq!(grid.row_text(0), "abc");
    assert_eq!(grid.cursor().position(), (0, 3));

    grid.take_dirty();
    let before = grid.clone();
    grid.append_char('d');
    assert_eq!(grid, before);
    assert_eq!(grid.row_text(1), "");
    assert!(!grid.is_dirty());
}

// --- new_line ---

#[test]
fn new_line_advances_row_and_resets_col() {
    let mut grid = typed(3, 4, "ab");
    grid.new_line();
    assert_eq!(grid.cursor().position(), (1, 0));
    grid.append_char('c');
    assert_eq!(grid.row_text(1), "c");
}

#[test]
fn new_line_on_last_row_is_noop() {
    let mut grid = Grid::new(2, 4);
    grid.new_line();
    grid.append_char('x');
    grid.take_dirty();
    grid.new_line();
    assert_eq!(grid.cursor().position(), (1, 1));
    assert!(!grid.is_dirty());
}

// --- backspace ---

#[test]
fn backspace_clears_previous_cell() {
    let mut grid = typed(1, 4, "abc");
    grid.backspace();
    assert_eq!(grid.row_text(0), "ab");
    assert_eq!(grid.cursor().position(), (0, 2));
}

#[test]
fn backspace_at_origin_is_noop() {
    let mut grid = Grid::new(2, 2);
    grid.take_dirty();
    grid.backspace();
    assert_eq!(grid.cursor().position(), (0, 0));
    assert!(!grid.is_dirty());
}

#[test]
fn backspace_scenario_crosses_row_after_clearing() {
    let mut grid = Grid::new(5, 10);
    grid.set_text("Hi\nBye");
    for _ in 0..3 {
        grid.backspace();
    }
    assert!(grid.row(1).expect("row 1").iter().all(|&c| c == EMPTY_CELL));
    assert_eq!(grid.cursor().position(), (1, 0));

    grid.backspace();
    assert_eq!(grid.cursor().position(), (0, 2));
    assert_eq!(grid.row_text(0), "Hi");
}

#[test]
fn backspace_skips_trailing_empties_of_previous_row() {
    let mut grid = Grid::new(3, 10);
    grid.set_cell(0, 0, 'a');
    grid.set_cell(0, 1, 'b');
    grid.new_line();
    assert_eq!(grid.cursor().position(), (1, 0));

    grid.backspace();
    assert_eq!(grid.cursor().position(), (0, 2));
    assert_ne!(grid.cursor().position(), (0, 9));
}

#[test]
fn backspace_into_empty_row_lands_at_column_zero() {
    let mut grid = Grid::new(3, 5);
    grid.new_line();
    grid.backspace();
    assert_eq!(grid.cursor().position(), (0, 0));
}

#[test]
fn backspace_into_full_row_lands_past_last_cell() {
    let mut grid = typed(2, 3, "abc");
    grid.new_line();
    grid.backspace();
    assert_eq!(grid.cursor().position(), (0, 3));
    // Nothing was cleared on the way up.
    assert_eq!(grid.row_text(0), "abc");

    // The next backspace removes the last character.
    grid.backspace();
    assert_eq!(grid.row_text(0), "ab");
}

#[test]
fn backspace_respects_interior_gaps() {
    let mut grid = Grid::new(2, 6);
    grid.set_cell(0, 0, 'a');
    grid.set_cell(0, 3, 'b');
    grid.new_line();
    grid.backspace();
    assert_eq!(grid.cursor().position(), (0, 4));
}

// --- clear ---

#[test]
fn clear_empties_and_homes_cursor() {
    let mut grid = typed(2, 4, "abcd");
    grid.take_dirty();
    grid.clear();
    assert!(grid.occupied().next().is_none());
    assert_eq!(grid.cursor().position(), (0, 0));
    assert!(grid.is_dirty());
}
