use super::{AppError, GridState};
use crate::color::{BLACK, GridColors, WHITE};
use crate::font::FontError;
use crate::grid::Grid;
use crate::input::{EditOutcome, InputCommand};

fn state() -> GridState {
    let mut grid = Grid::new(3, 5);
    grid.take_dirty();
    GridState::new(grid, GridColors::default())
}

#[test]
fn text_color_setter_marks_dirty() {
    let mut state = state();
    let red = [1.0, 0.0, 0.0, 1.0];
    state.set_text_color(red);
    assert_eq!(state.colors().text, red);
    assert_eq!(state.colors().background, BLACK);
    assert!(state.grid().is_dirty());
}

#[test]
fn background_color_setter_marks_dirty() {
    let mut state = state();
    state.set_background_color(WHITE);
    assert_eq!(state.colors().background, WHITE);
    assert!(state.grid_mut().take_dirty());
    assert!(!state.grid().is_dirty());
}

#[test]
fn apply_routes_to_grid() {
    let mut state = state();
    assert_eq!(
        state.apply(InputCommand::AppendChar('q')),
        EditOutcome::Continue
    );
    assert_eq!(state.grid().row_text(0), "q");
    assert_eq!(state.apply(InputCommand::Close), EditOutcome::Close);
}

#[test]
fn font_errors_keep_their_message() {
    let err = AppError::from(FontError::NotFound {
        family: "Nope".to_owned(),
    });
    assert_eq!(err.to_string(), "font family \"Nope\" not found");
}
