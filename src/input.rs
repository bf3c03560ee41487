//! Keyboard input → grid edit commands.

use winit::keyboard::{Key, NamedKey};

use crate::grid::Grid;

/// One edit requested by the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    AppendChar(char),
    NewLine,
    Backspace,
    /// Close the window.
    Close,
}

/// Whether the event loop should keep running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Continue,
    Close,
}

/// Translate a pressed key into a command.
///
/// `text` is the text the platform produced for the key press, if any. For
/// character keys the first non-control character of `text` (or of the
/// logical key when there is no text) is appended. Keys that only produce
/// control characters, like Ctrl+C, map to nothing.
pub fn command_for_key(key: &Key, text: Option<&str>) -> Option<InputCommand> {
    match key {
        Key::Named(NamedKey::Enter) => Some(InputCommand::NewLine),
        Key::Named(NamedKey::Backspace) => Some(InputCommand::Backspace),
        Key::Named(NamedKey::Escape) => Some(InputCommand::Close),
        Key::Named(NamedKey::Space) => Some(InputCommand::AppendChar(' ')),
        Key::Character(logical) => text
            .unwrap_or(logical.as_str())
            .chars()
            .find(|c| !c.is_control())
            .map(InputCommand::AppendChar),
        _ => None,
    }
}

impl InputCommand {
    /// Apply this command to `grid`.
    pub fn apply(self, grid: &mut Grid) -> EditOutcome {
        match self {
            Self::AppendChar(ch) => grid.append_char(ch),
            Self::NewLine => grid.new_line(),
            Self::Backspace => grid.backspace(),
            Self::Close => return EditOutcome::Close,
        }
        EditOutcome::Continue
    }
}
