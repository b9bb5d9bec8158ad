//! Key bindings.

use crossterm::event::KeyCode;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Claim a cell by index (0-8).
    Click(usize),
    /// Claim the cell under the cursor.
    ClickCursor,
    /// Move the cursor by rows and columns.
    MoveCursor(isize, isize),
    /// Focus the next pane.
    NextPane,
    /// Start the match over.
    Reset,
    /// Leave the client.
    Quit,
}

/// Maps a key to an action. Unbound keys return `None`.
pub fn action_for(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| Action::Click(d as usize - 1)),
        KeyCode::Up => Some(Action::MoveCursor(-1, 0)),
        KeyCode::Down => Some(Action::MoveCursor(1, 0)),
        KeyCode::Left => Some(Action::MoveCursor(0, -1)),
        KeyCode::Right => Some(Action::MoveCursor(0, 1)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ClickCursor),
        KeyCode::Tab => Some(Action::NextPane),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
