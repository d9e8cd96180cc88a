//! Key and mouse mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to game actions.
///
/// `SaveLayout` is always produced for `s`; whether saving is allowed (editor
/// mode only) is decided by whoever owns the layout file.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Tab => Some(GameAction::NextLayout),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::SaveLayout),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => Some(GameAction::Pause),
        _ => None,
    }
}

/// Map a mouse event to a selection.
///
/// Only a left-button press selects. `to_board` converts a terminal cell
/// `(column, row)` into a board position, or `None` when the cell lies outside
/// the board.
pub fn handle_mouse_event<F>(mouse: MouseEvent, to_board: F) -> Option<GameAction>
where
    F: Fn(u16, u16) -> Option<(i32, i32)>,
{
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let (x, y) = to_board(mouse.column, mouse.row)?;
            Some(GameAction::Select { x, y })
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
