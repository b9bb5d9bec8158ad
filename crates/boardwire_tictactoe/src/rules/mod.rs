//! Game rules for tic-tac-toe.
//!
//! Pure functions over the board. Victory is checked before the draw,
//! so the two outcomes never overlap.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{LINES, is_victory, winner};

use crate::types::Board;
use boardwire_engine::GameOver;
use tracing::instrument;

/// Terminal outcome of the board, if any.
#[instrument(skip(board))]
pub fn outcome(board: &Board) -> Option<GameOver> {
    if let Some(player) = winner(board) {
        return Some(GameOver::Winner(player.clone()));
    }
    if is_draw(board) {
        return Some(GameOver::Draw);
    }
    None
}
