//! Draw detection logic for tic-tac-toe.

use crate::types::Board;

/// True when no cell remains empty.
///
/// A full board only counts as a draw when no triple matched first,
/// see [`super::outcome`].
pub fn is_draw(board: &Board) -> bool {
    board.empty_count() == 0
}
