//! Moves of tic-tac-toe.

use crate::types::Board;
use boardwire_engine::{MoveOutcome, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A tic-tac-toe move.
///
/// On the wire: `{"move": "clickCell", "args": 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "move", content = "args", rename_all = "camelCase")]
pub enum TicTacToeMove {
    /// Claim the cell with the given index (0-8).
    ClickCell(usize),
}

/// Claims cell `id` for `player`.
///
/// Occupied or nonexistent cells reject the move and leave the board alone.
/// Turn order is not checked here.
#[instrument(skip(board))]
pub fn click_cell(board: &mut Board, id: usize, player: &PlayerId) -> MoveOutcome {
    if !board.is_empty(id) {
        debug!(id, occupant = ?board.get(id), "Cell unavailable");
        return MoveOutcome::Invalid;
    }
    board.claim(id, player.clone());
    MoveOutcome::Applied
}
