//! Tic-tac-toe game definition for the engine.

use crate::action::{TicTacToeMove, click_cell};
use crate::rules;
use crate::types::Board;
use boardwire_engine::{Ctx, Game, GameOver, MoveOutcome, PlayerId};

/// Name clients use to address the game.
pub const GAME_NAME: &str = "tic-tac-toe";

/// Tic-tac-toe: two players, one move per turn.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl Game for TicTacToe {
    type State = Board;
    type Move = TicTacToeMove;

    fn name(&self) -> &'static str {
        GAME_NAME
    }

    fn setup(&self, _ctx: &Ctx) -> Board {
        Board::new()
    }

    fn apply(&self, board: &mut Board, _ctx: &Ctx, player: &PlayerId, mv: &TicTacToeMove) -> MoveOutcome {
        match *mv {
            TicTacToeMove::ClickCell(id) => click_cell(board, id, player),
        }
    }

    fn end_if(&self, board: &Board, _ctx: &Ctx) -> Option<GameOver> {
        rules::outcome(board)
    }
}
