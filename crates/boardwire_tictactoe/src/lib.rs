//! Tic-tac-toe rules for the boardwire engine.
//!
//! The whole game is a board of 9 cells, one move (`clickCell`) and a
//! termination predicate. Turn order, rejection handling and state sync
//! are the engine's job.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod position;
pub mod rules;
mod types;

pub use action::{TicTacToeMove, click_cell};
pub use game::{GAME_NAME, TicTacToe};
pub use position::Position;
pub use types::{Board, CELL_COUNT, Cell};
