//! Errors returned when the engine refuses an action.

use crate::types::PlayerId;

/// Reason a move or action was refused. The match state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The match already has an outcome.
    #[display("Game is already over")]
    GameOver,

    /// The sender holds no seat (spectators cannot move).
    #[display("Player {} is not seated in this match", _0)]
    UnknownPlayer(PlayerId),

    /// Another player holds the turn.
    #[display("Not {}'s turn, waiting for player {}", _0, _1)]
    NotYourTurn(PlayerId, PlayerId),

    /// The game's move rule rejected the move.
    #[display("Invalid move")]
    InvalidMove,

    /// The payload does not describe a move of this game.
    #[display("Malformed move: {}", _0)]
    MalformedMove(String),
}

impl std::error::Error for ActionError {}
