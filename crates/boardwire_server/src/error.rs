//! Errors raised while hosting matches.

use boardwire_engine::ActionError;

/// Lobby-level failures: finding or creating matches.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LobbyError {
    /// No game registered under this name.
    #[display("Unknown game: {}", _0)]
    UnknownGame(String),

    /// A match with this id already exists.
    #[display("Match {} already exists", _0)]
    AlreadyExists(String),

    /// No running match with this id.
    #[display("Match {} not found", _0)]
    MatchNotFound(String),

    /// Match ids must be non-empty.
    #[display("Match id is required")]
    EmptyMatchId,
}

impl std::error::Error for LobbyError {}

/// Failure of a command sent to a running match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum MatchError {
    /// The engine refused the action.
    #[display("{}", _0)]
    Action(ActionError),

    /// The match task is gone.
    #[display("Match is no longer running")]
    #[from(ignore)]
    Closed,
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::Action(e) => Some(e),
            MatchError::Closed => None,
        }
    }
}
