//! Core engine types shared by every game definition.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identifier of a seated player.
///
/// Seats are numbered `"0"`, `"1"`, ... by default, but any string works.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Creates a player id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Terminal outcome of a match.
///
/// Serialized as `{"winner": "0"}` or `"draw"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum GameOver {
    /// A player won.
    #[display("Winner: {_0}")]
    Winner(PlayerId),
    /// Nobody won.
    #[display("Draw!")]
    Draw,
}

/// Turn policy of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct TurnConfig {
    /// Accepted moves after which the turn passes automatically.
    pub move_limit: u32,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self { move_limit: 1 }
    }
}

/// Engine-owned context of a match: whose turn it is and whether it ended.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Ctx {
    /// Number of seats.
    num_players: usize,
    /// Seating order; the turn cycles through it.
    play_order: Vec<PlayerId>,
    /// Index of the current player within `play_order`.
    play_order_pos: usize,
    /// Player allowed to move.
    current_player: PlayerId,
    /// Turn number, starting at 1.
    turn: u32,
    /// Moves accepted during the current turn.
    num_moves: u32,
    /// Set once the game's termination predicate fires.
    gameover: Option<GameOver>,
}

impl Ctx {
    /// Creates the context of a fresh match with seats `"0"..n-1`.
    #[instrument]
    pub fn new(num_players: usize) -> Self {
        let play_order: Vec<PlayerId> = (0..num_players)
            .map(|seat| PlayerId::new(seat.to_string()))
            .collect();
        let current_player = play_order
            .first()
            .cloned()
            .unwrap_or_else(|| PlayerId::new("0"));
        Self {
            num_players: play_order.len(),
            play_order,
            play_order_pos: 0,
            current_player,
            turn: 1,
            num_moves: 0,
            gameover: None,
        }
    }

    /// Returns true if `player` holds a seat.
    pub fn is_seated(&self, player: &PlayerId) -> bool {
        self.play_order.contains(player)
    }

    /// Returns true once the match has an outcome.
    pub fn is_over(&self) -> bool {
        self.gameover.is_some()
    }

    pub(crate) fn record_move(&mut self) {
        self.num_moves += 1;
    }

    pub(crate) fn finish(&mut self, outcome: GameOver) {
        self.gameover = Some(outcome);
    }

    /// Passes the turn to the next seat in play order.
    pub(crate) fn end_turn(&mut self) {
        if self.play_order.is_empty() {
            return;
        }
        self.play_order_pos = (self.play_order_pos + 1) % self.play_order.len();
        self.current_player = self.play_order[self.play_order_pos].clone();
        self.turn += 1;
        self.num_moves = 0;
    }
}

/// One accepted move, as recorded in the match log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct LogEntry {
    /// Turn during which the move was made.
    pub turn: u32,
    /// Player who made it.
    pub player: PlayerId,
    /// The move payload as sent by the client.
    pub action: serde_json::Value,
}

/// Snapshot of a match as delivered to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState<S> {
    /// Match identifier.
    pub match_id: String,
    /// Name of the game definition.
    pub game: String,
    /// Game-owned state.
    pub state: S,
    /// Engine-owned context.
    pub ctx: Ctx,
    /// Accepted moves, oldest first.
    pub log: Vec<LogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seats() {
        let ctx = Ctx::new(2);
        assert_eq!(ctx.play_order(), &vec![PlayerId::from("0"), PlayerId::from("1")]);
        assert_eq!(ctx.current_player(), &PlayerId::from("0"));
        assert_eq!(*ctx.turn(), 1);
        assert!(!ctx.is_over());
    }

    #[test]
    fn test_end_turn_wraps() {
        let mut ctx = Ctx::new(2);
        ctx.end_turn();
        assert_eq!(ctx.current_player(), &PlayerId::from("1"));
        ctx.end_turn();
        assert_eq!(ctx.current_player(), &PlayerId::from("0"));
        assert_eq!(*ctx.turn(), 3);
    }

    #[test]
    fn test_gameover_wire_format() {
        let winner = serde_json::to_value(GameOver::Winner(PlayerId::from("0"))).unwrap();
        assert_eq!(winner, serde_json::json!({"winner": "0"}));
        let draw = serde_json::to_value(GameOver::Draw).unwrap();
        assert_eq!(draw, serde_json::json!("draw"));
    }

    #[test]
    fn test_gameover_display() {
        assert_eq!(GameOver::Winner(PlayerId::from("1")).to_string(), "Winner: 1");
        assert_eq!(GameOver::Draw.to_string(), "Draw!");
    }
}
