//! The game-definition contract.
//!
//! A game is a reducer: the engine owns turn order and termination,
//! the game supplies the initial state, the moves and the end predicate.

use crate::types::{Ctx, GameOver, PlayerId, TurnConfig};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Result of applying a move to a game state.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was accepted and the state updated.
    Applied,
    /// The move was rejected; the engine discards any state changes.
    Invalid,
}

/// A game definition driven by [`crate::Match`].
pub trait Game: Send + Sync + 'static {
    /// Game-owned state, visible to every client.
    type State: Clone + Debug + Serialize + Send + Sync + 'static;

    /// Moves a player can make. Deserialized from client payloads.
    type Move: Clone + Debug + Serialize + DeserializeOwned + Send + 'static;

    /// Name clients use to address the game.
    fn name(&self) -> &'static str;

    /// Number of seats.
    fn num_players(&self) -> usize {
        2
    }

    /// Turn policy.
    fn turn(&self) -> TurnConfig {
        TurnConfig::default()
    }

    /// Builds the initial state.
    fn setup(&self, ctx: &Ctx) -> Self::State;

    /// Applies `mv` for `player`.
    ///
    /// Turn ownership has already been checked by the engine.
    fn apply(
        &self,
        state: &mut Self::State,
        ctx: &Ctx,
        player: &PlayerId,
        mv: &Self::Move,
    ) -> MoveOutcome;

    /// Evaluated after every accepted move.
    fn end_if(&self, state: &Self::State, ctx: &Ctx) -> Option<GameOver>;
}
