//! Boardwire engine - a small reducer-style turn engine.
//!
//! Games describe their rules through the [`Game`] trait; the engine owns
//! everything around them: seating, turn order, move dispatch, rejecting
//! invalid moves without touching state, and detecting the end of the game.
//!
//! # Example
//!
//! ```
//! use boardwire_engine::{Ctx, Game, GameOver, Match, MoveOutcome, PlayerId};
//! use std::sync::Arc;
//!
//! struct FirstToThree;
//!
//! impl Game for FirstToThree {
//!     type State = u32;
//!     type Move = u32;
//!
//!     fn name(&self) -> &'static str {
//!         "first-to-three"
//!     }
//!
//!     fn setup(&self, _ctx: &Ctx) -> u32 {
//!         0
//!     }
//!
//!     fn apply(&self, state: &mut u32, _ctx: &Ctx, _player: &PlayerId, mv: &u32) -> MoveOutcome {
//!         *state += mv;
//!         MoveOutcome::Applied
//!     }
//!
//!     fn end_if(&self, state: &u32, ctx: &Ctx) -> Option<GameOver> {
//!         (*state >= 3).then(|| GameOver::Winner(ctx.current_player().clone()))
//!     }
//! }
//!
//! let mut game = Match::new(Arc::new(FirstToThree), "demo");
//! game.make_move(&PlayerId::from("0"), 1).unwrap();
//! game.make_move(&PlayerId::from("1"), 2).unwrap();
//! assert!(game.ctx().is_over());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod engine;
mod game;
mod runner;
mod types;

pub use action::ActionError;
pub use engine::Match;
pub use game::{Game, MoveOutcome};
pub use runner::{GameDefinition, MatchRunner, definition};
pub use types::{Ctx, GameOver, LogEntry, MatchState, PlayerId, TurnConfig};
