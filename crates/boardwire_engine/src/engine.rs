//! Match reducer: dispatches moves and manages turns.

use crate::action::ActionError;
use crate::game::{Game, MoveOutcome};
use crate::types::{Ctx, LogEntry, MatchState, PlayerId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A running match of game `G`.
#[derive(Debug)]
pub struct Match<G: Game> {
    game: Arc<G>,
    match_id: String,
    state: G::State,
    ctx: Ctx,
    log: Vec<LogEntry>,
}

impl<G: Game> Clone for Match<G> {
    fn clone(&self) -> Self {
        Self {
            game: Arc::clone(&self.game),
            match_id: self.match_id.clone(),
            state: self.state.clone(),
            ctx: self.ctx.clone(),
            log: self.log.clone(),
        }
    }
}

impl<G: Game> Match<G> {
    /// Creates a match and runs the game's setup.
    #[instrument(skip(game, match_id), fields(game = game.name(), match_id = %match_id.as_ref()))]
    pub fn new(game: Arc<G>, match_id: impl AsRef<str>) -> Self {
        let ctx = Ctx::new(game.num_players());
        let state = game.setup(&ctx);
        info!("Match created");
        Self {
            game,
            match_id: match_id.as_ref().to_string(),
            state,
            ctx,
            log: Vec::new(),
        }
    }

    /// Returns the match id.
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    /// Returns the game definition.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Returns the game-owned state.
    pub fn state(&self) -> &G::State {
        &self.state
    }

    /// Returns the engine context.
    pub fn ctx(&self) -> &Ctx {
        &self.ctx
    }

    /// Returns accepted moves, oldest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Dispatches a move for `player`.
    ///
    /// The move rule runs against a copy of the state, so a rejected move
    /// never leaks partial changes.
    #[instrument(skip(self), fields(match_id = %self.match_id, turn = self.ctx.turn()))]
    pub fn make_move(&mut self, player: &PlayerId, mv: G::Move) -> Result<(), ActionError> {
        if self.ctx.is_over() {
            debug!("Move after game over");
            return Err(ActionError::GameOver);
        }

        if !self.ctx.is_seated(player) {
            warn!(%player, "Move from unseated player");
            return Err(ActionError::UnknownPlayer(player.clone()));
        }

        if self.ctx.current_player() != player {
            warn!(
                %player,
                current = %self.ctx.current_player(),
                "Player tried to move out of turn"
            );
            return Err(ActionError::NotYourTurn(
                player.clone(),
                self.ctx.current_player().clone(),
            ));
        }

        let mut next = self.state.clone();
        match self.game.apply(&mut next, &self.ctx, player, &mv) {
            MoveOutcome::Invalid => {
                debug!(%player, ?mv, "Move rejected by game rule");
                return Err(ActionError::InvalidMove);
            }
            MoveOutcome::Applied => {}
        }

        self.state = next;
        let action = serde_json::to_value(&mv).unwrap_or(serde_json::Value::Null);
        self.log
            .push(LogEntry::new(*self.ctx.turn(), player.clone(), action));
        self.ctx.record_move();

        if let Some(outcome) = self.game.end_if(&self.state, &self.ctx) {
            info!(%outcome, "Match finished");
            self.ctx.finish(outcome);
            return Ok(());
        }

        if *self.ctx.num_moves() >= self.game.turn().move_limit {
            self.ctx.end_turn();
            debug!(next = %self.ctx.current_player(), "Turn passed");
        }

        Ok(())
    }

    /// Starts a new game in the same match.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub fn reset(&mut self) {
        self.ctx = Ctx::new(self.game.num_players());
        self.state = self.game.setup(&self.ctx);
        self.log.clear();
        info!("Match reset");
    }

    /// Returns a client-facing snapshot.
    pub fn snapshot(&self) -> MatchState<G::State> {
        MatchState {
            match_id: self.match_id.clone(),
            game: self.game.name().to_string(),
            state: self.state.clone(),
            ctx: self.ctx.clone(),
            log: self.log.clone(),
        }
    }
}
