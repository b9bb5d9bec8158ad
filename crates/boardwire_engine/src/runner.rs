//! Type-erased matches so one server can host several games.

use crate::action::ActionError;
use crate::engine::Match;
use crate::game::Game;
use crate::types::PlayerId;
use std::sync::Arc;
use tracing::instrument;

/// A match whose moves and snapshots travel as JSON.
pub trait MatchRunner: Send + Sync {
    /// Returns the match id.
    fn match_id(&self) -> &str;

    /// Returns the game name.
    fn game_name(&self) -> &'static str;

    /// Seated players in play order.
    fn seats(&self) -> &[PlayerId];

    /// Returns true once the match has an outcome.
    fn is_over(&self) -> bool;

    /// Decodes `payload` as a move of the game and dispatches it.
    fn make_move(
        &mut self,
        player: &PlayerId,
        payload: serde_json::Value,
    ) -> Result<(), ActionError>;

    /// Starts a new game in the same match.
    fn reset(&mut self);

    /// Serializes the current snapshot.
    fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error>;
}

impl<G: Game> MatchRunner for Match<G> {
    fn match_id(&self) -> &str {
        Match::match_id(self)
    }

    fn game_name(&self) -> &'static str {
        self.game().name()
    }

    fn seats(&self) -> &[PlayerId] {
        self.ctx().play_order()
    }

    fn is_over(&self) -> bool {
        self.ctx().is_over()
    }

    fn make_move(
        &mut self,
        player: &PlayerId,
        payload: serde_json::Value,
    ) -> Result<(), ActionError> {
        let mv: G::Move = serde_json::from_value(payload)
            .map_err(|e| ActionError::MalformedMove(e.to_string()))?;
        Match::make_move(self, player, mv)
    }

    fn reset(&mut self) {
        Match::reset(self)
    }

    fn snapshot(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(Match::snapshot(self))
    }
}

/// Factory for matches of one game.
pub trait GameDefinition: Send + Sync {
    /// Name clients use to address the game.
    fn name(&self) -> &'static str;

    /// Creates a fresh match.
    fn create_match(&self, match_id: &str) -> Box<dyn MatchRunner>;
}

struct Definition<G: Game> {
    game: Arc<G>,
}

impl<G: Game> GameDefinition for Definition<G> {
    fn name(&self) -> &'static str {
        self.game.name()
    }

    fn create_match(&self, match_id: &str) -> Box<dyn MatchRunner> {
        Box::new(Match::new(Arc::clone(&self.game), match_id))
    }
}

/// Wraps a game so it can be registered alongside other games.
#[instrument(skip(game), fields(game = game.name()))]
pub fn definition<G: Game>(game: G) -> Arc<dyn GameDefinition> {
    Arc::new(Definition {
        game: Arc::new(game),
    })
}
