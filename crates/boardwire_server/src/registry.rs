//! Match registry and the per-match tasks that own game state.

use crate::error::{LobbyError, MatchError};
use boardwire_engine::{ActionError, GameDefinition, MatchRunner, PlayerId};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc, oneshot, watch};
use tracing::{Instrument, debug, error, info, info_span, instrument};

enum MatchCommand {
    Move {
        player: PlayerId,
        payload: Value,
        reply: oneshot::Sender<Result<(), ActionError>>,
    },
    Reset {
        reply: oneshot::Sender<()>,
    },
}

/// Cheap handle to a running match.
///
/// All mutations go through the match task, which applies them in arrival
/// order and publishes the resulting snapshot.
#[derive(Clone)]
pub struct MatchHandle {
    game: &'static str,
    match_id: Arc<str>,
    seats: Arc<[PlayerId]>,
    command_tx: mpsc::Sender<MatchCommand>,
    snapshot_rx: watch::Receiver<Value>,
}

impl std::fmt::Debug for MatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchHandle")
            .field("game", &self.game)
            .field("match_id", &self.match_id)
            .finish_non_exhaustive()
    }
}

impl MatchHandle {
    /// Game this match plays.
    pub fn game(&self) -> &'static str {
        self.game
    }

    /// Match id.
    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    /// Returns true if `player` holds a seat in this match.
    pub fn is_seated(&self, player: &PlayerId) -> bool {
        self.seats.contains(player)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Value {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver for snapshot updates. The current snapshot counts as seen.
    pub fn subscribe(&self) -> watch::Receiver<Value> {
        let mut rx = self.snapshot_rx.clone();
        rx.mark_unchanged();
        rx
    }

    /// Submits a move and waits for the engine's verdict.
    #[instrument(skip(self, payload), fields(match_id = %self.match_id, player = %player))]
    pub async fn make_move(&self, player: PlayerId, payload: Value) -> Result<(), MatchError> {
        let (reply, verdict) = oneshot::channel();
        self.command_tx
            .send(MatchCommand::Move {
                player,
                payload,
                reply,
            })
            .await
            .map_err(|_| MatchError::Closed)?;
        verdict.await.map_err(|_| MatchError::Closed)??;
        Ok(())
    }

    /// Starts a new game in this match.
    #[instrument(skip(self), fields(match_id = %self.match_id))]
    pub async fn reset(&self) -> Result<(), MatchError> {
        let (reply, done) = oneshot::channel();
        self.command_tx
            .send(MatchCommand::Reset { reply })
            .await
            .map_err(|_| MatchError::Closed)?;
        done.await.map_err(|_| MatchError::Closed)
    }
}

fn publish(runner: &dyn MatchRunner, snapshot_tx: &watch::Sender<Value>) {
    match runner.snapshot() {
        Ok(snapshot) => {
            snapshot_tx.send_replace(snapshot);
        }
        Err(e) => error!(error = %e, "Failed to serialize snapshot"),
    }
}

async fn match_task(
    mut runner: Box<dyn MatchRunner>,
    mut command_rx: mpsc::Receiver<MatchCommand>,
    snapshot_tx: watch::Sender<Value>,
) {
    while let Some(command) = command_rx.recv().await {
        match command {
            MatchCommand::Move {
                player,
                payload,
                reply,
            } => {
                let result = runner.make_move(&player, payload);
                if result.is_ok() {
                    publish(runner.as_ref(), &snapshot_tx);
                }
                let _ = reply.send(result);
            }
            MatchCommand::Reset { reply } => {
                runner.reset();
                publish(runner.as_ref(), &snapshot_tx);
                let _ = reply.send(());
            }
        }
    }
    debug!("Command channel closed; match task exiting");
}

/// All games this server hosts and their running matches.
pub struct MatchRegistry {
    games: HashMap<&'static str, Arc<dyn GameDefinition>>,
    matches: RwLock<HashMap<&'static str, HashMap<String, MatchHandle>>>,
    command_capacity: usize,
}

impl MatchRegistry {
    /// Creates a registry hosting `games`.
    pub fn new(
        games: impl IntoIterator<Item = Arc<dyn GameDefinition>>,
        command_capacity: usize,
    ) -> Self {
        let games: HashMap<_, _> = games.into_iter().map(|g| (g.name(), g)).collect();
        info!(games = ?games.keys().collect::<Vec<_>>(), "Match registry created");
        Self {
            games,
            matches: RwLock::new(HashMap::new()),
            command_capacity: command_capacity.max(1),
        }
    }

    /// Names of the hosted games, sorted.
    pub fn game_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.games.keys().copied().collect();
        names.sort_unstable();
        names
    }

    fn definition(&self, game: &str) -> Result<&Arc<dyn GameDefinition>, LobbyError> {
        self.games
            .get(game)
            .ok_or_else(|| LobbyError::UnknownGame(game.to_string()))
    }

    fn spawn_match(&self, definition: &dyn GameDefinition, match_id: &str) -> MatchHandle {
        let runner = definition.create_match(match_id);
        let seats: Arc<[PlayerId]> = runner.seats().into();
        let initial = runner.snapshot().unwrap_or_else(|e| {
            error!(error = %e, "Failed to serialize initial snapshot");
            Value::Null
        });

        let (command_tx, command_rx) = mpsc::channel(self.command_capacity);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        let span = info_span!("match", game = definition.name(), match_id);
        tokio::spawn(match_task(runner, command_rx, snapshot_tx).instrument(span));

        MatchHandle {
            game: definition.name(),
            match_id: Arc::from(match_id),
            seats,
            command_tx,
            snapshot_rx,
        }
    }

    /// Creates a match, failing if the id is taken.
    #[instrument(skip(self))]
    pub async fn create_match(&self, game: &str, match_id: &str) -> Result<MatchHandle, LobbyError> {
        let definition = self.definition(game)?;
        let match_id = match_id.trim();
        if match_id.is_empty() {
            return Err(LobbyError::EmptyMatchId);
        }

        let mut matches = self.matches.write().await;
        let by_id = matches.entry(definition.name()).or_default();
        if by_id.contains_key(match_id) {
            return Err(LobbyError::AlreadyExists(match_id.to_string()));
        }

        let handle = self.spawn_match(definition.as_ref(), match_id);
        by_id.insert(match_id.to_string(), handle.clone());
        info!("Match created");
        Ok(handle)
    }

    /// Looks up a running match.
    #[instrument(skip(self))]
    pub async fn get_match(&self, game: &str, match_id: &str) -> Result<MatchHandle, LobbyError> {
        let definition = self.definition(game)?;
        let match_id = match_id.trim();
        self.matches
            .read()
            .await
            .get(definition.name())
            .and_then(|by_id| by_id.get(match_id))
            .cloned()
            .ok_or_else(|| LobbyError::MatchNotFound(match_id.to_string()))
    }

    /// Returns the match, creating it on first use.
    #[instrument(skip(self))]
    pub async fn join(&self, game: &str, match_id: &str) -> Result<MatchHandle, LobbyError> {
        match self.get_match(game, match_id).await {
            Err(LobbyError::MatchNotFound(_)) => {}
            other => return other,
        }
        match self.create_match(game, match_id).await {
            // Another connection created it between the two locks.
            Err(LobbyError::AlreadyExists(_)) => self.get_match(game, match_id).await,
            other => other,
        }
    }

    /// Ids of the running matches of `game`, sorted.
    #[instrument(skip(self))]
    pub async fn list_matches(&self, game: &str) -> Result<Vec<String>, LobbyError> {
        let definition = self.definition(game)?;
        let mut ids: Vec<String> = self
            .matches
            .read()
            .await
            .get(definition.name())
            .map(|by_id| by_id.keys().cloned().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        Ok(ids)
    }
}
