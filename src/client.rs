//! WebSocket client that follows one tic-tac-toe match.

use anyhow::{Context, Result};
use boardwire_engine::{MatchState, PlayerId};
use boardwire_server::{ClientMessage, ServerMessage, SyncRequest};
use boardwire_tictactoe::{Board, GAME_NAME, TicTacToeMove};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, instrument, warn};

/// Something the server told this client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Latest match snapshot.
    Snapshot(Box<MatchState<Board>>),
    /// Our last action was refused.
    Rejected(String),
    /// The server refused the connection or sent something unreadable.
    Error(String),
    /// The connection is gone.
    Closed,
}

/// Normalizes a server address to the WebSocket endpoint.
///
/// Accepts `host:port`, `http://host:port` or a full `ws://` URL.
pub fn ws_url(server: &str) -> String {
    let server = server.trim_end_matches('/');
    if server.starts_with("ws://") || server.starts_with("wss://") {
        return server.to_string();
    }
    let host = server
        .strip_prefix("http://")
        .or_else(|| server.strip_prefix("https://"))
        .unwrap_or(server);
    format!("ws://{}/ws", host)
}

/// Normalizes a server address to its HTTP base URL.
pub fn http_url(server: &str) -> String {
    let server = server.trim_end_matches('/');
    if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else {
        format!("http://{}", server)
    }
}

/// Translates a server message into a client event.
pub fn decode_server_message(msg: ServerMessage) -> ClientEvent {
    match msg {
        ServerMessage::Sync(snapshot) | ServerMessage::Update(snapshot) => {
            match serde_json::from_value::<MatchState<Board>>(snapshot) {
                Ok(state) => ClientEvent::Snapshot(Box::new(state)),
                Err(e) => ClientEvent::Error(format!("Unreadable snapshot: {}", e)),
            }
        }
        ServerMessage::Rejected { reason } => ClientEvent::Rejected(reason),
        ServerMessage::Error { reason } => ClientEvent::Error(reason),
    }
}

/// Connection to one match, as a player or a spectator.
///
/// Outgoing messages are queued to a writer task; incoming ones arrive on
/// the receiver returned by [`MatchClient::connect`].
#[derive(Debug, Clone)]
pub struct MatchClient {
    player: Option<PlayerId>,
    outgoing: mpsc::UnboundedSender<ClientMessage>,
}

impl MatchClient {
    /// Connects and sends the sync request.
    #[instrument(skip(server), fields(url = %ws_url(server), player = ?player))]
    pub async fn connect(
        server: &str,
        match_id: &str,
        player: Option<PlayerId>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ClientEvent>)> {
        let url = ws_url(server);
        let (socket, _) = connect_async(url.as_str())
            .await
            .with_context(|| format!("Failed to connect to {}", url))?;
        info!("Connected");

        let (mut sink, mut stream) = socket.split();

        let sync = ClientMessage::Sync(SyncRequest {
            game: GAME_NAME.to_string(),
            match_id: match_id.to_string(),
            player_id: player.clone(),
        });
        sink.send(Message::text(serde_json::to_string(&sync)?))
            .await
            .context("Failed to send sync request")?;

        let (outgoing, mut outgoing_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (events_tx, events) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(msg) = outgoing_rx.recv().await {
                let txt = match serde_json::to_string(&msg) {
                    Ok(txt) => txt,
                    Err(e) => {
                        warn!(error = %e, "Failed to serialize client message");
                        continue;
                    }
                };
                if let Err(e) = sink.send(Message::text(txt)).await {
                    warn!(error = %e, "Send failed; writer exiting");
                    break;
                }
            }
            let _ = sink.close().await;
        });

        tokio::spawn(async move {
            while let Some(frame) = stream.next().await {
                let event = match frame {
                    Ok(Message::Text(text)) => match serde_json::from_str::<ServerMessage>(&text) {
                        Ok(msg) => decode_server_message(msg),
                        Err(e) => {
                            warn!(error = %e, "Unreadable server message");
                            continue;
                        }
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => continue,
                    Err(e) => {
                        warn!(error = %e, "Connection error");
                        break;
                    }
                };
                if events_tx.send(event).is_err() {
                    debug!("Event receiver dropped; reader exiting");
                    return;
                }
            }
            let _ = events_tx.send(ClientEvent::Closed);
        });

        Ok((Self { player, outgoing }, events))
    }

    /// Seat this client plays, `None` for spectators.
    pub fn player(&self) -> Option<&PlayerId> {
        self.player.as_ref()
    }

    /// Claims a cell (0-8).
    #[instrument(skip(self))]
    pub fn click_cell(&self, cell: usize) -> Result<()> {
        let action = serde_json::to_value(TicTacToeMove::ClickCell(cell))?;
        self.send(ClientMessage::Move { action })
    }

    /// Asks the server to start the match over.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<()> {
        self.send(ClientMessage::Reset)
    }

    fn send(&self, msg: ClientMessage) -> Result<()> {
        self.outgoing
            .send(msg)
            .map_err(|_| anyhow::anyhow!("Connection closed"))
    }
}
