use super::AppState;
use crate::error::MatchError;
use crate::ids::rand_id;
use crate::protocol::{ClientMessage, ServerMessage, SyncRequest};
use crate::registry::MatchHandle;

use axum::{
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    response::IntoResponse,
};
use boardwire_engine::PlayerId;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{Instrument, debug, info, info_span, warn};

const MAX_INVALID_JSON: u32 = 10;

#[derive(Debug)]
enum NetError {
    #[allow(dead_code)]
    Ws(axum::Error),
    #[allow(dead_code)]
    Serialization(serde_json::Error),
    ClosedBeforeSync,
    SyncTimeout,
    SyncRequired,
    #[allow(dead_code)]
    Lobby(String),
    MatchClosed,
}

impl From<axum::Error> for NetError {
    fn from(e: axum::Error) -> Self {
        NetError::Ws(e)
    }
}

/// Per-connection state after a successful handshake.
struct ConnCtx {
    handle: MatchHandle,
    // None for spectators.
    player: Option<PlayerId>,
    snapshot_rx: watch::Receiver<Value>,
    invalid_json: u32,
}

enum LoopControl {
    Continue,
    Disconnect,
}

/// `GET /ws`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| {
        let conn_id = rand_id();
        let span = info_span!(
            "conn",
            conn_id,
            match_id = tracing::field::Empty,
            player_id = tracing::field::Empty
        );
        handle_socket(socket, state).instrument(span)
    })
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    let mut ctx = match bootstrap_connection(&mut socket, &state).await {
        Ok(ctx) => ctx,
        Err(NetError::ClosedBeforeSync) => {
            info!("Client disconnected before sync");
            return;
        }
        Err(e) => {
            warn!(error = ?e, "Failed to bootstrap connection");
            return;
        }
    };

    let span = tracing::Span::current();
    span.record("match_id", ctx.handle.match_id());
    if let Some(player) = &ctx.player {
        span.record("player_id", player.as_str());
    }
    info!(spectator = ctx.player.is_none(), "Client synced");

    if let Err(e) = run_client_loop(&mut socket, &mut ctx).await {
        warn!(error = ?e, "Client loop exited with error");
    }
    let _ = socket.send(Message::Close(None)).await;
    info!("Client disconnected");
}

async fn send_message(socket: &mut WebSocket, msg: &ServerMessage) -> Result<(), NetError> {
    let txt = serde_json::to_string(msg).map_err(NetError::Serialization)?;
    socket.send(Message::Text(txt.into())).await?;
    Ok(())
}

async fn send_close_with_reason(
    socket: &mut WebSocket,
    code: u16,
    reason: &str,
) -> Result<(), NetError> {
    let _ = send_message(
        socket,
        &ServerMessage::Error {
            reason: reason.to_string(),
        },
    )
    .await;
    socket
        .send(Message::Close(Some(CloseFrame {
            code,
            reason: reason.to_string().into(),
        })))
        .await?;
    Ok(())
}

async fn read_sync_request(socket: &mut WebSocket) -> Result<SyncRequest, NetError> {
    loop {
        let Some(incoming) = socket.recv().await else {
            return Err(NetError::ClosedBeforeSync);
        };

        match incoming? {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(ClientMessage::Sync(req)) => return Ok(req),
                Ok(_) => {
                    let _ = send_close_with_reason(socket, close_code::POLICY, "sync required")
                        .await;
                    return Err(NetError::SyncRequired);
                }
                Err(_) => {
                    let _ = send_close_with_reason(
                        socket,
                        close_code::POLICY,
                        "invalid sync payload",
                    )
                    .await;
                    return Err(NetError::SyncRequired);
                }
            },
            Message::Binary(_) => {
                let _ = send_close_with_reason(
                    socket,
                    close_code::UNSUPPORTED,
                    "binary messages not supported",
                )
                .await;
                return Err(NetError::SyncRequired);
            }
            Message::Ping(_) | Message::Pong(_) => {}
            Message::Close(_) => return Err(NetError::ClosedBeforeSync),
        }
    }
}

async fn bootstrap_connection(
    socket: &mut WebSocket,
    state: &AppState,
) -> Result<ConnCtx, NetError> {
    let request = match timeout(state.sync_timeout, read_sync_request(socket)).await {
        Ok(result) => result?,
        Err(_) => {
            let _ = send_close_with_reason(socket, close_code::POLICY, "sync timeout").await;
            return Err(NetError::SyncTimeout);
        }
    };

    let handle = match state
        .registry
        .join(&request.game, &request.match_id)
        .await
    {
        Ok(handle) => handle,
        Err(e) => {
            let reason = e.to_string();
            let _ = send_close_with_reason(socket, close_code::POLICY, &reason).await;
            return Err(NetError::Lobby(reason));
        }
    };

    if let Some(player) = request.player_id.as_ref().filter(|p| !handle.is_seated(p)) {
        let reason = format!("Player {} is not seated in this match", player);
        let _ = send_close_with_reason(socket, close_code::POLICY, &reason).await;
        return Err(NetError::Lobby(reason));
    }

    // Subscribe before sending the snapshot so no update slips between them.
    let mut snapshot_rx = handle.subscribe();
    let initial = snapshot_rx.borrow_and_update().clone();
    send_message(socket, &ServerMessage::Sync(initial)).await?;

    Ok(ConnCtx {
        handle,
        player: request.player_id,
        snapshot_rx,
        invalid_json: 0,
    })
}

async fn handle_client_message(
    socket: &mut WebSocket,
    ctx: &mut ConnCtx,
    msg: ClientMessage,
) -> Result<LoopControl, NetError> {
    let outcome = match msg {
        ClientMessage::Move { action } => match &ctx.player {
            Some(player) => ctx.handle.make_move(player.clone(), action).await,
            None => {
                let reject = ServerMessage::Rejected {
                    reason: "Spectators cannot move".to_string(),
                };
                send_message(socket, &reject).await?;
                return Ok(LoopControl::Continue);
            }
        },
        ClientMessage::Reset => match &ctx.player {
            Some(_) => ctx.handle.reset().await,
            None => {
                let reject = ServerMessage::Rejected {
                    reason: "Spectators cannot reset".to_string(),
                };
                send_message(socket, &reject).await?;
                return Ok(LoopControl::Continue);
            }
        },
        ClientMessage::Sync(_) => {
            debug!("Ignoring repeated sync request");
            return Ok(LoopControl::Continue);
        }
    };

    match outcome {
        Ok(()) => Ok(LoopControl::Continue),
        Err(MatchError::Action(e)) => {
            debug!(reason = %e, "Action rejected");
            let reject = ServerMessage::Rejected {
                reason: e.to_string(),
            };
            send_message(socket, &reject).await?;
            Ok(LoopControl::Continue)
        }
        Err(MatchError::Closed) => Err(NetError::MatchClosed),
    }
}

async fn handle_incoming_ws(
    socket: &mut WebSocket,
    ctx: &mut ConnCtx,
    incoming: Option<Result<Message, axum::Error>>,
) -> Result<LoopControl, NetError> {
    let Some(incoming) = incoming else {
        return Ok(LoopControl::Disconnect);
    };

    match incoming? {
        Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
            Ok(msg) => handle_client_message(socket, ctx, msg).await,
            Err(e) => {
                ctx.invalid_json += 1;
                warn!(error = %e, count = ctx.invalid_json, "Invalid client message");
                if ctx.invalid_json >= MAX_INVALID_JSON {
                    let _ = send_close_with_reason(
                        socket,
                        close_code::POLICY,
                        "too many invalid messages",
                    )
                    .await;
                    return Ok(LoopControl::Disconnect);
                }
                let reject = ServerMessage::Rejected {
                    reason: format!("Invalid message: {}", e),
                };
                send_message(socket, &reject).await?;
                Ok(LoopControl::Continue)
            }
        },
        Message::Binary(_) => {
            let _ = send_close_with_reason(
                socket,
                close_code::UNSUPPORTED,
                "binary messages not supported",
            )
            .await;
            Ok(LoopControl::Disconnect)
        }
        Message::Ping(_) | Message::Pong(_) => Ok(LoopControl::Continue),
        Message::Close(_) => Ok(LoopControl::Disconnect),
    }
}

async fn run_client_loop(socket: &mut WebSocket, ctx: &mut ConnCtx) -> Result<(), NetError> {
    loop {
        let control = tokio::select! {
            incoming = socket.recv() => handle_incoming_ws(socket, ctx, incoming).await?,

            changed = ctx.snapshot_rx.changed() => {
                if changed.is_err() {
                    return Err(NetError::MatchClosed);
                }
                let snapshot = ctx.snapshot_rx.borrow_and_update().clone();
                send_message(socket, &ServerMessage::Update(snapshot)).await?;
                LoopControl::Continue
            }
        };

        if let LoopControl::Disconnect = control {
            return Ok(());
        }
    }
}
