//! JSON messages exchanged over the match WebSocket.
//!
//! Every frame is `{"type": ..., "data": ...}`.

use boardwire_engine::PlayerId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Match id used when a client does not name one.
pub const DEFAULT_MATCH_ID: &str = "default";

fn default_match_id() -> String {
    DEFAULT_MATCH_ID.to_string()
}

/// First message of every connection: which match to follow and as whom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Game name, e.g. `tic-tac-toe`.
    pub game: String,
    /// Match to join; created when missing.
    #[serde(default = "default_match_id")]
    pub match_id: String,
    /// Seat to play. `None` joins as a spectator.
    #[serde(default)]
    pub player_id: Option<PlayerId>,
}

/// Messages sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    /// Handshake.
    Sync(SyncRequest),
    /// A move payload in the game's own format.
    Move {
        /// e.g. `{"move": "clickCell", "args": 4}`
        #[serde(rename = "move")]
        action: Value,
    },
    /// Start over in the same match.
    Reset,
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    /// Full snapshot sent once after the handshake.
    Sync(Value),
    /// Snapshot after every accepted move or reset.
    Update(Value),
    /// The sender's last action was refused.
    Rejected {
        /// Human-readable reason.
        reason: String,
    },
    /// Protocol failure, sent before the server closes the socket.
    Error {
        /// Human-readable reason.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_wire_format() {
        let msg: ClientMessage = serde_json::from_value(json!({
            "type": "Move",
            "data": {"move": {"move": "clickCell", "args": 4}}
        }))
        .unwrap();
        assert_eq!(
            msg,
            ClientMessage::Move {
                action: json!({"move": "clickCell", "args": 4})
            }
        );
    }

    #[test]
    fn test_sync_defaults_to_spectating_default_match() {
        let msg: ClientMessage =
            serde_json::from_value(json!({"type": "Sync", "data": {"game": "tic-tac-toe"}}))
                .unwrap();
        let ClientMessage::Sync(req) = msg else {
            panic!("expected sync");
        };
        assert_eq!(req.match_id, DEFAULT_MATCH_ID);
        assert_eq!(req.player_id, None);
    }

    #[test]
    fn test_reset_has_no_data() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"Reset"}"#).unwrap();
        assert_eq!(msg, ClientMessage::Reset);
    }
}
