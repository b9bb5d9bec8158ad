//! Boardwire server - hosts engine matches for networked clients.
//!
//! Clients follow a match over a WebSocket at `/ws`: they send a sync
//! request naming the game, match and seat, receive the current snapshot,
//! then submit moves and receive every subsequent snapshot. A small REST
//! lobby under `/games` lists, creates and inspects matches.
//!
//! Each match runs in its own task which applies commands in arrival order,
//! so concurrent clients never race on game state.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
mod error;
mod ids;
mod net;
pub mod protocol;
mod registry;
mod server;

pub use config::{ConfigError, DEFAULT_PORT, ServerConfig};
pub use error::{LobbyError, MatchError};
pub use protocol::{ClientMessage, DEFAULT_MATCH_ID, ServerMessage, SyncRequest};
pub use registry::{MatchHandle, MatchRegistry};
pub use server::{router, run, run_with_config};
