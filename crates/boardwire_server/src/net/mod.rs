//! HTTP and WebSocket adapters.

mod rest;
mod ws;

pub use rest::{create_match_handler, get_match_handler, list_games_handler, list_matches_handler};
pub use ws::ws_handler;

use crate::registry::MatchRegistry;
use std::sync::Arc;
use std::time::Duration;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Hosted games and matches.
    pub registry: Arc<MatchRegistry>,
    /// Deadline for the sync handshake.
    pub sync_timeout: Duration,
}

/// JSON error body used by every REST failure.
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    /// Human-readable error string.
    pub error: String,
}
