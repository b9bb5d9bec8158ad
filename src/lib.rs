//! Boardwire - tic-tac-toe over a small reducer-style game engine.
//!
//! The rules live in `boardwire_tictactoe`, the turn engine in
//! `boardwire_engine` and the match host in `boardwire_server`. This crate
//! adds the pieces a player touches:
//!
//! - **Client**: a WebSocket connection following one match
//! - **TUI**: a terminal board per connected seat
//! - **Lobby**: REST calls for creating and listing matches
//!
//! # Example
//!
//! ```no_run
//! use boardwire::{ClientEvent, MatchClient};
//! use boardwire_engine::PlayerId;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let (client, mut events) =
//!     MatchClient::connect("127.0.0.1:8000", "default", Some(PlayerId::from("0"))).await?;
//! client.click_cell(4)?;
//! while let Some(event) = events.recv().await {
//!     if let ClientEvent::Snapshot(state) = event {
//!         println!("{}", boardwire::tui::status_line(&state));
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod client;
pub mod lobby;
pub mod tui;

pub use client::{ClientEvent, MatchClient, decode_server_message, http_url, ws_url};
pub use lobby::{create_match, list_matches};
