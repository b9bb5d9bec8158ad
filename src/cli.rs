//! Command-line interface for boardwire.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default server address for clients.
pub const DEFAULT_SERVER: &str = "127.0.0.1:8000";

/// Boardwire - networked tic-tac-toe
#[derive(Parser, Debug)]
#[command(name = "boardwire")]
#[command(about = "Networked tic-tac-toe on a reducer-style game engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the game server
    Serve {
        /// Host to bind to (overrides config and BOARDWIRE_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config and BOARDWIRE_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// TOML config file. Defaults to ./boardwire.toml when present.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Play in the terminal, one pane per seat
    Play {
        /// Server address (host:port or URL)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,

        /// Match to join; created if missing
        #[arg(long, default_value = "default")]
        match_id: String,

        /// Seat to play; repeat for hot-seat panes. Defaults to seats 0 and 1
        /// unless only spectating.
        #[arg(long = "player")]
        players: Vec<String>,

        /// Add a read-only spectator pane
        #[arg(long)]
        spectate: bool,
    },

    /// Create a match through the REST lobby
    Create {
        /// Server address (host:port or URL)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,

        /// Match id; generated by the server if omitted
        #[arg(long)]
        match_id: Option<String>,
    },

    /// List running matches
    List {
        /// Server address (host:port or URL)
        #[arg(long, default_value = DEFAULT_SERVER)]
        server: String,
    },
}
