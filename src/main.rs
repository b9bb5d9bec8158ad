//! Boardwire - Unified CLI
//!
//! Hosts tic-tac-toe matches and plays them from the terminal.

use anyhow::Result;
use boardwire::cli::{Cli, Command};
use boardwire::tui::{LOG_FILE, run_tui};
use boardwire_engine::{PlayerId, definition};
use boardwire_server::ServerConfig;
use boardwire_tictactoe::TicTacToe;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_FILE: &str = "boardwire.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port, config } => {
            init_stdout_tracing();
            run_server(host, port, config).await
        }
        Command::Play {
            server,
            match_id,
            players,
            spectate,
        } => {
            init_file_tracing()?;
            let players = seats(players, spectate);
            run_tui(&server, &match_id, players, spectate).await
        }
        Command::Create { server, match_id } => {
            init_stdout_tracing();
            let id = boardwire::create_match(&server, match_id.as_deref()).await?;
            println!("{}", id);
            Ok(())
        }
        Command::List { server } => {
            init_stdout_tracing();
            for id in boardwire::list_matches(&server).await? {
                println!("{}", id);
            }
            Ok(())
        }
    }
}

fn init_stdout_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();
}

/// Logs to a file so output does not corrupt the terminal UI.
fn init_file_tracing() -> Result<()> {
    let log_file = std::fs::File::create(LOG_FILE)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn seats(players: Vec<String>, spectate: bool) -> Vec<PlayerId> {
    if players.is_empty() && !spectate {
        return vec![PlayerId::from("0"), PlayerId::from("1")];
    }
    players.into_iter().map(PlayerId::from).collect()
}

/// Resolves configuration (file, then environment, then flags) and serves.
#[instrument]
async fn run_server(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> Result<()> {
    let path = config.or_else(|| {
        let default = Path::new(DEFAULT_CONFIG_FILE);
        default.exists().then(|| default.to_path_buf())
    });

    let mut config = ServerConfig::load(path.as_deref())?;
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    info!(host = %config.host(), port = config.port(), "Starting boardwire server");
    boardwire_server::run_with_config(vec![definition(TicTacToe)], config).await?;
    Ok(())
}
