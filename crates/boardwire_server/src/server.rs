//! Router assembly and the serve loop.

use crate::config::ServerConfig;
use crate::net::{
    AppState, create_match_handler, get_match_handler, list_games_handler, list_matches_handler,
    ws_handler,
};
use crate::registry::MatchRegistry;

use axum::{
    Router,
    body::Body,
    http::Request,
    routing::{get, post},
};
use boardwire_engine::GameDefinition;
use std::io::Result;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

/// Builds the application router over a registry.
pub fn router(registry: Arc<MatchRegistry>, config: &ServerConfig) -> Router {
    let state = Arc::new(AppState {
        registry,
        sync_timeout: config.sync_timeout(),
    });

    Router::new()
        .route("/ws", get(ws_handler))
        .route("/games", get(list_games_handler))
        .route("/games/{name}", get(list_matches_handler))
        .route("/games/{name}/create", post(create_match_handler))
        .route("/games/{name}/{match_id}", get(get_match_handler))
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(state)
}

/// Serves `games` on an already bound listener until the process exits.
#[instrument(skip_all)]
pub async fn run(
    listener: tokio::net::TcpListener,
    games: Vec<Arc<dyn GameDefinition>>,
    config: ServerConfig,
) -> Result<()> {
    let address = listener.local_addr()?;
    let registry = Arc::new(MatchRegistry::new(games, *config.command_capacity()));
    let app = router(registry, &config);

    info!(%address, "Listening");

    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "Server error");
    })
}

/// Binds the configured address and serves `games`.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
pub async fn run_with_config(
    games: Vec<Arc<dyn GameDefinition>>,
    config: ServerConfig,
) -> Result<()> {
    let address = config
        .socket_addr()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "Failed to bind");
        })?;

    run(listener, games, config).await
}
