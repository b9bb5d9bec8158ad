use super::{AppState, ErrorResponse};
use crate::error::LobbyError;
use crate::ids::new_match_id;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    #[serde(default)]
    match_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateMatchResponse {
    match_id: String,
}

#[derive(Debug, Serialize)]
struct MatchListResponse {
    matches: Vec<String>,
}

impl IntoResponse for LobbyError {
    fn into_response(self) -> Response {
        let status = match self {
            LobbyError::UnknownGame(_) | LobbyError::MatchNotFound(_) => StatusCode::NOT_FOUND,
            LobbyError::AlreadyExists(_) => StatusCode::CONFLICT,
            LobbyError::EmptyMatchId => StatusCode::BAD_REQUEST,
        };
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// `GET /games`
#[instrument(skip(state))]
pub async fn list_games_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.registry.game_names())
}

/// `GET /games/{name}`
#[instrument(skip(state))]
pub async fn list_matches_handler(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
) -> Result<impl IntoResponse, LobbyError> {
    let matches = state.registry.list_matches(&game).await?;
    Ok(Json(MatchListResponse { matches }))
}

/// `POST /games/{name}/create`
///
/// The body is optional; without a `match_id` one is generated.
#[instrument(skip(state, payload))]
pub async fn create_match_handler(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Option<Json<CreateMatchRequest>>,
) -> Result<impl IntoResponse, LobbyError> {
    let requested = payload.and_then(|Json(req)| req.match_id);
    let match_id = match requested {
        Some(id) => id,
        None => new_match_id(),
    };

    let handle = state.registry.create_match(&game, &match_id).await?;
    info!(game = handle.game(), match_id = handle.match_id(), "Match created via lobby");
    Ok((
        StatusCode::CREATED,
        Json(CreateMatchResponse {
            match_id: handle.match_id().to_string(),
        }),
    ))
}

/// `GET /games/{name}/{match_id}`
#[instrument(skip(state))]
pub async fn get_match_handler(
    State(state): State<Arc<AppState>>,
    Path((game, match_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, LobbyError> {
    let handle = state.registry.get_match(&game, &match_id).await?;
    Ok(Json(handle.snapshot()))
}
