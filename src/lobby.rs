//! REST lobby client.

use crate::client::http_url;
use anyhow::{Context, Result, bail};
use boardwire_tictactoe::GAME_NAME;
use serde::Deserialize;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct CreatedMatch {
    match_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Creates a tic-tac-toe match, returning its id.
///
/// Without `match_id` the server picks one.
#[instrument]
pub async fn create_match(server: &str, match_id: Option<&str>) -> Result<String> {
    let url = format!("{}/games/{}/create", http_url(server), GAME_NAME);
    let client = reqwest::Client::new();
    let mut request = client.post(&url);
    if let Some(id) = match_id {
        request = request.json(&serde_json::json!({ "match_id": id }));
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;
    let status = response.status();
    if !status.is_success() {
        let reason = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| status.to_string());
        bail!("Server refused to create match: {}", reason);
    }

    let created: CreatedMatch = response.json().await.context("Unreadable create response")?;
    info!(match_id = %created.match_id, "Match created");
    Ok(created.match_id)
}

/// Lists running tic-tac-toe matches.
#[instrument]
pub async fn list_matches(server: &str) -> Result<Vec<String>> {
    #[derive(Deserialize)]
    struct Listing {
        matches: Vec<String>,
    }

    let url = format!("{}/games/{}", http_url(server), GAME_NAME);
    let listing: Listing = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()?
        .json()
        .await?;
    Ok(listing.matches)
}
