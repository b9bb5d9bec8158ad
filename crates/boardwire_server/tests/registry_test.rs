//! Match registry and match task behavior without the network.

use boardwire_engine::{ActionError, PlayerId, definition};
use boardwire_server::{LobbyError, MatchError, MatchRegistry};
use boardwire_tictactoe::TicTacToe;
use serde_json::json;

fn registry() -> MatchRegistry {
    MatchRegistry::new(vec![definition(TicTacToe)], 8)
}

#[tokio::test]
async fn test_create_and_lookup() {
    let registry = registry();
    assert_eq!(registry.game_names(), vec!["tic-tac-toe"]);

    let handle = registry.create_match("tic-tac-toe", "a").await.unwrap();
    assert_eq!(handle.match_id(), "a");
    assert!(handle.is_seated(&PlayerId::from("0")));
    assert!(!handle.is_seated(&PlayerId::from("2")));

    assert_eq!(
        registry.create_match("tic-tac-toe", "a").await.unwrap_err(),
        LobbyError::AlreadyExists("a".to_string())
    );
    assert_eq!(
        registry.get_match("chess", "a").await.unwrap_err(),
        LobbyError::UnknownGame("chess".to_string())
    );
    assert_eq!(
        registry.create_match("tic-tac-toe", "").await.unwrap_err(),
        LobbyError::EmptyMatchId
    );
}

#[tokio::test]
async fn test_join_creates_once() {
    let registry = registry();
    let first = registry.join("tic-tac-toe", "shared").await.unwrap();
    first
        .make_move(PlayerId::from("0"), json!({"move": "clickCell", "args": 0}))
        .await
        .unwrap();

    let second = registry.join("tic-tac-toe", "shared").await.unwrap();
    assert_eq!(second.snapshot()["state"]["cells"][0], "0");
    assert_eq!(
        registry.list_matches("tic-tac-toe").await.unwrap(),
        vec!["shared".to_string()]
    );
}

#[tokio::test]
async fn test_subscribers_see_accepted_moves_only() {
    let registry = registry();
    let handle = registry.join("tic-tac-toe", "watch").await.unwrap();
    let mut rx = handle.subscribe();

    let err = handle
        .make_move(PlayerId::from("1"), json!({"move": "clickCell", "args": 0}))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        MatchError::Action(ActionError::NotYourTurn(
            PlayerId::from("1"),
            PlayerId::from("0")
        ))
    );
    assert!(!rx.has_changed().unwrap());

    handle
        .make_move(PlayerId::from("0"), json!({"move": "clickCell", "args": 8}))
        .await
        .unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update()["state"]["cells"][8], "0");
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let registry = registry();
    let handle = registry.join("tic-tac-toe", "bad").await.unwrap();
    let err = handle
        .make_move(PlayerId::from("0"), json!({"move": "flipTable"}))
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::Action(ActionError::MalformedMove(_))));
}

#[tokio::test]
async fn test_match_ids_are_trimmed() {
    let registry = registry();
    let joined = registry.join("tic-tac-toe", " padded ").await.unwrap();
    assert_eq!(joined.match_id(), "padded");

    let found = registry.get_match("tic-tac-toe", "padded").await.unwrap();
    assert_eq!(found.match_id(), "padded");
    assert_eq!(
        registry.create_match("tic-tac-toe", "padded").await.unwrap_err(),
        LobbyError::AlreadyExists("padded".to_string())
    );
    assert_eq!(
        registry.create_match("tic-tac-toe", "   ").await.unwrap_err(),
        LobbyError::EmptyMatchId
    );
    assert_eq!(
        registry.list_matches("tic-tac-toe").await.unwrap(),
        vec!["padded".to_string()]
    );
}
