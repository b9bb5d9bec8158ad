//! Tests for tic-tac-toe played through the engine.

use boardwire_engine::{ActionError, GameOver, Match, PlayerId, definition};
use boardwire_tictactoe::{GAME_NAME, Position, TicTacToe, TicTacToeMove};
use std::sync::Arc;

fn p(id: &str) -> PlayerId {
    PlayerId::from(id)
}

fn new_match() -> Match<TicTacToe> {
    Match::new(Arc::new(TicTacToe), "default")
}

#[test]
fn test_players_alternate() {
    let mut game = new_match();
    game.make_move(&p("0"), TicTacToeMove::ClickCell(4)).unwrap();
    assert_eq!(game.ctx().current_player(), &p("1"));
    game.make_move(&p("1"), TicTacToeMove::ClickCell(0)).unwrap();
    assert_eq!(game.ctx().current_player(), &p("0"));
    assert_eq!(game.state().get(4), Some(&p("0")));
    assert_eq!(game.state().get(0), Some(&p("1")));
}

#[test]
fn test_occupied_cell_keeps_turn() {
    let mut game = new_match();
    game.make_move(&p("0"), TicTacToeMove::ClickCell(0)).unwrap();
    let before = game.snapshot();

    let result = game.make_move(&p("1"), TicTacToeMove::ClickCell(0));
    assert_eq!(result, Err(ActionError::InvalidMove));
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.ctx().current_player(), &p("1"));
}

#[test]
fn test_first_player_wins_left_column() {
    let mut game = new_match();
    for (player, cell) in [("0", 0), ("1", 1), ("0", 3), ("1", 2), ("0", 6)] {
        game.make_move(&p(player), TicTacToeMove::ClickCell(cell)).unwrap();
    }
    assert_eq!(game.ctx().gameover(), &Some(GameOver::Winner(p("0"))));
    assert_eq!(
        game.make_move(&p("1"), TicTacToeMove::ClickCell(8)),
        Err(ActionError::GameOver)
    );
}

#[test]
fn test_full_game_draw() {
    // 0 | 1 | 0
    // 0 | 1 | 1
    // 1 | 0 | 0
    let mut game = new_match();
    let moves = [
        ("0", 0), ("1", 1), ("0", 2),
        ("1", 4), ("0", 3), ("1", 5),
        ("0", 7), ("1", 6), ("0", 8),
    ];
    for (player, cell) in moves {
        game.make_move(&p(player), TicTacToeMove::ClickCell(cell)).unwrap();
    }
    assert_eq!(game.ctx().gameover(), &Some(GameOver::Draw));
    assert!(Position::valid_moves(game.state()).is_empty());
}

#[test]
fn test_runner_accepts_click_cell_json() {
    let def = definition(TicTacToe);
    assert_eq!(def.name(), GAME_NAME);

    let mut runner = def.create_match("json");
    runner
        .make_move(&p("0"), serde_json::json!({"move": "clickCell", "args": 4}))
        .unwrap();

    let snapshot = runner.snapshot().unwrap();
    assert_eq!(snapshot["state"]["cells"][4], "0");
    assert_eq!(snapshot["ctx"]["current_player"], "1");
    assert_eq!(snapshot["ctx"]["gameover"], serde_json::Value::Null);
}
