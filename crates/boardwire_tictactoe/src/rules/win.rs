//! Win detection logic for tic-tac-toe.

use crate::types::Board;
use boardwire_engine::PlayerId;

/// The 8 winning index triples.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the shared value of the first triple holding three equal,
/// non-empty cells.
pub fn winner(board: &Board) -> Option<&PlayerId> {
    LINES.iter().find_map(|&[a, b, c]| {
        let first = board.get(a)?;
        (board.get(b) == Some(first) && board.get(c) == Some(first)).then_some(first)
    })
}

/// Returns true if any triple is complete.
pub fn is_victory(board: &Board) -> bool {
    winner(board).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn board(cells: [Option<&str>; 9]) -> Board {
        let cells: [Cell; 9] = cells.map(|c| c.map(PlayerId::from));
        Board::from_cells(cells)
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let b = board([Some("X"), Some("X"), Some("X"), None, None, None, None, None, None]);
        assert_eq!(winner(&b), Some(&PlayerId::from("X")));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let b = board([None, None, Some("O"), None, Some("O"), None, Some("O"), None, None]);
        assert_eq!(winner(&b), Some(&PlayerId::from("O")));
    }

    #[test]
    fn test_mixed_triple_is_not_a_win() {
        let b = board([Some("X"), Some("O"), Some("X"), None, None, None, None, None, None]);
        assert!(!is_victory(&b));
    }
}
