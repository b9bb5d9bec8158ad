//! Core domain types for tic-tac-toe.

use boardwire_engine::PlayerId;
use serde::{Deserialize, Serialize};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A cell holds nothing or the id of the player who claimed it.
pub type Cell = Option<PlayerId>;

/// 3x3 tic-tac-toe board, the whole game state.
///
/// Serialized as `{"cells": [null, "0", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from explicit cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns the player occupying `pos`, if any.
    pub fn get(&self, pos: usize) -> Option<&PlayerId> {
        self.cells.get(pos).and_then(Option::as_ref)
    }

    /// Checks if the cell at `pos` exists and is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.cells.get(pos), Some(None))
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Claims `pos` for `player`. Callers check emptiness first.
    pub(crate) fn claim(&mut self, pos: usize, player: PlayerId) {
        self.cells[pos] = Some(player);
    }
}
