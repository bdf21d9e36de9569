//! Winning line analysis for Tic-Tac-Toe

use serde::{Deserialize, Serialize};

use super::{Board, Cell, Player};
use crate::types::Coord;

/// Winning line indices on the 3x3 board (row-major)
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Geometric class of a cell, which decides the diagonals it lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellClass {
    /// (1, 1): on both diagonals
    Center,
    /// On exactly one diagonal: `\` when `row == col`, `/` otherwise
    Corner,
    /// Edge midpoint: on no diagonal
    Edge,
}

impl CellClass {
    pub fn of(coord: Coord) -> CellClass {
        match (coord.row() == 1, coord.col() == 1) {
            (true, true) => CellClass::Center,
            (false, false) => CellClass::Corner,
            _ => CellClass::Edge,
        }
    }
}

/// Whether placing `mark` at `coord` completes a line through that cell.
///
/// Only the lines through `coord` are inspected, so this is constant time.
/// The cell at `coord` itself is not read; it is assumed to hold `mark`.
pub fn completes_line(board: &Board, coord: Coord, mark: Cell) -> bool {
    let (row, col) = (coord.row(), coord.col());
    let at = |r: usize, c: usize| board[Coord::new_unchecked(r, c)] == mark;

    if at(row, (col + 1) % 3) && at(row, (col + 2) % 3) {
        return true;
    }
    if at((row + 1) % 3, col) && at((row + 2) % 3, col) {
        return true;
    }

    match CellClass::of(coord) {
        CellClass::Edge => false,
        CellClass::Center => (at(0, 0) && at(2, 2)) || (at(0, 2) && at(2, 0)),
        // `\` when row == col, `/` otherwise; both run through the center
        // to the opposite corner.
        CellClass::Corner => at(1, 1) && at(2 - row, 2 - col),
    }
}

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has three in a row anywhere on the board.
    ///
    /// Scans all eight lines; successor generation uses [`completes_line`]
    /// instead.
    pub fn has_won(board: &Board, player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES.iter().any(|line| {
            line.iter()
                .all(|&idx| board[Coord::new_unchecked(idx / 3, idx % 3)] == target)
        })
    }

    /// The player with a completed line, if any
    pub fn winner(board: &Board) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|&p| Self::has_won(board, p))
    }
}
