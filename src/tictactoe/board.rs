//! Board representation and basic operations

use std::{fmt, ops::Index};

use serde::{Deserialize, Serialize};

use crate::types::Coord;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game. `X` always opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to the mark it places
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

/// A 3x3 grid of marks.
///
/// `PartialEq` is exact cell-by-cell equality. Equality up to the symmetries
/// of the square is the separate [`Board::equivalent`] operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PieceCount {
    pub x: usize,
    pub o: usize,
}

impl Board {
    /// Create an empty board
    pub const fn new() -> Self {
        Board {
            cells: [[Cell::Empty; 3]; 3],
        }
    }

    /// Build a board from explicit rows.
    pub const fn from_rows(cells: [[Cell; 3]; 3]) -> Self {
        Board { cells }
    }

    /// Rows of the board, top to bottom
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Get cell at a coordinate
    pub fn get(&self, coord: Coord) -> Cell {
        self.cells[coord.row()][coord.col()]
    }

    pub(crate) fn set(&mut self, coord: Coord, cell: Cell) {
        self.cells[coord.row()][coord.col()] = cell;
    }

    /// Check if a coordinate is empty
    pub fn is_empty_at(&self, coord: Coord) -> bool {
        self.get(coord) == Cell::Empty
    }

    /// Get all empty coordinates in row-major order
    pub fn empty_coords(&self) -> Vec<Coord> {
        Coord::all().filter(|&c| self.is_empty_at(c)).collect()
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        let count = self.count_pieces();
        count.x + count.o
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == 9
    }

    pub(crate) fn count_pieces(&self) -> PieceCount {
        let mut count = PieceCount { x: 0, o: 0 };
        for cell in self.cells.iter().flatten() {
            match cell {
                Cell::X => count.x += 1,
                Cell::O => count.o += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Nine-character row-major encoding, e.g. `"X...O...."`
    pub fn encode(&self) -> String {
        self.cells.iter().flatten().map(|c| c.to_char()).collect()
    }

    /// Create a board from a string representation.
    ///
    /// The string must contain 9 cell characters; whitespace and `/` row
    /// separators are ignored, so `"XO. / .X. / ..O"` and `"XO..X...O"` are the
    /// same board. Piece counts must be consistent with X opening.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - There are not exactly 9 cell characters
    /// - Any character is not a valid cell representation
    /// - The piece counts are invalid (X must equal O or lead by one)
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != 9 {
            return Err(crate::Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut board = Board::new();
        for (i, (&c, coord)) in chars.iter().zip(Coord::all()).enumerate() {
            let cell = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
            board.set(coord, cell);
        }

        let count = board.count_pieces();
        if count.x != count.o && count.x != count.o + 1 {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        }

        Ok(board)
    }

    /// Render as a single line: `"XO. / .X. / ..O"`
    pub fn to_inline(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_char()).collect::<String>())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord> for Board {
    type Output = Cell;

    fn index(&self, coord: Coord) -> &Cell {
        &self.cells[coord.row()][coord.col()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            if i < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
