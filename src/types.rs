//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A validated cell coordinate on the 3x3 board.
///
/// Both components are guaranteed to lie in `0..3`, so indexing a
/// [`Board`](crate::tictactoe::Board) with a `Coord` never goes out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// The center cell (1, 1).
    pub const CENTER: Coord = Coord { row: 1, col: 1 };

    /// Create a new coordinate, validating it's within board bounds.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if either component is >= 3.
    ///
    /// # Examples
    ///
    /// ```
    /// use symtree::types::Coord;
    ///
    /// let corner = Coord::new(2, 0)?;
    /// assert_eq!(corner.index(), 6);
    /// assert!(Coord::new(3, 0).is_err());
    /// # Ok::<(), symtree::Error>(())
    /// ```
    pub fn new(row: usize, col: usize) -> Result<Self, crate::Error> {
        if row < 3 && col < 3 {
            Ok(Coord {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(crate::Error::OutOfBounds { row, col })
        }
    }

    /// Build a coordinate from a row-major index (0-8).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the index is >= 9.
    pub fn from_index(index: usize) -> Result<Self, crate::Error> {
        Self::new(index / 3, index % 3)
    }

    // Callers guarantee `row < 3 && col < 3`.
    pub(crate) const fn new_unchecked(row: usize, col: usize) -> Self {
        Coord {
            row: row as u8,
            col: col as u8,
        }
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index (0-8)
    pub fn index(self) -> usize {
        self.row() * 3 + self.col()
    }

    /// All nine coordinates in row-major order
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..9).map(|i| Coord::new_unchecked(i / 3, i % 3))
    }
}

impl From<Coord> for (usize, usize) {
    fn from(coord: Coord) -> Self {
        (coord.row(), coord.col())
    }
}

impl TryFrom<(usize, usize)> for Coord {
    type Error = crate::Error;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Coord::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
