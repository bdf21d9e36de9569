//! D4 symmetry group operations and the symmetry comparator

use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::Board;
use crate::types::Coord;

/// D4 symmetry transformation (dihedral group of the square)
///
/// Rotations are clockwise. Each element factors as an optional left/right
/// reflection followed by `k` quarter turns, see [`D4Transform::parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum D4Transform {
    Identity,
    /// Reflection across the main diagonal `\`: (i, j) -> (j, i)
    Transpose,
    /// Reflection across the anti-diagonal `/`: (i, j) -> (2-j, 2-i)
    AntiTranspose,
    /// Top/bottom flip: (i, j) -> (2-i, j)
    FlipVertical,
    /// Left/right flip: (i, j) -> (i, 2-j)
    FlipHorizontal,
    Rotate90,
    Rotate180,
    Rotate270,
}

impl D4Transform {
    /// All 8 elements, in the order the comparator tries them.
    pub const ALL: [D4Transform; 8] = [
        D4Transform::Identity,
        D4Transform::Transpose,
        D4Transform::AntiTranspose,
        D4Transform::FlipVertical,
        D4Transform::FlipHorizontal,
        D4Transform::Rotate90,
        D4Transform::Rotate180,
        D4Transform::Rotate270,
    ];

    /// Clockwise rotation by `k` quarter turns (taken mod 4)
    pub fn rotation(k: usize) -> D4Transform {
        Self::from_parts(k, false)
    }

    /// Decompose into (quarter turns, reflect first)
    pub fn parts(self) -> (usize, bool) {
        match self {
            D4Transform::Identity => (0, false),
            D4Transform::Rotate90 => (1, false),
            D4Transform::Rotate180 => (2, false),
            D4Transform::Rotate270 => (3, false),
            D4Transform::FlipHorizontal => (0, true),
            D4Transform::AntiTranspose => (1, true),
            D4Transform::FlipVertical => (2, true),
            D4Transform::Transpose => (3, true),
        }
    }

    fn from_parts(quarter_turns: usize, reflect: bool) -> D4Transform {
        match (quarter_turns % 4, reflect) {
            (0, false) => D4Transform::Identity,
            (1, false) => D4Transform::Rotate90,
            (2, false) => D4Transform::Rotate180,
            (3, false) => D4Transform::Rotate270,
            (0, true) => D4Transform::FlipHorizontal,
            (1, true) => D4Transform::AntiTranspose,
            (2, true) => D4Transform::FlipVertical,
            _ => D4Transform::Transpose,
        }
    }

    /// Where this transform sends a cell.
    pub fn map(self, coord: Coord) -> Coord {
        let (quarter_turns, reflect) = self.parts();
        let (mut row, mut col) = (coord.row(), coord.col());

        // Reflect before rotating
        if reflect {
            col = 2 - col;
        }
        for _ in 0..quarter_turns {
            (row, col) = (col, 2 - row);
        }

        Coord::new_unchecked(row, col)
    }

    /// The single transform equal to applying `self` and then `then`.
    pub fn compose(self, then: D4Transform) -> D4Transform {
        let (k1, f1) = self.parts();
        let (k2, f2) = then.parts();
        if f2 {
            // A reflection turns the preceding rotation around.
            Self::from_parts(k2 + 4 - k1, !f1)
        } else {
            Self::from_parts(k2 + k1, f1)
        }
    }

    /// Get the inverse transform
    pub fn inverse(self) -> D4Transform {
        match self.parts() {
            (k, false) => Self::rotation(4 - k),
            // Every reflection is an involution
            (_, true) => self,
        }
    }

    pub fn is_reflection(self) -> bool {
        self.parts().1
    }
}

impl fmt::Display for D4Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            D4Transform::Identity => "identity",
            D4Transform::Transpose => "main-diagonal reflection",
            D4Transform::AntiTranspose => "anti-diagonal reflection",
            D4Transform::FlipVertical => "top/bottom reflection",
            D4Transform::FlipHorizontal => "left/right reflection",
            D4Transform::Rotate90 => "rotation 90°",
            D4Transform::Rotate180 => "rotation 180°",
            D4Transform::Rotate270 => "rotation 270°",
        };
        f.write_str(name)
    }
}

/// Whether `b` is the image of `a` under some symmetry of the square.
///
/// Only board contents are compared. This is the symmetry-aware counterpart
/// of `a == b`.
///
/// # Examples
///
/// ```
/// use symtree::tictactoe::{Board, equivalent};
///
/// let top_left = Board::from_string("X........")?;
/// let bottom_right = Board::from_string("........X")?;
/// let center = Board::from_string("....X....")?;
///
/// assert!(equivalent(&top_left, &bottom_right));
/// assert!(!equivalent(&top_left, &center));
/// # Ok::<(), symtree::Error>(())
/// ```
pub fn equivalent(a: &Board, b: &Board) -> bool {
    matching_transform(a, b).is_some()
}

/// The first transform (in [`D4Transform::ALL`] order) that maps `a` onto `b`.
pub fn matching_transform(a: &Board, b: &Board) -> Option<D4Transform> {
    D4Transform::ALL
        .into_iter()
        .find(|&t| Coord::all().all(|c| b[t.map(c)] == a[c]))
}

impl Board {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: D4Transform) -> Self {
        let mut image = Board::new();
        for c in Coord::all() {
            image.set(t.map(c), self[c]);
        }
        image
    }

    /// Equality up to the symmetries of the square. See [`equivalent`].
    pub fn equivalent(&self, other: &Board) -> bool {
        equivalent(self, other)
    }

    /// Get the canonical (minimal) representative of this board's symmetry class
    ///
    /// Two boards are equivalent exactly when their canonical forms are equal,
    /// which makes this usable as a hash key when clustering boards reached
    /// along different branches.
    pub fn canonical(&self) -> Self {
        D4Transform::ALL
            .into_iter()
            .map(|t| self.transform(t))
            .min()
            .unwrap_or(*self)
    }

    /// The transforms that leave this board unchanged.
    pub fn stabilizer(&self) -> Vec<D4Transform> {
        D4Transform::ALL
            .into_iter()
            .filter(|&t| self.transform(t) == *self)
            .collect()
    }
}
