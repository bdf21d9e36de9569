//! Symmetry-reduced Tic-Tac-Toe game tree generator
//!
//! This crate provides:
//! - Board states with constant-time win detection from the last move
//! - The D4 symmetry group of the square and a board comparator built on it
//! - Successor generation that keeps one representative per symmetry class
//!   among siblings
//! - An arena-backed game tree with lazy expansion and parent links
//! - A command-line driver for expanding, auditing and exporting the tree

pub mod cli;
pub mod error;
pub mod identifiers;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use identifiers::NodeId;
pub use tictactoe::{
    Board, Children, D4Transform, GameTree, State, Successors, Traversal, equivalent,
    generate_successors,
};
pub use types::Coord;
