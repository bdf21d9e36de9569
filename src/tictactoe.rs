//! Tic-Tac-Toe states and the symmetry-reduced game tree

pub mod board;
pub mod game_tree;
pub mod lines;
pub mod state;
pub mod symmetry;
pub mod validation;

pub use board::{Board, Cell, Player};
pub use game_tree::{Children, ExpansionStats, GameTree, Node, NodeRecord, Traversal};
pub use lines::{CellClass, LineAnalyzer, WINNING_LINES, completes_line};
pub use state::{State, Successors, generate_successors};
pub use symmetry::{D4Transform, equivalent, matching_transform};
pub use validation::{AuditReport, Violation};
