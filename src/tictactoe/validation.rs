//! Structural audit of a generated game tree

use std::fmt;

use serde::Serialize;
use tracing::warn;

use super::{
    game_tree::{Children, GameTree},
    lines::LineAnalyzer,
};
use crate::{identifiers::NodeId, types::Coord};

/// A broken tree invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Violation {
    /// Occupied cells disagree with the stored move count
    MoveCount {
        node: NodeId,
        move_count: usize,
        occupied: usize,
    },
    /// The local win flag disagrees with a full scan for the last mover
    WinFlag { node: NodeId },
    /// Terminal state with children, or live state marked terminal
    TerminalMarker { node: NodeId },
    /// A child does not point back to the node that generated it
    ParentLink { parent: NodeId, child: NodeId },
    /// A child is not its parent plus exactly one mark
    Conservation { parent: NodeId, child: NodeId },
    /// Two siblings are equivalent under a symmetry
    SymmetricSiblings {
        parent: NodeId,
        first: NodeId,
        second: NodeId,
    },
    /// A legal move from the parent has no equivalent child
    MissingRepresentative { parent: NodeId, coord: Coord },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MoveCount {
                node,
                move_count,
                occupied,
            } => write!(
                f,
                "node {node}: move count {move_count} but {occupied} occupied cells"
            ),
            Violation::WinFlag { node } => write!(f, "node {node}: win flag disagrees with board"),
            Violation::TerminalMarker { node } => {
                write!(f, "node {node}: terminal marker disagrees with state")
            }
            Violation::ParentLink { parent, child } => {
                write!(f, "node {child} is listed under {parent} but points elsewhere")
            }
            Violation::Conservation { parent, child } => {
                write!(f, "node {child} is not a single move from {parent}")
            }
            Violation::SymmetricSiblings {
                parent,
                first,
                second,
            } => write!(
                f,
                "children {first} and {second} of node {parent} are symmetric"
            ),
            Violation::MissingRepresentative { parent, coord } => write!(
                f,
                "move {coord} from node {parent} has no equivalent child"
            ),
        }
    }
}

/// Outcome of [`GameTree::audit`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub nodes_checked: usize,
    pub violations: Vec<Violation>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

impl GameTree {
    /// Check every node against the tree invariants.
    ///
    /// Unexpanded nodes are checked on their own; expanded nodes additionally
    /// have their children checked for conservation, sibling soundness and
    /// sibling completeness.
    pub fn audit(&self) -> AuditReport {
        let mut report = AuditReport::default();

        for (id, node) in self.iter() {
            report.nodes_checked += 1;
            let state = node.state();
            let board = state.board();

            let occupied = board.occupied_count();
            if occupied != state.move_count() {
                report.violations.push(Violation::MoveCount {
                    node: id,
                    move_count: state.move_count(),
                    occupied,
                });
            }

            let scanned = state
                .last_mover()
                .is_some_and(|p| LineAnalyzer::has_won(board, p));
            if scanned != state.has_winner() {
                report.violations.push(Violation::WinFlag { node: id });
            }

            let children = match node.children() {
                Children::NotExpanded => continue,
                Children::Terminal if state.is_terminal() => continue,
                Children::Expanded(ids) if !state.is_terminal() => ids,
                _ => {
                    report.violations.push(Violation::TerminalMarker { node: id });
                    continue;
                }
            };

            for &child in children {
                let Ok(child_node) = self.node(child) else {
                    report.violations.push(Violation::ParentLink { parent: id, child });
                    continue;
                };
                if child_node.parent() != Some(id) {
                    report.violations.push(Violation::ParentLink { parent: id, child });
                }
                let child_state = child_node.state();
                let is_single_move = child_state.move_count() == state.move_count() + 1
                    && state
                        .move_to(child_state)
                        .and_then(|coord| state.apply_move(coord).ok())
                        .is_some_and(|expected| expected == *child_state);
                if !is_single_move {
                    report.violations.push(Violation::Conservation { parent: id, child });
                }
            }

            for (i, &first) in children.iter().enumerate() {
                for &second in &children[i + 1..] {
                    let (Ok(a), Ok(b)) = (self.state(first), self.state(second)) else {
                        continue;
                    };
                    if a.equivalent(b) {
                        report.violations.push(Violation::SymmetricSiblings {
                            parent: id,
                            first,
                            second,
                        });
                    }
                }
            }

            for coord in board.empty_coords() {
                let Ok(candidate) = state.apply_move(coord) else {
                    continue;
                };
                let represented = children
                    .iter()
                    .filter_map(|&child| self.state(child).ok())
                    .any(|child| child.equivalent(&candidate));
                if !represented {
                    report
                        .violations
                        .push(Violation::MissingRepresentative { parent: id, coord });
                }
            }
        }

        for violation in &report.violations {
            warn!(%violation, "tree invariant violated");
        }
        report
    }
}
