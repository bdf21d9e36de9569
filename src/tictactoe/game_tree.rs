//! Game tree construction over symmetry-reduced successors

use std::{collections::VecDeque, fmt};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace};

use super::{
    board::Player,
    state::{State, Successors, generate_successors},
};
use crate::{identifiers::NodeId, types::Coord};

/// Expansion status of a node's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    /// Successors have not been generated yet.
    NotExpanded,
    /// Generated successors, one per symmetry class.
    Expanded(Vec<NodeId>),
    /// Generated, and empty because the state is won or full.
    Terminal,
}

impl Children {
    pub fn ids(&self) -> &[NodeId] {
        match self {
            Children::Expanded(ids) => ids,
            Children::NotExpanded | Children::Terminal => &[],
        }
    }

    pub fn is_expanded(&self) -> bool {
        !matches!(self, Children::NotExpanded)
    }
}

/// A state stored in the tree arena.
#[derive(Debug, Clone)]
pub struct Node {
    state: State,
    parent: Option<NodeId>,
    children: Children,
}

impl Node {
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The node that generated this one; `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    /// Number of generated children (0 until expanded)
    pub fn child_count(&self) -> usize {
        self.children.ids().len()
    }

    pub fn depth(&self) -> usize {
        self.state.move_count()
    }
}

/// Order in which [`GameTree::expand`] visits unexpanded nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Traversal {
    /// Expand shallow nodes first
    #[default]
    #[serde(alias = "bfs")]
    #[value(alias = "bfs")]
    BreadthFirst,
    /// Expand the most recently generated node first
    #[serde(alias = "dfs")]
    #[value(alias = "dfs")]
    DepthFirst,
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Traversal::BreadthFirst => f.write_str("breadth-first"),
            Traversal::DepthFirst => f.write_str("depth-first"),
        }
    }
}

/// Node counts of a tree, grouped by depth and outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionStats {
    /// Nodes per move count (index 0 is the root)
    pub nodes_per_depth: [usize; 10],
    /// Nodes whose children have been generated (including terminal ones)
    pub expanded: usize,
    /// Live nodes still waiting for expansion
    pub unexpanded: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl ExpansionStats {
    pub fn total_nodes(&self) -> usize {
        self.nodes_per_depth.iter().sum()
    }

    pub fn terminal(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Arena-backed game tree rooted at the empty board.
///
/// The tree owns every node; parents are referenced by [`NodeId`] only, so
/// ownership flows strictly from the arena down. Children are written once,
/// by the first [`GameTree::generate_successors`] call on their parent.
///
/// # Examples
///
/// ```
/// use symtree::tictactoe::{GameTree, Traversal};
///
/// let mut tree = GameTree::new();
/// let root = tree.root();
/// assert_eq!(tree.generate_successors(root)?.ids().len(), 3);
///
/// let stats = tree.expand(Traversal::BreadthFirst, Some(2));
/// assert_eq!(stats.nodes_per_depth[..3], [1, 3, 12]);
/// # Ok::<(), symtree::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct GameTree {
    nodes: Vec<Node>,
}

impl GameTree {
    /// Create a tree holding only the empty root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                state: State::root(),
                parent: None,
                children: Children::NotExpanded,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownNode`] if `id` is not in this tree.
    pub fn node(&self, id: NodeId) -> Result<&Node, crate::Error> {
        self.nodes
            .get(id.index())
            .ok_or(crate::Error::UnknownNode { id: id.index() })
    }

    pub fn state(&self, id: NodeId) -> Result<&State, crate::Error> {
        self.node(id).map(Node::state)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, crate::Error> {
        self.node(id).map(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&Children, crate::Error> {
        self.node(id).map(Node::children)
    }

    pub fn child_count(&self, id: NodeId) -> Result<usize, crate::Error> {
        self.node(id).map(Node::child_count)
    }

    /// All nodes with their ids, in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeId::new(i), node))
    }

    /// Generate (once) and return the children of `id`.
    ///
    /// A terminal state gets [`Children::Terminal`]. Calling this again on an
    /// expanded node returns the stored children unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownNode`] if `id` is not in this tree.
    pub fn generate_successors(&mut self, id: NodeId) -> Result<&Children, crate::Error> {
        self.node(id)?;
        Ok(self.expand_node(id))
    }

    // `id` must be in the arena.
    fn expand_node(&mut self, id: NodeId) -> &Children {
        let node = &self.nodes[id.index()];
        if !node.children.is_expanded() {
            let parent_state = node.state;
            let children = match generate_successors(&parent_state) {
                Successors::Terminal => Children::Terminal,
                Successors::States(states) => {
                    let first = self.nodes.len();
                    let ids = (first..first + states.len()).map(NodeId::new).collect();
                    self.nodes.extend(states.into_iter().map(|state| Node {
                        state,
                        parent: Some(id),
                        children: Children::NotExpanded,
                    }));
                    Children::Expanded(ids)
                }
            };
            trace!(
                node = %id,
                depth = parent_state.move_count(),
                children = children.ids().len(),
                "expanded node"
            );
            self.nodes[id.index()].children = children;
        }
        &self.nodes[id.index()].children
    }

    /// Expand every reachable node, optionally stopping at `max_depth`.
    ///
    /// Nodes whose move count is at least `max_depth` are left unexpanded.
    /// Breadth-first and depth-first orders build the same tree; only the
    /// arena order of the nodes differs.
    #[instrument(skip(self))]
    pub fn expand(&mut self, order: Traversal, max_depth: Option<usize>) -> ExpansionStats {
        let mut frontier: VecDeque<NodeId> = self
            .iter()
            .filter(|(_, node)| !node.children.is_expanded())
            .map(|(id, _)| id)
            .collect();

        loop {
            let next = match order {
                Traversal::BreadthFirst => frontier.pop_front(),
                Traversal::DepthFirst => frontier.pop_back(),
            };
            let Some(id) = next else {
                break;
            };
            if max_depth.is_some_and(|limit| self.nodes[id.index()].depth() >= limit) {
                continue;
            }
            frontier.extend(self.expand_node(id).ids().iter().copied());
        }

        let stats = self.stats();
        info!(
            nodes = stats.total_nodes(),
            x_wins = stats.x_wins,
            o_wins = stats.o_wins,
            draws = stats.draws,
            "expansion finished"
        );
        stats
    }

    /// Count nodes by depth and outcome.
    pub fn stats(&self) -> ExpansionStats {
        let mut stats = ExpansionStats::default();
        for node in &self.nodes {
            stats.nodes_per_depth[node.depth()] += 1;
            if node.children.is_expanded() {
                stats.expanded += 1;
            } else if !node.state.is_terminal() {
                stats.unexpanded += 1;
            }
            if node.state.is_terminal() {
                match node.state.winner() {
                    Some(Player::X) => stats.x_wins += 1,
                    Some(Player::O) => stats.o_wins += 1,
                    None => stats.draws += 1,
                }
            }
        }
        stats
    }

    /// Ids from `id` up to the root, inclusive of both.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownNode`] if `id` is not in this tree.
    pub fn path_to_root(&self, id: NodeId) -> Result<Vec<NodeId>, crate::Error> {
        let mut path = vec![id];
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            path.push(parent);
            current = self.node(parent)?;
        }
        Ok(path)
    }

    /// The cells played from the root down to `id`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownNode`] if `id` is not in this tree.
    pub fn moves_from_root(&self, id: NodeId) -> Result<Vec<Coord>, crate::Error> {
        let path = self.path_to_root(id)?;
        let moves = path
            .windows(2)
            .rev()
            .filter_map(|pair| {
                let child = &self.nodes[pair[0].index()].state;
                let parent = &self.nodes[pair[1].index()].state;
                parent.move_to(child)
            })
            .collect();
        Ok(moves)
    }

    /// Flat, serializable view of every node.
    pub fn records(&self) -> Vec<NodeRecord> {
        self.iter()
            .map(|(id, node)| NodeRecord {
                id,
                parent: node.parent,
                depth: node.depth(),
                board: node.state.board().encode(),
                has_winner: node.state.has_winner(),
                children: match &node.children {
                    Children::NotExpanded => None,
                    expanded => Some(expanded.ids().len()),
                },
            })
            .collect()
    }
}

impl Default for GameTree {
    fn default() -> Self {
        Self::new()
    }
}

/// One exported row per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub board: String,
    pub has_winner: bool,
    /// `None` when the node was never expanded
    pub children: Option<usize>,
}
