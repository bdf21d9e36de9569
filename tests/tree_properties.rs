//! Test suite for successor generation and the game tree
//! Validates the tree invariants on generated states

use symtree::{
    Coord,
    tictactoe::{
        Board, Children, GameTree, Player, State, Successors, Traversal, equivalent,
        generate_successors,
    },
};

/// Tree expanded far enough to contain every kind of node but cheap to sweep
fn shallow_tree() -> GameTree {
    let mut tree = GameTree::new();
    tree.expand(Traversal::BreadthFirst, Some(6));
    tree
}

fn state_from(board: &str) -> State {
    State::from_board(Board::from_string(board).unwrap()).unwrap()
}

mod terminal_stability {
    use super::*;

    #[test]
    fn terminal_states_have_no_successors() {
        let mut tree = GameTree::new();
        tree.expand(Traversal::DepthFirst, None);

        let mut terminal = 0;
        for (id, node) in tree.iter() {
            let state = node.state();
            if state.has_winner() || state.move_count() == 9 {
                terminal += 1;
                assert_eq!(generate_successors(state), Successors::Terminal);
                assert_eq!(node.children(), &Children::Terminal, "node {id}");
                assert_eq!(node.child_count(), 0);
            } else {
                assert!(matches!(node.children(), Children::Expanded(ids) if !ids.is_empty()));
            }
        }
        assert_eq!(terminal, 13_957 + 8_005 + 4_868);
    }

    #[test]
    fn full_board_without_winner_is_terminal() {
        let state = state_from("XOX/XOO/OXX");
        assert!(!state.has_winner());
        assert_eq!(state.move_count(), 9);
        assert!(generate_successors(&state).is_terminal());
    }

    #[test]
    fn terminal_marker_differs_from_not_expanded() {
        let mut tree = GameTree::new();
        let root = tree.root();
        assert!(!tree.children(root).unwrap().is_expanded());
        tree.generate_successors(root).unwrap();
        assert!(tree.children(root).unwrap().is_expanded());
    }
}

mod conservation {
    use super::*;

    #[test]
    fn every_successor_adds_exactly_one_mark() {
        let tree = shallow_tree();
        for (_, node) in tree.iter() {
            let parent = node.state();
            for &child_id in node.children().ids() {
                let child = tree.state(child_id).unwrap();
                assert_eq!(child.move_count(), parent.move_count() + 1);
                assert_eq!(
                    child.board().occupied_count(),
                    parent.board().occupied_count() + 1
                );

                let changed: Vec<Coord> = Coord::all()
                    .filter(|&c| parent.board()[c] != child.board()[c])
                    .collect();
                assert_eq!(changed.len(), 1);
                assert!(parent.board().is_empty_at(changed[0]));
                assert_eq!(
                    child.board()[changed[0]],
                    parent.to_move().to_cell(),
                    "the side to move places the mark"
                );
            }
        }
    }

    #[test]
    fn players_alternate_down_the_tree() {
        let tree = shallow_tree();
        for (_, node) in tree.iter() {
            let state = node.state();
            let expected = match state.move_count() {
                0 => None,
                n if n % 2 == 1 => Some(Player::X),
                _ => Some(Player::O),
            };
            assert_eq!(state.last_mover(), expected);
        }
    }
}

mod sibling_dedup {
    use super::*;

    #[test]
    fn accepted_siblings_are_pairwise_distinct() {
        let tree = shallow_tree();
        for (_, node) in tree.iter() {
            let ids = node.children().ids();
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    let (a, b) = (tree.state(a).unwrap(), tree.state(b).unwrap());
                    assert!(!equivalent(a.board(), b.board()), "{a}\nvs\n{b}");
                }
            }
        }
    }

    #[test]
    fn every_rejected_move_has_a_representative() {
        let tree = shallow_tree();
        for (_, node) in tree.iter() {
            let state = node.state();
            if state.is_terminal() || !node.children().is_expanded() {
                continue;
            }
            let children: Vec<&State> = node
                .children()
                .ids()
                .iter()
                .map(|&id| tree.state(id).unwrap())
                .collect();

            for coord in state.board().empty_coords() {
                let candidate = state.apply_move(coord).unwrap();
                assert!(
                    children.iter().any(|child| child.equivalent(&candidate)),
                    "move {coord} from\n{state}\nhas no representative"
                );
            }
        }
    }

    #[test]
    fn first_occupant_in_row_major_order_wins() {
        let corner = State::root().apply_move_at(0, 0).unwrap();
        let successors = generate_successors(&corner);
        let moves: Vec<Coord> = successors
            .states()
            .iter()
            .filter_map(|child| corner.move_to(child))
            .collect();
        let expected: Vec<Coord> = [(0, 1), (0, 2), (1, 1), (1, 2), (2, 2)]
            .into_iter()
            .map(|(r, c)| Coord::new(r, c).unwrap())
            .collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn dedup_is_local_to_siblings() {
        // X corner, O edge, X center and X center, O edge, X corner reach the
        // same board from different parents.
        let mut tree = GameTree::new();
        tree.expand(Traversal::BreadthFirst, Some(3));

        let depth_two: Vec<&State> = tree
            .iter()
            .map(|(_, node)| node.state())
            .filter(|s| s.move_count() == 2)
            .collect();
        let symmetric_cousins = depth_two.iter().enumerate().any(|(i, a)| {
            depth_two[i + 1..].iter().any(|b| a.equivalent(b))
        });
        assert!(!symmetric_cousins, "depth 2 has a single parent per class");

        let depth_three: Vec<&State> = tree
            .iter()
            .map(|(_, node)| node.state())
            .filter(|s| s.move_count() == 3)
            .collect();
        let symmetric_cousins = depth_three.iter().enumerate().any(|(i, a)| {
            depth_three[i + 1..].iter().any(|b| a.equivalent(b))
        });
        assert!(symmetric_cousins, "cousins are not merged");
    }
}

mod win_detection {
    use super::*;

    #[test]
    fn top_row_completed_at_corner() {
        // X X X / O O . / . . .
        let state = State::root()
            .apply_move_at(0, 0)
            .and_then(|s| s.apply_move_at(1, 0))
            .and_then(|s| s.apply_move_at(0, 1))
            .and_then(|s| s.apply_move_at(1, 1))
            .and_then(|s| s.apply_move_at(0, 2))
            .unwrap();
        assert_eq!(state.last_mover(), Some(Player::X));
        assert!(state.has_winner());
    }

    #[test]
    fn main_diagonal_completed_at_corner() {
        // X O O / . X . / . . X
        let state = State::root()
            .apply_move_at(0, 0)
            .and_then(|s| s.apply_move_at(0, 1))
            .and_then(|s| s.apply_move_at(1, 1))
            .and_then(|s| s.apply_move_at(0, 2))
            .and_then(|s| s.apply_move_at(2, 2))
            .unwrap();
        assert!(state.has_winner());
        assert_eq!(state.winner(), Some(Player::X));
    }

    #[test]
    fn corner_move_without_line() {
        // X . O / . X . / O . .  with O's last move at (2,0)
        let state = State::root()
            .apply_move_at(0, 0)
            .and_then(|s| s.apply_move_at(0, 2))
            .and_then(|s| s.apply_move_at(1, 1))
            .and_then(|s| s.apply_move_at(2, 0))
            .unwrap();
        assert_eq!(state.last_mover(), Some(Player::O));
        assert!(!state.has_winner());
    }

    #[test]
    fn literal_boards_checked_from_the_last_cell() {
        use symtree::tictactoe::{Cell::*, completes_line};

        let top_row = Board::from_rows([[X, X, X], [Empty, Empty, Empty], [Empty, Empty, Empty]]);
        assert!(completes_line(&top_row, Coord::new(0, 2).unwrap(), X));

        let diagonal = Board::from_rows([[X, Empty, Empty], [Empty, X, Empty], [Empty, Empty, X]]);
        assert!(completes_line(&diagonal, Coord::new(2, 2).unwrap(), X));

        let no_line = Board::from_rows([[X, Empty, O], [Empty, X, Empty], [O, Empty, Empty]]);
        assert!(!completes_line(&no_line, Coord::new(2, 0).unwrap(), O));
    }

    #[test]
    fn local_flag_matches_full_scan_across_tree() {
        let tree = shallow_tree();
        for (_, node) in tree.iter() {
            let state = node.state();
            let scanned = state.last_mover().is_some_and(|p| {
                symtree::tictactoe::LineAnalyzer::has_won(state.board(), p)
            });
            assert_eq!(state.has_winner(), scanned, "\n{state}");
        }
    }
}

mod root_expansion {
    use super::*;

    #[test]
    fn empty_board_has_three_symmetry_classes() {
        let successors = generate_successors(&State::root());
        assert_eq!(successors.len(), 3);

        let classes: Vec<_> = successors
            .states()
            .iter()
            .map(|s| {
                let coord = State::root().move_to(s).unwrap();
                symtree::tictactoe::CellClass::of(coord)
            })
            .collect();
        use symtree::tictactoe::CellClass::*;
        assert_eq!(classes, vec![Corner, Edge, Center]);
    }

    #[test]
    fn all_nine_openings_fall_into_those_classes() {
        let reps = generate_successors(&State::root());
        for coord in Coord::all() {
            let opening = State::root().apply_move(coord).unwrap();
            let matches = reps
                .states()
                .iter()
                .filter(|rep| rep.equivalent(&opening))
                .count();
            assert_eq!(matches, 1, "opening at {coord}");
        }
    }
}

mod traversal_order {
    use super::*;

    #[test]
    fn breadth_and_depth_first_build_the_same_tree() {
        let mut bfs = GameTree::new();
        let bfs_stats = bfs.expand(Traversal::BreadthFirst, None);
        let mut dfs = GameTree::new();
        let dfs_stats = dfs.expand(Traversal::DepthFirst, None);

        assert_eq!(bfs_stats, dfs_stats);

        let mut bfs_boards: Vec<Board> = bfs.iter().map(|(_, n)| *n.state().board()).collect();
        let mut dfs_boards: Vec<Board> = dfs.iter().map(|(_, n)| *n.state().board()).collect();
        bfs_boards.sort();
        dfs_boards.sort();
        assert_eq!(bfs_boards, dfs_boards);
    }

    #[test]
    fn full_tree_passes_audit() {
        let mut tree = GameTree::new();
        tree.expand(Traversal::BreadthFirst, None);
        let report = tree.audit();
        assert_eq!(report.nodes_checked, 58_524);
        assert!(report.is_clean(), "{:?}", &report.violations[..5.min(report.violations.len())]);
    }
}

mod errors {
    use super::*;

    #[test]
    fn occupied_cell_is_rejected() {
        let state = State::root().apply_move_at(1, 1).unwrap();
        let err = state.apply_move_at(1, 1).unwrap_err();
        assert!(matches!(err, symtree::Error::CellOccupied { row: 1, col: 1 }));
    }

    #[test]
    fn out_of_grid_coordinates_are_rejected() {
        let err = State::root().apply_move_at(3, 0).unwrap_err();
        assert!(matches!(err, symtree::Error::OutOfBounds { row: 3, col: 0 }));
        assert!(Coord::new(0, 9).is_err());
    }

    #[test]
    fn unknown_node_is_rejected() {
        let tree = GameTree::new();
        let mut other = GameTree::new();
        other.expand(Traversal::BreadthFirst, Some(1));
        let (foreign, _) = other.iter().last().unwrap();
        assert!(tree.node(foreign).is_err());
        assert!(tree.path_to_root(foreign).is_err());
    }
}
