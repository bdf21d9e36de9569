//! Game states and successor generation

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Player},
    lines::{LineAnalyzer, completes_line},
    symmetry::equivalent,
};
use crate::types::Coord;

/// One board position plus the metadata needed to know who produced it and
/// whether play can continue.
///
/// States are immutable once built: a new state is produced by
/// [`State::apply_move`], which copies the board and places one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    board: Board,
    move_count: u8,
    last_mover: Option<Player>,
    has_winner: bool,
}

/// Result of expanding a single state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Successors {
    /// The state is won or full; play does not continue.
    Terminal,
    /// One representative per symmetry class, in row-major order of the move
    /// that produced it.
    States(Vec<State>),
}

impl Successors {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Successors::Terminal)
    }

    /// The generated states, empty for a terminal result.
    pub fn states(&self) -> &[State] {
        match self {
            Successors::Terminal => &[],
            Successors::States(states) => states,
        }
    }

    pub fn len(&self) -> usize {
        self.states().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states().is_empty()
    }
}

impl State {
    /// The empty starting position, X to move.
    pub const fn root() -> Self {
        State {
            board: Board::new(),
            move_count: 0,
            last_mover: None,
            has_winner: false,
        }
    }

    /// Build a state from an arbitrary reachable-looking board.
    ///
    /// The last mover is inferred from piece counts (X opens) and the win flag
    /// is computed by scanning every line for that player.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::InvalidPieceCounts`] if X neither equals O nor leads
    ///   by one
    /// - [`crate::Error::UnreachableBoard`] if the side that did not make the
    ///   last move holds a line, since play would have stopped there
    pub fn from_board(board: Board) -> Result<Self, crate::Error> {
        let count = board.count_pieces();
        let last_mover = if count.x == count.o + 1 {
            Some(Player::X)
        } else if count.x == count.o && count.x > 0 {
            Some(Player::O)
        } else if count.x == 0 && count.o == 0 {
            None
        } else {
            return Err(crate::Error::InvalidPieceCounts {
                x_count: count.x,
                o_count: count.o,
            });
        };

        if let Some(earlier) = last_mover
            .map(Player::opponent)
            .filter(|&p| LineAnalyzer::has_won(&board, p))
        {
            return Err(crate::Error::UnreachableBoard { player: earlier });
        }

        Ok(State {
            board,
            move_count: (count.x + count.o) as u8,
            last_mover,
            has_winner: last_mover.is_some_and(|p| LineAnalyzer::has_won(&board, p)),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of occupied cells
    pub fn move_count(&self) -> usize {
        self.move_count as usize
    }

    /// Side whose move produced this state; `None` at the root.
    pub fn last_mover(&self) -> Option<Player> {
        self.last_mover
    }

    /// Side to move next
    pub fn to_move(&self) -> Player {
        match self.last_mover {
            Some(player) => player.opponent(),
            None => Player::X,
        }
    }

    /// Whether the move that produced this state completed a line.
    pub fn has_winner(&self) -> bool {
        self.has_winner
    }

    /// The winner, if the producing move won.
    pub fn winner(&self) -> Option<Player> {
        self.last_mover.filter(|_| self.has_winner)
    }

    /// Won or full
    pub fn is_terminal(&self) -> bool {
        self.has_winner || self.move_count == 9
    }

    /// Place the side-to-move's mark at `coord`.
    ///
    /// The win flag is decided from the lines through `coord` alone.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::GameOver`] if this state is terminal
    /// - [`crate::Error::CellOccupied`] if `coord` already holds a mark
    #[must_use = "apply_move returns a new state; the original is unchanged"]
    pub fn apply_move(&self, coord: Coord) -> Result<State, crate::Error> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        if !self.board.is_empty_at(coord) {
            return Err(crate::Error::CellOccupied {
                row: coord.row(),
                col: coord.col(),
            });
        }

        let mover = self.to_move();
        let mark = mover.to_cell();
        let mut board = self.board;
        board.set(coord, mark);

        Ok(State {
            board,
            move_count: self.move_count + 1,
            last_mover: Some(mover),
            has_winner: completes_line(&board, coord, mark),
        })
    }

    /// [`State::apply_move`] with raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] for coordinates outside the grid,
    /// otherwise the errors of [`State::apply_move`].
    #[must_use = "apply_move_at returns a new state; the original is unchanged"]
    pub fn apply_move_at(&self, row: usize, col: usize) -> Result<State, crate::Error> {
        self.apply_move(Coord::new(row, col)?)
    }

    /// Equality of boards up to the symmetries of the square.
    ///
    /// Metadata (move count, movers, win flag) is not consulted.
    pub fn equivalent(&self, other: &State) -> bool {
        equivalent(&self.board, &other.board)
    }

    /// The cell that differs between this state and a successor.
    pub fn move_to(&self, successor: &State) -> Option<Coord> {
        Coord::all().find(|&c| self.board[c] != successor.board[c])
    }
}

impl Default for State {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// Expand `state` into one successor per symmetry class.
///
/// Empty cells are tried in row-major order; a candidate is kept only when no
/// already kept sibling is [`equivalent`] to it. States from different parents
/// are never compared.
///
/// # Examples
///
/// ```
/// use symtree::tictactoe::{State, generate_successors};
///
/// let first_moves = generate_successors(&State::root());
/// // corner, edge, center
/// assert_eq!(first_moves.len(), 3);
/// ```
pub fn generate_successors(state: &State) -> Successors {
    if state.is_terminal() {
        return Successors::Terminal;
    }

    let mut accepted: Vec<State> = Vec::new();
    for coord in state.board.empty_coords() {
        // Only empty cells of a live state are offered, so this cannot fail.
        let Ok(candidate) = state.apply_move(coord) else {
            continue;
        };
        if !accepted.iter().any(|kept| kept.equivalent(&candidate)) {
            accepted.push(candidate);
        }
    }

    Successors::States(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Cell;

    fn coord(row: usize, col: usize) -> Coord {
        Coord::new(row, col).unwrap()
    }

    fn play(moves: &[(usize, usize)]) -> State {
        moves.iter().fold(State::root(), |state, &(r, c)| {
            state.apply_move_at(r, c).unwrap()
        })
    }

    #[test]
    fn test_root() {
        let root = State::root();
        assert_eq!(root.move_count(), 0);
        assert_eq!(root.last_mover(), None);
        assert_eq!(root.to_move(), Player::X);
        assert!(!root.has_winner());
        assert!(!root.is_terminal());
    }

    #[test]
    fn test_apply_move() {
        let state = State::root().apply_move(coord(1, 1)).unwrap();
        assert_eq!(state.board()[coord(1, 1)], Cell::X);
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.last_mover(), Some(Player::X));
        assert_eq!(state.to_move(), Player::O);

        let result = state.apply_move(coord(1, 1));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("occupied"));
    }

    #[test]
    fn test_apply_move_out_of_bounds() {
        let err = State::root().apply_move_at(0, 3).unwrap_err();
        assert!(matches!(err, crate::Error::OutOfBounds { row: 0, col: 3 }));
    }

    #[test]
    fn test_win_detection_row() {
        // X: (0,0) (0,1) (0,2); O: (1,0) (1,1)
        let state = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(state.has_winner());
        assert_eq!(state.winner(), Some(Player::X));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_win_detection_diagonal() {
        let state = play(&[(0, 0), (0, 1), (1, 1), (0, 2), (2, 2)]);
        assert!(state.has_winner());
        assert!(state.is_terminal());
    }

    #[test]
    fn test_no_win_on_blocked_anti_diagonal() {
        // X . O / . X . / O . .  with O's last move at (2,0)
        let state = play(&[(0, 0), (0, 2), (1, 1), (2, 0)]);
        assert_eq!(state.board().encode(), "X.O.X.O..");
        assert_eq!(state.last_mover(), Some(Player::O));
        assert!(!state.has_winner());
    }

    #[test]
    fn test_draw() {
        let state = play(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (1, 2),
            (2, 2),
            (2, 1),
        ]);
        assert!(!state.has_winner());
        assert_eq!(state.move_count(), 9);
        assert!(state.is_terminal());
        assert_eq!(state.winner(), None);
    }

    #[test]
    fn test_no_moves_after_win() {
        let state = play(&[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
        assert!(matches!(
            state.apply_move_at(2, 2),
            Err(crate::Error::GameOver)
        ));
        assert!(generate_successors(&state).is_terminal());
    }

    #[test]
    fn test_root_has_three_classes() {
        let successors = generate_successors(&State::root());
        let boards: Vec<String> = successors
            .states()
            .iter()
            .map(|s| s.board().encode())
            .collect();
        assert_eq!(boards, vec!["X........", ".X.......", "....X...."]);
    }

    #[test]
    fn test_corner_opening_successors() {
        let corner = State::root().apply_move_at(0, 0).unwrap();
        let boards: Vec<String> = generate_successors(&corner)
            .states()
            .iter()
            .map(|s| s.board().encode())
            .collect();
        assert_eq!(
            boards,
            vec!["XO.......", "X.O......", "X...O....", "X....O...", "X.......O"]
        );
    }

    #[test]
    fn test_center_opening_has_two_replies() {
        let center = State::root().apply_move_at(1, 1).unwrap();
        assert_eq!(generate_successors(&center).len(), 2);
    }

    #[test]
    fn test_from_board() {
        let board = Board::from_string("XXX/OO./...").unwrap();
        let state = State::from_board(board).unwrap();
        assert_eq!(state.move_count(), 5);
        assert_eq!(state.last_mover(), Some(Player::X));
        assert!(state.has_winner());

        let root = State::from_board(Board::new()).unwrap();
        assert_eq!(root, State::root());
    }

    #[test]
    fn test_from_board_rejects_play_after_a_win() {
        // O completed the top row, then X moved anyway
        let board = Board::from_string("OOO/XX./XX.").unwrap();
        assert!(matches!(
            State::from_board(board),
            Err(crate::Error::UnreachableBoard { player: Player::O })
        ));

        // both sides hold a line
        let board = Board::from_string("XXX/OOO/...").unwrap();
        assert!(matches!(
            State::from_board(board),
            Err(crate::Error::UnreachableBoard { player: Player::X })
        ));

        // a fork that completes two lines at once is still a legal finish
        let board = Board::from_string("XXX/OXO/XOO").unwrap();
        let state = State::from_board(board).unwrap();
        assert_eq!(state.winner(), Some(Player::X));
        assert!(generate_successors(&state).is_terminal());
    }

    #[test]
    fn test_move_to() {
        let root = State::root();
        let next = root.apply_move_at(2, 1).unwrap();
        assert_eq!(root.move_to(&next), Some(coord(2, 1)));
        assert_eq!(next.move_to(&next), None);
    }
}
