#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku as an exact cover problem.
//!
//! An n×n Sudoku has 4n² constraints: every cell holds one digit, and every
//! row, column and box holds every digit once. Each of the n³ candidate
//! placements satisfies exactly one constraint of each kind.

use crate::dlx::matrix::SparseMatrix;
use crate::dlx::problem::{Action, Problem};
use crate::sudoku::action::SudokuAction;
use crate::sudoku::board::{Board, Size};
use itertools::Itertools;
use rustc_hash::FxHashSet;
use std::fmt::{Display, Formatter};

/// Reasons a [`Board`] is not a Sudoku.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The side is not 4, 9, 16 or 25.
    #[display("unsupported board size: {size}")]
    UnsupportedSize {
        /// Number of rows found.
        size: usize,
    },
    /// A row whose length differs from the number of rows.
    #[display("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        /// Row number, from 1.
        row: usize,
        /// Cells in that row.
        len: usize,
        /// Cells every row should have.
        expected: usize,
    },
    /// A digit larger than the side.
    #[display("value {value} at row {row}, column {col} is out of range")]
    ValueOutOfRange {
        /// Row number, from 1.
        row: usize,
        /// Column number, from 1.
        col: usize,
        /// The offending digit.
        value: usize,
    },
}

/// A Sudoku puzzle in some state of completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sudoku {
    /// The current grid.
    pub board: Board,
    /// Size of the grid.
    pub size: Size,
}

impl Sudoku {
    /// Wraps `board`, checking that it is square, of a supported size and
    /// holds no digit larger than its side.
    ///
    /// # Errors
    ///
    /// A [`BoardError`] describing the first problem found.
    pub fn new(board: Board) -> Result<Self, BoardError> {
        let side = board.len();
        let size = Size::try_from(side).map_err(|size| BoardError::UnsupportedSize { size })?;
        for (row, cells) in board.rows().enumerate() {
            if cells.len() != side {
                return Err(BoardError::RaggedRow {
                    row: row + 1,
                    len: cells.len(),
                    expected: side,
                });
            }
        }
        if let Some((row, col, value)) = board.cells().find(|&(_, _, value)| value > side) {
            return Err(BoardError::ValueOutOfRange {
                row: row + 1,
                col: col + 1,
                value,
            });
        }
        Ok(Self { board, size })
    }

    /// Every constraint key, in column order.
    pub fn constraint_keys(&self) -> impl Iterator<Item = String> + use<> {
        let n = self.size.side();
        let pairs = move || (1..=n).cartesian_product(1..=n);
        pairs()
            .map(|(r, c)| format!("R{r}C{c}"))
            .chain(pairs().map(|(r, d)| format!("R{r}#{d}")))
            .chain(pairs().map(|(c, d)| format!("C{c}#{d}")))
            .chain(pairs().map(|(b, d)| format!("B{b}#{d}")))
    }

    /// Every candidate placement, cell by cell in row-major order and digit
    /// ascending within a cell.
    pub fn candidates(&self) -> impl Iterator<Item = SudokuAction> + use<> {
        let size = self.size;
        (0..size.cells())
            .cartesian_product(1..=size.side())
            .map(move |(position, value)| SudokuAction::new(position, value, size))
    }

    /// Whether `action` can be played now: it is valid for this size, its
    /// cell is empty and its digit is absent from the cell's row, column and
    /// box.
    #[must_use]
    pub fn is_legal(&self, action: &SudokuAction) -> bool {
        if action.size != self.size || !action.is_valid() {
            return false;
        }
        let (row, col, value) = (action.row(), action.col(), action.value);
        if self.board[(row, col)] != 0 {
            return false;
        }
        let n = self.size.side();
        let block = self.size.block_size();
        let (top, left) = (row - row % block, col - col % block);
        let in_row = (0..n).any(|c| self.board[(row, c)] == value);
        let in_col = (0..n).any(|r| self.board[(r, col)] == value);
        let in_box = (top..top + block)
            .cartesian_product(left..left + block)
            .any(|cell| self.board[cell] == value);
        !(in_row || in_col || in_box)
    }

    /// Every placement that [`Sudoku::is_legal`] accepts on the current
    /// board, in candidate order.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<SudokuAction> {
        self.candidates().filter(|action| self.is_legal(action)).collect()
    }

    /// Whether every cell is filled.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.board.cells().all(|(_, _, value)| value != 0)
    }

    /// Whether no row, column or box repeats a digit. Empty cells are ignored.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.board.cells().all(|(r, c, value)| {
            value == 0
                || (seen.insert(('R', r, value))
                    && seen.insert(('C', c, value))
                    && seen.insert(('B', self.size.box_of(r, c), value)))
        })
    }

    /// The board as a single line: one character per cell for sizes up to
    /// 9 (`.` for empty), whitespace-separated numbers otherwise.
    #[must_use]
    pub fn to_line(&self) -> String {
        if self.size <= Size::Nine {
            self.board
                .cells()
                .map(|(_, _, value)| {
                    char::from_digit(u32::try_from(value).unwrap_or(0), 10)
                        .filter(|_| value != 0)
                        .unwrap_or('.')
                })
                .collect()
        } else {
            self.board.cells().map(|(_, _, value)| value).join(" ")
        }
    }
}

impl TryFrom<Board> for Sudoku {
    type Error = BoardError;

    fn try_from(board: Board) -> Result<Self, Self::Error> {
        Self::new(board)
    }
}

impl From<Sudoku> for Board {
    fn from(sudoku: Sudoku) -> Self {
        sudoku.board
    }
}

impl Problem for Sudoku {
    type Action = SudokuAction;

    fn produce_matrix(&self) -> SparseMatrix {
        let mut matrix = SparseMatrix::with_columns(self.constraint_keys());
        for action in self.candidates() {
            matrix.build_row(action.constraint_keys());
        }
        matrix
    }

    fn initial_actions(&self) -> Vec<SudokuAction> {
        self.board
            .cells()
            .filter(|&(_, _, value)| value != 0)
            .map(|(row, col, value)| SudokuAction::at(row, col, value, self.size))
            .collect()
    }

    fn apply_action(&mut self, action: &SudokuAction) -> bool {
        if !self.is_legal(action) {
            return false;
        }
        self.board[(action.row(), action.col())] = action.value;
        true
    }

    fn is_goal(&self) -> bool {
        self.is_full() && self.is_consistent()
    }

    fn action_from_keys(&self, keys: &[&str]) -> Option<SudokuAction> {
        SudokuAction::from_keys(keys, self.size)
    }
}

impl Display for Sudoku {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let n = self.size.side();
        let block = self.size.block_size();
        let width = n.to_string().len();
        let separator = (0..block)
            .map(|_| "-".repeat(block * (width + 1) + 1))
            .join("+");

        for (r, row) in self.board.rows().enumerate() {
            if r > 0 && r % block == 0 {
                writeln!(f, "{separator}")?;
            }
            let line = row
                .chunks(block)
                .map(|chunk| {
                    let cells = chunk
                        .iter()
                        .map(|&value| {
                            if value == 0 {
                                format!("{:>width$}", ".")
                            } else {
                                format!("{value:>width$}")
                            }
                        })
                        .join(" ");
                    format!(" {cells} ")
                })
                .join("|");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dlx::search::SearchEngine;
    use crate::sudoku::board::{EXAMPLE_FOUR, EXAMPLE_NINE, EXAMPLE_NINE_SOLUTION};

    fn sudoku<const N: usize>(board: [[usize; N]; N]) -> Sudoku {
        Sudoku::new(Board::from(board)).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_boards() {
        assert_eq!(
            Sudoku::new(Board::new(vec![vec![0; 5]; 5])),
            Err(BoardError::UnsupportedSize { size: 5 })
        );
        let mut ragged = vec![vec![0; 4]; 4];
        ragged[2].pop();
        assert_eq!(
            Sudoku::new(Board::new(ragged)),
            Err(BoardError::RaggedRow {
                row: 3,
                len: 3,
                expected: 4
            })
        );
        let mut big = [[0; 4]; 4];
        big[1][2] = 5;
        assert_eq!(
            Sudoku::new(Board::from(big)),
            Err(BoardError::ValueOutOfRange {
                row: 2,
                col: 3,
                value: 5
            })
        );
    }

    #[test]
    fn test_matrix_shape() {
        let puzzle = sudoku(EXAMPLE_NINE);
        let matrix = puzzle.produce_matrix();
        assert_eq!(matrix.size(), (4 * 81, 4 * 729));
        let keys: Vec<_> = matrix
            .live_columns()
            .take(2)
            .map(|c| matrix.column(c).key().to_owned())
            .collect();
        assert_eq!(keys, vec!["R1C1", "R1C2"]);
        assert!(matrix.live_columns().all(|c| matrix.column(c).size() == 9));
    }

    #[test]
    fn test_matrix_is_deterministic() {
        let puzzle = sudoku(EXAMPLE_FOUR);
        assert_eq!(puzzle.produce_matrix(), puzzle.produce_matrix());
    }

    #[test]
    fn test_first_row_is_first_candidate() {
        let puzzle = sudoku(EXAMPLE_FOUR);
        let matrix = puzzle.produce_matrix();
        let first = matrix.get_column("R1C1").unwrap();
        let node = matrix.column_nodes(first).next().unwrap();
        assert_eq!(
            puzzle.action_from_row(&matrix, node),
            Some(SudokuAction::new(0, 1, Size::Four))
        );
    }

    #[test]
    fn test_initial_actions_are_givens() {
        let puzzle = sudoku(EXAMPLE_FOUR);
        let actions = puzzle.initial_actions();
        assert_eq!(
            actions,
            vec![
                SudokuAction::new(0, 1, Size::Four),
                SudokuAction::new(5, 4, Size::Four),
                SudokuAction::new(7, 2, Size::Four),
                SudokuAction::new(8, 2, Size::Four),
                SudokuAction::new(10, 4, Size::Four),
                SudokuAction::new(15, 1, Size::Four),
            ]
        );
    }

    #[test]
    fn test_apply_action_rules() {
        let mut puzzle = sudoku(EXAMPLE_FOUR);
        // cell taken
        assert!(!puzzle.apply_action(&SudokuAction::new(0, 3, Size::Four)));
        // 1 already in row 0
        assert!(!puzzle.apply_action(&SudokuAction::new(1, 1, Size::Four)));
        // 4 already in column 1
        assert!(!puzzle.apply_action(&SudokuAction::new(13, 4, Size::Four)));
        // 4 already in the top-left box
        assert!(!puzzle.apply_action(&SudokuAction::new(4, 4, Size::Four)));
        // out of range
        assert!(!puzzle.apply_action(&SudokuAction::new(2, 9, Size::Four)));
        let before = puzzle.clone();
        assert_eq!(puzzle, before);

        assert!(puzzle.apply_action(&SudokuAction::new(1, 2, Size::Four)));
        assert_eq!(puzzle.board[(0, 1)], 2);
        assert_ne!(puzzle, before);
    }

    #[test]
    fn test_legal_moves() {
        let puzzle = sudoku(EXAMPLE_FOUR);
        let moves = puzzle.legal_moves();
        assert_eq!(moves.len(), 16);
        assert_eq!(
            moves[..3],
            [
                SudokuAction::new(1, 2, Size::Four),
                SudokuAction::new(1, 3, Size::Four),
                SudokuAction::new(2, 3, Size::Four),
            ]
        );
        assert!(moves.contains(&SudokuAction::new(14, 2, Size::Four)));
        assert!(!moves.contains(&SudokuAction::new(0, 3, Size::Four)));

        let mut replay = puzzle.clone_state();
        assert!(moves.iter().all(|action| replay.clone().apply_action(action)));
        assert!(replay.apply_action(&SudokuAction::new(2, 3, Size::Four)));
        assert_eq!(replay.legal_moves().len(), 11);

        assert!(sudoku(EXAMPLE_NINE_SOLUTION).legal_moves().is_empty());
    }

    #[test]
    fn test_is_goal() {
        assert!(sudoku(EXAMPLE_NINE_SOLUTION).is_goal());
        assert!(!sudoku(EXAMPLE_NINE).is_goal());

        let mut broken = EXAMPLE_NINE_SOLUTION;
        broken[0].swap(0, 1);
        assert!(!sudoku(broken).is_goal());
    }

    #[test]
    fn test_clone_state_is_independent() {
        let puzzle = sudoku(EXAMPLE_FOUR);
        let mut copy = puzzle.clone_state();
        assert_eq!(copy, puzzle);
        assert!(copy.apply_action(&SudokuAction::new(1, 2, Size::Four)));
        assert_ne!(copy, puzzle);
    }

    #[test]
    fn test_solve_unique_puzzle() {
        let puzzle = sudoku(EXAMPLE_NINE);
        let mut engine = SearchEngine::new();
        let actions = engine.solve(&puzzle);

        assert_eq!(actions.len(), 81 - 30);
        let mut replay = puzzle.clone_state();
        for action in &actions {
            assert!(replay.apply_action(action));
        }
        assert!(replay.is_goal());
        assert_eq!(replay, sudoku(EXAMPLE_NINE_SOLUTION));

        let metrics = engine.metrics();
        assert!(metrics.solved);
        assert_eq!(metrics.initial_constraints, 30);
        assert!(metrics.nodes_explored > 0);
        assert_eq!(metrics.skipped_constraints, 0);
    }

    #[test]
    fn test_solve_four_by_four() {
        let puzzle = sudoku(EXAMPLE_FOUR);
        let mut engine = SearchEngine::new();
        let actions = engine.solve(&puzzle);
        assert_eq!(actions.len(), 16 - 6);
        let mut replay = puzzle.clone_state();
        assert!(actions.iter().all(|action| replay.apply_action(action)));
        assert!(replay.is_goal());
    }

    #[test]
    fn test_solved_board_needs_no_actions() {
        let puzzle = sudoku(EXAMPLE_NINE_SOLUTION);
        let mut matrix = puzzle.produce_matrix();
        let mut engine = SearchEngine::new();
        let actions = engine.solve_with_matrix(&puzzle, &mut matrix);
        assert!(actions.is_empty());
        assert!(engine.metrics().solved);
        assert_eq!(engine.metrics().nodes_explored, 0);
        assert_eq!(engine.metrics().initial_constraints, 81);
    }

    #[test]
    fn test_pre_covering_a_solved_board_leaves_no_rows() {
        let puzzle = sudoku(EXAMPLE_NINE_SOLUTION);
        let mut matrix = puzzle.produce_matrix();
        for action in puzzle.initial_actions() {
            for key in action.constraint_keys() {
                let column = matrix.get_column(&key).unwrap();
                matrix.cover(column);
            }
        }
        assert_eq!(matrix.size(), (0, 0));
    }

    #[test]
    fn test_contradictory_puzzle_has_no_solution() {
        // both empty cells of the first row need a 4, the column forbids it
        let mut board = [[0; 4]; 4];
        board[0] = [1, 2, 0, 0];
        board[1][2] = 4;
        board[2][3] = 4;
        let puzzle = sudoku(board);
        let mut engine = SearchEngine::new();
        assert!(engine.solve(&puzzle).is_empty());
        assert!(!engine.metrics().solved);
        assert!(!engine.metrics().aborted);
    }

    #[test]
    fn test_conflicting_givens_are_skipped() {
        let mut board = [[0; 4]; 4];
        board[0][0] = 1;
        board[0][3] = 1;
        let puzzle = sudoku(board);
        let mut engine = SearchEngine::new();
        assert!(engine.solve(&puzzle).is_empty());
        assert_eq!(engine.metrics().skipped_constraints, 1);
    }

    #[test]
    fn test_torsize_matches_fresh_matrix() {
        let puzzle = sudoku(EXAMPLE_FOUR);
        let (columns, nodes) = puzzle.produce_matrix().size();
        let mut engine = SearchEngine::new();
        engine.solve(&puzzle);
        assert_eq!(engine.metrics().torsize, columns + nodes);
    }

    #[test]
    fn test_solve_with_matrix_restores_matrix() {
        let puzzle = sudoku(EXAMPLE_NINE);
        let mut matrix = puzzle.produce_matrix();
        let before = matrix.clone();
        SearchEngine::new().solve_with_matrix(&puzzle, &mut matrix);
        assert_eq!(matrix, before);
    }

    #[test]
    fn test_to_line() {
        assert_eq!(sudoku(EXAMPLE_FOUR).to_line(), "1....4.22.4....1");
    }

    #[test]
    fn test_display_grid() {
        let rendered = sudoku(EXAMPLE_FOUR).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], " 1 . | . . ");
        assert_eq!(lines[2], "-----+-----");
        assert_eq!(lines.len(), 5);
    }
}
