#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku puzzles of side 4, 9, 16 and 25, solved as exact cover problems.

/// A single digit placement.
pub mod action;
/// Grids, sizes and sample puzzles.
pub mod board;
/// Reading puzzle collections and sampling from them.
pub mod parser;
/// The `Sudoku` problem type.
pub mod solver;

pub use action::SudokuAction;
pub use board::{Board, Size};
pub use parser::{ParseError, parse_sudoku_file, sample_boards};
pub use solver::{BoardError, Sudoku};
