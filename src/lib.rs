#![deny(missing_docs)]
//! This crate provides an exact cover solver based on Dancing Links, together
//! with the puzzle domains it ships with.

/// The `dlx` module implements the Dancing Links search engine and the
/// traits a puzzle domain implements to use it.
pub mod dlx;

/// The `problems` module dispatches between the puzzle domains at run time.
pub mod problems;

/// The `subsets` module implements generic exact cover instances given as
/// named subsets of named items.
pub mod subsets;

/// The `sudoku` module implements Sudoku of sizes 4, 9, 16 and 25 as an exact
/// cover problem.
pub mod sudoku;
