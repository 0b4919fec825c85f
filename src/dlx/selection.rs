#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for picking the column to branch on.
//!
//! Every strategy returns [`SENTINEL`] once the header ring is empty, which is
//! how the search recognises that all constraints are satisfied.

use crate::dlx::column::SENTINEL;
use crate::dlx::matrix::SparseMatrix;
use crate::dlx::node::ColumnId;
use clap::ValueEnum;
use std::fmt::Display;

/// Picks the next column to cover.
pub trait ColumnSelection {
    /// Returns a live column, or [`SENTINEL`] if none is left.
    fn select(&self, matrix: &SparseMatrix) -> ColumnId;
}

/// Minimum remaining values: the live column with the fewest rows.
///
/// Only a strictly smaller size replaces the current best, so ties go to the
/// column met first in ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MinimumRemaining;

impl ColumnSelection for MinimumRemaining {
    fn select(&self, matrix: &SparseMatrix) -> ColumnId {
        let mut best = SENTINEL;
        let mut best_size = usize::MAX;
        for column in matrix.live_columns() {
            let size = matrix.column(column).size();
            if size < best_size {
                best = column;
                best_size = size;
                if size == 0 {
                    break;
                }
            }
        }
        best
    }
}

/// The leftmost live column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FirstColumn;

impl ColumnSelection for FirstColumn {
    fn select(&self, matrix: &SparseMatrix) -> ColumnId {
        matrix.live_columns().next().unwrap_or(SENTINEL)
    }
}

/// Closed set of the selection strategies, for choosing one at run time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSelectionImpls {
    /// See [`MinimumRemaining`].
    MinimumRemaining(MinimumRemaining),
    /// See [`FirstColumn`].
    FirstColumn(FirstColumn),
}

impl Default for ColumnSelectionImpls {
    fn default() -> Self {
        Self::MinimumRemaining(MinimumRemaining)
    }
}

impl ColumnSelection for ColumnSelectionImpls {
    fn select(&self, matrix: &SparseMatrix) -> ColumnId {
        match self {
            Self::MinimumRemaining(s) => s.select(matrix),
            Self::FirstColumn(s) => s.select(matrix),
        }
    }
}

/// Enum representing the column selection strategy to use.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash, Default, ValueEnum)]
pub enum ColumnSelectionType {
    /// Branch on the column with the fewest remaining rows.
    #[default]
    MinimumRemaining,
    /// Branch on the leftmost remaining column.
    FirstColumn,
}

impl Display for ColumnSelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MinimumRemaining => write!(f, "Minimum Remaining Values"),
            Self::FirstColumn => write!(f, "First Column"),
        }
    }
}

impl ColumnSelectionType {
    /// Converts the `ColumnSelectionType` to a concrete `ColumnSelectionImpls`.
    #[must_use]
    pub const fn to_impl(self) -> ColumnSelectionImpls {
        match self {
            Self::MinimumRemaining => ColumnSelectionImpls::MinimumRemaining(MinimumRemaining),
            Self::FirstColumn => ColumnSelectionImpls::FirstColumn(FirstColumn),
        }
    }
}
