#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Run-time dispatch over every puzzle domain of the crate.
//!
//! [`ProblemImpls`] lets a single engine type solve a mixed collection of
//! puzzles, for example every file in a directory.

use crate::dlx::matrix::SparseMatrix;
use crate::dlx::problem::{Action, ConstraintKeys, Problem};
use crate::subsets::{SubsetAction, SubsetProblem};
use crate::sudoku::{Sudoku, SudokuAction};
use std::fmt::{Display, Formatter};

/// An action of any domain.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum ActionImpls {
    /// A digit placement.
    Sudoku(SudokuAction),
    /// A subset choice.
    Subsets(SubsetAction),
}

impl Action for ActionImpls {
    fn constraint_keys(&self) -> ConstraintKeys {
        match self {
            Self::Sudoku(a) => a.constraint_keys(),
            Self::Subsets(a) => a.constraint_keys(),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::Sudoku(a) => a.is_valid(),
            Self::Subsets(a) => a.is_valid(),
        }
    }
}

impl Display for ActionImpls {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sudoku(a) => Display::fmt(a, f),
            Self::Subsets(a) => Display::fmt(a, f),
        }
    }
}

/// A problem of any domain.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum ProblemImpls {
    /// A Sudoku puzzle.
    Sudoku(Sudoku),
    /// A subset instance.
    Subsets(SubsetProblem),
}

impl ProblemImpls {
    /// Short name of the domain, for reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Sudoku(_) => "sudoku",
            Self::Subsets(_) => "exact cover",
        }
    }
}

impl Problem for ProblemImpls {
    type Action = ActionImpls;

    fn produce_matrix(&self) -> SparseMatrix {
        match self {
            Self::Sudoku(p) => p.produce_matrix(),
            Self::Subsets(p) => p.produce_matrix(),
        }
    }

    fn initial_actions(&self) -> Vec<ActionImpls> {
        match self {
            Self::Sudoku(p) => p.initial_actions().into_iter().map(Into::into).collect(),
            Self::Subsets(p) => p.initial_actions().into_iter().map(Into::into).collect(),
        }
    }

    /// Actions of another domain are always illegal.
    fn apply_action(&mut self, action: &ActionImpls) -> bool {
        match (self, action) {
            (Self::Sudoku(p), ActionImpls::Sudoku(a)) => p.apply_action(a),
            (Self::Subsets(p), ActionImpls::Subsets(a)) => p.apply_action(a),
            _ => false,
        }
    }

    fn is_goal(&self) -> bool {
        match self {
            Self::Sudoku(p) => p.is_goal(),
            Self::Subsets(p) => p.is_goal(),
        }
    }

    fn action_from_keys(&self, keys: &[&str]) -> Option<ActionImpls> {
        match self {
            Self::Sudoku(p) => p.action_from_keys(keys).map(Into::into),
            Self::Subsets(p) => p.action_from_keys(keys).map(Into::into),
        }
    }
}
