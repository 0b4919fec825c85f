#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The contract between the search engine and a puzzle domain.
//!
//! A domain describes its puzzle as an exact cover instance: every
//! [`Action`] it can take is one row of the [`SparseMatrix`] it produces, and
//! every constraint an action satisfies is one column, identified by a string
//! key. The engine never interprets keys, it only hands them back to the
//! domain to rebuild actions.

use crate::dlx::matrix::SparseMatrix;
use crate::dlx::node::NodeId;
use smallvec::SmallVec;
use std::fmt::{Debug, Display};

/// The constraint keys an action satisfies. Sudoku actions satisfy exactly
/// four, which fits inline.
pub type ConstraintKeys = SmallVec<[String; 4]>;

/// A single move in a puzzle domain, equivalent to one matrix row.
pub trait Action: Clone + Debug + Display + PartialEq {
    /// Every constraint key this action satisfies.
    fn constraint_keys(&self) -> ConstraintKeys;

    /// Whether the action lies within the domain's ranges.
    ///
    /// The engine never rejects invalid actions. The check exists for callers
    /// constructing actions by hand.
    fn is_valid(&self) -> bool;
}

/// A puzzle expressed as an exact cover problem.
///
/// Implementations are plain values: the search clones a problem to replay a
/// candidate solution, and compares problems structurally with `PartialEq`.
pub trait Problem: Clone + PartialEq {
    /// The move type of this domain.
    type Action: Action;

    /// Builds a fresh matrix with one column per constraint and one row per
    /// candidate action. Calling it twice yields identical matrices.
    fn produce_matrix(&self) -> SparseMatrix;

    /// The fixed actions of the initial state (e.g. the givens of a Sudoku).
    fn initial_actions(&self) -> Vec<Self::Action>;

    /// Applies `action` to the state.
    ///
    /// # Returns
    ///
    /// `false`, leaving the state unchanged, when the action is illegal in the
    /// current state.
    fn apply_action(&mut self, action: &Self::Action) -> bool;

    /// Whether every constraint of the problem is satisfied.
    fn is_goal(&self) -> bool;

    /// Rebuilds an action from the constraint keys it satisfies, in any order.
    ///
    /// # Returns
    ///
    /// `None` when the keys do not describe an action of this domain.
    fn action_from_keys(&self, keys: &[&str]) -> Option<Self::Action>;

    /// A deep copy of the state, used to replay solutions.
    #[must_use]
    fn clone_state(&self) -> Self {
        self.clone()
    }

    /// Rebuilds the action a matrix row stands for by reading the keys of
    /// every column the row touches.
    fn action_from_row(&self, matrix: &SparseMatrix, node: NodeId) -> Option<Self::Action> {
        let keys: SmallVec<[&str; 4]> = matrix.row_keys(node).collect();
        self.action_from_keys(&keys)
    }
}
