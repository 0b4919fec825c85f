#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Knuth's Algorithm X over a [`SparseMatrix`].
//!
//! A solve runs in three phases:
//!
//! 1. The constraints satisfied by the problem's initial actions are covered,
//!    so the search only sees what is left to decide.
//! 2. The recursive search picks a column, covers it, and tries each of its
//!    rows in turn until the header ring is empty.
//! 3. The actions that emptied the ring are replayed on a copy of the problem.
//!    Only if that copy reaches its goal is the sequence returned.
//!
//! Every cover made during the search is undone before the search returns,
//! and the initial covers are undone last, so the matrix is handed back in
//! the state it was built in.

use crate::dlx::column::SENTINEL;
use crate::dlx::matrix::SparseMatrix;
use crate::dlx::metrics::Metrics;
use crate::dlx::node::ColumnId;
use crate::dlx::problem::{Action, Problem};
use crate::dlx::selection::{ColumnSelection, ColumnSelectionImpls};
use log::{debug, trace, warn};
use std::time::Instant;

/// Bounds on the work a single search may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchLimits {
    /// Abandon the search once more than this many nodes have been touched.
    pub max_nodes: Option<usize>,
}

/// Run-time configuration of a [`SearchEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchOptions {
    /// How to pick the column to branch on.
    pub selection: ColumnSelectionImpls,
    /// Budget of the search.
    pub limits: SearchLimits,
}

/// Solves [`Problem`]s with Dancing Links.
///
/// The engine keeps the [`Metrics`] of the last solve.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine<S: ColumnSelection = ColumnSelectionImpls> {
    selection: S,
    limits: SearchLimits,
    metrics: Metrics,
}

impl SearchEngine {
    /// Creates an engine with minimum remaining values selection and no
    /// limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine from run-time options.
    #[must_use]
    pub fn from_options(options: SearchOptions) -> Self {
        Self::with_selection(options.selection, options.limits)
    }
}

impl<S: ColumnSelection> SearchEngine<S> {
    /// Creates an engine with a specific selection strategy.
    #[must_use]
    pub fn with_selection(selection: S, limits: SearchLimits) -> Self {
        Self {
            selection,
            limits,
            metrics: Metrics::default(),
        }
    }

    /// The metrics of the most recent solve.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Solves `problem` on a freshly produced matrix.
    ///
    /// # Returns
    ///
    /// The actions that complete the problem, in the order they were chosen.
    /// The list is empty when no solution exists, when the search ran out of
    /// budget, or when the initial state is already solved; the metrics tell
    /// these apart.
    pub fn solve<P: Problem>(&mut self, problem: &P) -> Vec<P::Action> {
        let mut matrix = problem.produce_matrix();
        self.solve_with_matrix(problem, &mut matrix)
    }

    /// Solves `problem` on a caller-provided matrix.
    ///
    /// `matrix` must be the matrix `problem` produces, or one equivalent to
    /// it. It is returned in the state it was passed in.
    pub fn solve_with_matrix<P: Problem>(
        &mut self,
        problem: &P,
        matrix: &mut SparseMatrix,
    ) -> Vec<P::Action> {
        let start = Instant::now();
        self.metrics = Metrics::default();

        let (columns, nodes) = matrix.size();
        self.metrics.torsize = columns + nodes;

        let initial = problem.initial_actions();
        self.metrics.initial_constraints = initial.len();
        let pre_covered = self.cover_initial(&initial, matrix);
        debug!(
            "covered {} initial constraints from {} actions",
            pre_covered.len(),
            initial.len()
        );

        let mut search = Search {
            matrix,
            problem,
            selection: &self.selection,
            limits: self.limits,
            actions: Vec::new(),
            solution: Vec::new(),
            nodes_explored: 0,
            aborted: false,
        };
        let solved = search.search(0);
        let Search {
            matrix,
            solution,
            nodes_explored,
            aborted,
            ..
        } = search;

        for column in pre_covered.into_iter().rev() {
            matrix.uncover(column);
        }

        self.metrics.nodes_explored = nodes_explored;
        self.metrics.aborted = aborted;
        self.metrics.solved = solved;
        self.metrics.elapsed = start.elapsed();
        debug!(
            "search finished: solved={solved} aborted={aborted} actions={} {}",
            solution.len(),
            self.metrics
        );
        solution
    }

    /// Covers the column of every key of every initial action.
    ///
    /// # Returns
    ///
    /// The covered columns, in the order they were covered.
    fn cover_initial<A: Action>(
        &mut self,
        initial: &[A],
        matrix: &mut SparseMatrix,
    ) -> Vec<ColumnId> {
        let mut covered = Vec::new();
        for action in initial {
            for key in action.constraint_keys() {
                if let Some(column) = matrix.get_column(&key) {
                    matrix.cover(column);
                    covered.push(column);
                } else {
                    self.metrics.skipped_constraints += 1;
                    if matrix.contains_key(&key) {
                        debug!("initial action {action} repeats covered constraint {key}");
                    } else {
                        warn!("initial action {action} names unknown constraint {key}");
                    }
                }
            }
        }
        covered
    }
}

/// State of one recursive search.
struct Search<'a, P: Problem, S> {
    matrix: &'a mut SparseMatrix,
    problem: &'a P,
    selection: &'a S,
    limits: SearchLimits,
    /// The actions of the current branch.
    actions: Vec<P::Action>,
    solution: Vec<P::Action>,
    nodes_explored: usize,
    aborted: bool,
}

impl<P: Problem, S: ColumnSelection> Search<'_, P, S> {
    /// Searches below the current partial solution.
    ///
    /// # Returns
    ///
    /// Whether a verified solution was found. The matrix is restored either
    /// way.
    fn search(&mut self, depth: usize) -> bool {
        if self
            .limits
            .max_nodes
            .is_some_and(|max| self.nodes_explored > max)
        {
            if !self.aborted {
                debug!("node budget exhausted at depth {depth}");
            }
            self.aborted = true;
            return false;
        }

        let column = self.selection.select(self.matrix);
        if column == SENTINEL {
            return self.accept();
        }
        trace!("depth {depth}: branching on {}", self.matrix.column(column));

        self.nodes_explored += self.matrix.cover(column);

        let header = self.matrix.column(column).node();
        let mut found = false;
        let mut row = self.matrix.node(header).down;
        while row != header && !found && !self.aborted {
            if let Some(action) = self.problem.action_from_row(self.matrix, row) {
                self.actions.push(action);
                self.nodes_explored += self.matrix.cover_row(row);
                found = self.search(depth + 1);
                self.matrix.uncover_row(row);
                self.actions.pop();
            } else {
                warn!(
                    "row {:?} does not describe an action, skipping it",
                    self.matrix.row_keys(row).collect::<Vec<_>>()
                );
            }
            row = self.matrix.node(row).down;
        }

        self.matrix.uncover(column);
        found
    }

    /// Replays the current branch on a copy of the problem and keeps it as
    /// the solution if that copy ends up solved.
    fn accept(&mut self) -> bool {
        let mut replay = self.problem.clone_state();
        for action in &self.actions {
            if !replay.apply_action(action) {
                debug!("replaying {action} was rejected, discarding the cover");
                self.solution.clear();
                return false;
            }
        }

        if replay.is_goal() {
            self.solution.clone_from(&self.actions);
            true
        } else {
            debug!(
                "discarding a complete cover of {} actions that does not solve the problem",
                self.actions.len()
            );
            self.solution.clear();
            false
        }
    }
}
