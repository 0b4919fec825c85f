#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Counters collected during one search.

use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Map key for the number of columns plus row nodes of the matrix.
pub const TORSIZE: &str = "torsize";
/// Map key for the number of initial actions.
pub const INITIAL_CONSTRAINTS: &str = "numberinitialconstraints";
/// Map key for the number of nodes touched while covering during search.
pub const NODES_EXPLORED: &str = "nodesexplored";
/// Map key for the wall-clock time of the solve, in milliseconds.
pub const ELAPSED_TIME: &str = "elapsedtime";

/// Statistics of a single search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    /// Columns plus row nodes of the matrix before anything was covered.
    pub torsize: usize,
    /// Number of actions the problem reported as its initial state.
    pub initial_constraints: usize,
    /// Nodes touched by cover operations during the search. Covering the
    /// initial constraints is not counted.
    pub nodes_explored: usize,
    /// Wall-clock time of the whole solve.
    pub elapsed: Duration,
    /// Initial constraint keys that named no live column.
    pub skipped_constraints: usize,
    /// Whether the search stopped because it ran out of budget.
    pub aborted: bool,
    /// Whether a verified solution was found. An already solved problem
    /// counts as solved with zero actions.
    pub solved: bool,
}

impl Metrics {
    /// The four headline counters keyed by their canonical names.
    #[must_use]
    pub fn as_map(&self) -> BTreeMap<&'static str, u64> {
        let elapsed = u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX);
        BTreeMap::from([
            (TORSIZE, self.torsize as u64),
            (INITIAL_CONSTRAINTS, self.initial_constraints as u64),
            (NODES_EXPLORED, self.nodes_explored as u64),
            (ELAPSED_TIME, elapsed),
        ])
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let line = self
            .as_map()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .join(", ");
        write!(f, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_map_has_exactly_four_counters() {
        let metrics = Metrics {
            torsize: 10,
            initial_constraints: 2,
            nodes_explored: 7,
            elapsed: Duration::from_millis(15),
            skipped_constraints: 1,
            aborted: true,
            solved: false,
        };
        let map = metrics.as_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map[TORSIZE], 10);
        assert_eq!(map[INITIAL_CONSTRAINTS], 2);
        assert_eq!(map[NODES_EXPLORED], 7);
        assert_eq!(map[ELAPSED_TIME], 15);
    }

    #[test]
    fn test_display_is_sorted_by_key() {
        let metrics = Metrics {
            torsize: 3,
            ..Metrics::default()
        };
        assert_eq!(
            metrics.to_string(),
            "elapsedtime=0, nodesexplored=0, numberinitialconstraints=0, torsize=3"
        );
    }
}
