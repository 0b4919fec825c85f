#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Dancing Links: Knuth's Algorithm X on a toroidal sparse matrix.
//!
//! The building blocks, leaf first:
//!
//! - [`node`]: the arena of four-way linked nodes and the O(1) detach and
//!   reattach operations.
//! - [`column`]: header metadata (key and live size).
//! - [`matrix`]: the sparse matrix, its construction and queries.
//! - [`cover`]: covering and uncovering columns.
//! - [`selection`]: choosing the column to branch on.
//! - [`problem`]: the traits a puzzle domain implements.
//! - [`search`]: the engine tying it all together, reporting [`metrics`].

pub mod column;
pub mod cover;
pub mod matrix;
pub mod metrics;
pub mod node;
pub mod problem;
pub mod search;
pub mod selection;

pub use matrix::SparseMatrix;
pub use metrics::Metrics;
pub use problem::{Action, Problem};
pub use search::{SearchEngine, SearchLimits, SearchOptions};
pub use selection::{ColumnSelection, ColumnSelectionImpls, ColumnSelectionType};
