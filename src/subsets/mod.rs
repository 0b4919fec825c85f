#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Generic exact cover instances given as named subsets of named items.

/// Reading `.xc` files.
pub mod parser;
/// The `SubsetProblem` type.
pub mod problem;

pub use parser::{CoverParseError, parse_cover, parse_cover_file};
pub use problem::{SubsetAction, SubsetError, SubsetProblem};
