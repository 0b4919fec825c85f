//! Argument parsing and the solve-and-report drivers of the `dlx` binary.

pub mod cli;
