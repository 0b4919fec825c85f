#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading exact cover instances from `.xc` files.
//!
//! ```text
//! # Knuth's example
//! columns: A B C D E F G
//! r1: C E F
//! r2: A D G
//! r3: B C F
//! fixed: r1
//! ```
//!
//! The `columns:` line must come before any subset. The `fixed:` line is
//! optional. Blank lines and lines starting with `#` are skipped.

use crate::subsets::problem::{SubsetError, SubsetProblem};
use std::path::Path;

/// Failure to read an exact cover file.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CoverParseError {
    /// The file could not be read.
    #[display("unable to read cover file: {_0}")]
    #[from]
    Io(std::io::Error),
    /// A line has no `:` or nothing before it.
    #[display("line {line}: expected `name: items`")]
    MissingSeparator {
        /// Line number, from 1.
        line: usize,
    },
    /// A second `columns:` line.
    #[display("line {line}: columns declared twice")]
    DuplicateColumns {
        /// Line number, from 1.
        line: usize,
    },
    /// A subset line before `columns:`.
    #[display("line {line}: subset declared before the columns")]
    MissingColumns {
        /// Line number, from 1.
        line: usize,
    },
    /// The file never declares its columns.
    #[display("no columns declared")]
    NoColumns,
    /// The lines parse but do not describe a consistent instance.
    #[display("{_0}")]
    #[from]
    Invalid(SubsetError),
}

/// Parses the exact cover instance in the file at `path`.
///
/// # Errors
///
/// [`CoverParseError::Io`] if the file cannot be read, otherwise see
/// [`parse_cover`].
pub fn parse_cover_file(path: impl AsRef<Path>) -> Result<SubsetProblem, CoverParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_cover(&text)
}

/// Parses an exact cover instance.
///
/// # Errors
///
/// A [`CoverParseError`] for malformed lines, or
/// [`CoverParseError::Invalid`] when the instance itself is inconsistent.
pub fn parse_cover(text: &str) -> Result<SubsetProblem, CoverParseError> {
    let mut columns: Option<Vec<&str>> = None;
    let mut subsets: Vec<(&str, Vec<&str>)> = Vec::new();
    let mut fixed: Vec<&str> = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = i + 1;
        let (name, rest) = line
            .split_once(':')
            .ok_or(CoverParseError::MissingSeparator { line: number })?;
        let values: Vec<&str> = rest.split_whitespace().collect();

        match name.trim() {
            "columns" => {
                if columns.replace(values).is_some() {
                    return Err(CoverParseError::DuplicateColumns { line: number });
                }
            }
            "fixed" => fixed.extend(values),
            "" => return Err(CoverParseError::MissingSeparator { line: number }),
            subset => {
                if columns.is_none() {
                    return Err(CoverParseError::MissingColumns { line: number });
                }
                subsets.push((subset, values));
            }
        }
    }

    let columns = columns.ok_or(CoverParseError::NoColumns)?;
    Ok(SubsetProblem::new(columns, subsets, fixed)?)
}
