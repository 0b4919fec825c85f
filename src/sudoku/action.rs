#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Placing one digit in one cell.
//!
//! A placement satisfies four constraints, each named by a key with 1-based
//! numbers:
//!
//! | constraint          | key        |
//! |---------------------|------------|
//! | cell is filled      | `R{r}C{c}` |
//! | row holds digit     | `R{r}#{d}` |
//! | column holds digit  | `C{c}#{d}` |
//! | box holds digit     | `B{b}#{d}` |

use crate::dlx::problem::{Action, ConstraintKeys};
use crate::sudoku::board::Size;
use smallvec::{SmallVec, smallvec};
use std::fmt::{Display, Formatter};

/// Writes `value` into the cell at row-major index `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SudokuAction {
    /// Row-major index of the cell.
    pub position: usize,
    /// The digit, from 1 to the side of the board.
    pub value: usize,
    /// Size of the board the action belongs to.
    pub size: Size,
}

impl SudokuAction {
    /// Places `value` at row-major index `position`.
    #[must_use]
    pub const fn new(position: usize, value: usize, size: Size) -> Self {
        Self {
            position,
            value,
            size,
        }
    }

    /// The action writing `value` at `(row, col)`, both 0-based.
    #[must_use]
    pub const fn at(row: usize, col: usize, value: usize, size: Size) -> Self {
        Self::new(row * size.side() + col, value, size)
    }

    /// 0-based row of the target cell.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.position / self.size.side()
    }

    /// 0-based column of the target cell.
    #[must_use]
    pub const fn col(&self) -> usize {
        self.position % self.size.side()
    }

    /// 0-based box of the target cell.
    #[must_use]
    pub const fn box_index(&self) -> usize {
        self.size.box_of(self.row(), self.col())
    }

    /// Parses the keys of a placement back into the placement.
    ///
    /// The keys may come in any order. Only the cell key and one digit key
    /// are required; every key given must agree with the others.
    ///
    /// # Returns
    ///
    /// `None` if a key is malformed, the keys disagree, or the cell or digit
    /// cannot be determined.
    #[must_use]
    pub fn from_keys(keys: &[&str], size: Size) -> Option<Self> {
        let mut row = None;
        let mut col = None;
        let mut value = None;
        let mut boxed = None;

        for key in keys {
            match key_fields(key)?.as_slice() {
                &[('R', r), ('C', c)] => {
                    agree(&mut row, r)?;
                    agree(&mut col, c)?;
                }
                &[('R', r), ('#', d)] => {
                    agree(&mut row, r)?;
                    agree(&mut value, d)?;
                }
                &[('C', c), ('#', d)] => {
                    agree(&mut col, c)?;
                    agree(&mut value, d)?;
                }
                &[('B', b), ('#', d)] => {
                    agree(&mut boxed, b)?;
                    agree(&mut value, d)?;
                }
                _ => return None,
            }
        }

        let (row, col, value) = (row?.checked_sub(1)?, col?.checked_sub(1)?, value?);
        if row >= size.side() || col >= size.side() {
            return None;
        }
        if boxed.is_some_and(|b| b != size.box_of(row, col) + 1) {
            return None;
        }
        Some(Self::at(row, col, value, size))
    }
}

/// Stores `value` in `slot`, failing if the slot already holds another value.
fn agree(slot: &mut Option<usize>, value: usize) -> Option<()> {
    match *slot {
        Some(existing) if existing != value => None,
        _ => {
            *slot = Some(value);
            Some(())
        }
    }
}

/// Splits a key such as `R12C3` into `[('R', 12), ('C', 3)]`.
fn key_fields(key: &str) -> Option<SmallVec<[(char, usize); 2]>> {
    let mut fields = SmallVec::new();
    let mut rest = key;
    while let Some(tag) = rest.chars().next() {
        rest = &rest[tag.len_utf8()..];
        let digits = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        fields.push((tag, rest[..digits].parse().ok()?));
        rest = &rest[digits..];
    }
    Some(fields)
}

impl Action for SudokuAction {
    fn constraint_keys(&self) -> ConstraintKeys {
        let (r, c, b, d) = (
            self.row() + 1,
            self.col() + 1,
            self.box_index() + 1,
            self.value,
        );
        smallvec![
            format!("R{r}C{c}"),
            format!("R{r}#{d}"),
            format!("C{c}#{d}"),
            format!("B{b}#{d}"),
        ]
    }

    fn is_valid(&self) -> bool {
        self.position < self.size.cells() && (1..=self.size.side()).contains(&self.value)
    }
}

impl Display for SudokuAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.position, self.value)
    }
}
