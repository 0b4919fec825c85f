#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Sudoku grids and their sizes.

use std::ops::{Index, IndexMut};

/// An n×n grid of digits, `0` marking an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board(Vec<Vec<usize>>);

impl Board {
    /// Wraps a grid given row by row.
    #[must_use]
    pub const fn new(board: Vec<Vec<usize>>) -> Self {
        Self(board)
    }

    /// An empty board of the given size.
    #[must_use]
    pub fn empty(size: Size) -> Self {
        let n = size.side();
        Self(vec![vec![0; n]; n])
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the board has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Every cell in row-major order as `(row, col, value)`, 0-based.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.0.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &value)| (r, c, value))
        })
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn givens(&self) -> usize {
        self.cells().filter(|&(_, _, value)| value != 0).count()
    }
}

impl Index<(usize, usize)> for Board {
    type Output = usize;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.0[row][col]
    }
}

impl IndexMut<(usize, usize)> for Board {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        &mut self.0[row][col]
    }
}

impl From<Vec<Vec<usize>>> for Board {
    fn from(board: Vec<Vec<usize>>) -> Self {
        Self::new(board)
    }
}

impl From<Board> for Vec<Vec<usize>> {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl<const N: usize> From<[[usize; N]; N]> for Board {
    fn from(board: [[usize; N]; N]) -> Self {
        Self::new(board.iter().map(|r| r.to_vec()).collect())
    }
}

impl<const N: usize> From<&[[usize; N]; N]> for Board {
    fn from(board: &[[usize; N]; N]) -> Self {
        Self::new(board.iter().map(|r| r.to_vec()).collect())
    }
}

/// The supported board sizes.
#[derive(Debug, Clone, PartialEq, Eq, Copy, PartialOrd, Ord, Hash)]
pub enum Size {
    /// 4x4, boxes of 2x2.
    Four = 4,
    /// 9x9, boxes of 3x3.
    Nine = 9,
    /// 16x16, boxes of 4x4.
    Sixteen = 16,
    /// 25x25, boxes of 5x5.
    TwentyFive = 25,
}

impl TryFrom<usize> for Size {
    type Error = usize;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            9 => Ok(Self::Nine),
            16 => Ok(Self::Sixteen),
            25 => Ok(Self::TwentyFive),
            _ => Err(value),
        }
    }
}

impl From<Size> for usize {
    fn from(size: Size) -> Self {
        size.side()
    }
}

impl Size {
    /// Number of cells along one side of the board.
    #[must_use]
    pub const fn side(self) -> usize {
        self as usize
    }

    /// Number of cells along one side of a box.
    #[must_use]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Four => 2,
            Self::Nine => 3,
            Self::Sixteen => 4,
            Self::TwentyFive => 5,
        }
    }

    /// Number of cells on the board.
    #[must_use]
    pub const fn cells(self) -> usize {
        self.side() * self.side()
    }

    /// The 0-based box containing `(row, col)`, numbered row-major.
    #[must_use]
    pub const fn box_of(self, row: usize, col: usize) -> usize {
        let block = self.block_size();
        (row / block) * block + col / block
    }

    /// The size whose board has `cells` cells.
    #[must_use]
    pub fn from_cells(cells: usize) -> Option<Self> {
        [Self::Four, Self::Nine, Self::Sixteen, Self::TwentyFive]
            .into_iter()
            .find(|size| size.cells() == cells)
    }
}

/// A 4x4 puzzle with a unique solution.
pub const EXAMPLE_FOUR: [[usize; 4]; 4] = [[1, 0, 0, 0], [0, 4, 0, 2], [2, 0, 4, 0], [0, 0, 0, 1]];

/// A classic 9x9 puzzle.
pub const EXAMPLE_NINE: [[usize; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// The unique solution of [`EXAMPLE_NINE`].
pub const EXAMPLE_NINE_SOLUTION: [[usize; 9]; 9] = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

/// A 16x16 puzzle.
pub const EXAMPLE_SIXTEEN: [[usize; 16]; 16] = [
    [0, 11, 0, 0, 0, 2, 3, 14, 0, 0, 9, 12, 0, 0, 0, 16],
    [15, 12, 0, 0, 0, 11, 0, 1, 13, 10, 0, 0, 0, 0, 7, 2],
    [0, 0, 10, 0, 0, 0, 0, 0, 16, 11, 0, 1, 6, 4, 12, 3],
    [0, 16, 14, 1, 0, 4, 0, 6, 0, 3, 0, 15, 0, 8, 0, 0],
    [1, 6, 5, 12, 0, 0, 11, 0, 0, 9, 8, 0, 0, 0, 0, 0],
    [0, 0, 0, 7, 14, 1, 8, 0, 0, 15, 6, 0, 13, 5, 0, 4],
    [4, 15, 8, 0, 9, 13, 0, 0, 0, 0, 7, 16, 3, 0, 0, 0],
    [0, 9, 13, 0, 0, 0, 0, 15, 10, 0, 0, 0, 7, 6, 0, 11],
    [14, 0, 6, 11, 0, 0, 0, 12, 7, 0, 0, 0, 0, 3, 13, 0],
    [0, 0, 0, 5, 8, 14, 0, 0, 0, 0, 13, 11, 0, 1, 2, 6],
    [13, 0, 16, 4, 0, 15, 5, 0, 0, 1, 12, 6, 8, 0, 0, 0],
    [0, 0, 0, 0, 0, 16, 10, 0, 0, 8, 0, 0, 11, 9, 4, 5],
    [0, 0, 11, 0, 1, 0, 14, 0, 5, 0, 3, 0, 15, 7, 16, 0],
    [5, 13, 15, 3, 16, 0, 4, 7, 0, 0, 0, 0, 0, 2, 0, 0],
    [16, 1, 0, 0, 0, 0, 12, 2, 14, 0, 15, 0, 0, 0, 3, 8],
    [9, 0, 0, 0, 13, 5, 0, 0, 8, 6, 16, 0, 0, 0, 10, 0],
];
