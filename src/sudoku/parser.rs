#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Reading Sudoku collections from text.
//!
//! A puzzle file holds one puzzle per line. Blank lines and lines starting
//! with `#` or `c` are skipped. A line without whitespace is read one
//! character per cell (`1`-`9`, with `0` or `.` for an empty cell); a line
//! with whitespace is read as n² numbers, `0` for an empty cell. Either way
//! the number of cells must be the square of a supported side.

use crate::sudoku::board::{Board, Size};
use crate::sudoku::solver::{BoardError, Sudoku};
use std::path::Path;

/// Failure to read a puzzle file.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ParseError {
    /// The file could not be read.
    #[display("unable to read puzzle file: {_0}")]
    #[from]
    Io(std::io::Error),
    /// A character that is neither a digit nor an empty-cell marker.
    #[display("line {line}: invalid character {ch:?} at column {column}")]
    InvalidCharacter {
        /// Line number, from 1.
        line: usize,
        /// Column of the character, from 1.
        column: usize,
        /// The offending character.
        ch: char,
    },
    /// A whitespace-separated token that is not a number.
    #[display("line {line}: invalid number {token:?}")]
    InvalidNumber {
        /// Line number, from 1.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// The cell count is not the square of a supported side.
    #[display("line {line}: {len} cells do not form a supported board")]
    UnsupportedLength {
        /// Line number, from 1.
        line: usize,
        /// Number of cells found.
        len: usize,
    },
    /// The cells parse but the board is not a valid puzzle.
    #[display("line {line}: {source}")]
    Board {
        /// Line number, from 1.
        line: usize,
        /// Why the board was rejected.
        source: BoardError,
    },
}

/// Parses every puzzle in the file at `path`.
///
/// # Errors
///
/// [`ParseError::Io`] if the file cannot be read, otherwise the first line
/// that fails to parse.
pub fn parse_sudoku_file(path: impl AsRef<Path>) -> Result<Vec<Sudoku>, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse_sudokus(&text)
}

/// Parses every puzzle in `text`.
///
/// # Errors
///
/// The first line that fails to parse, numbered from 1.
pub fn parse_sudokus(text: &str) -> Result<Vec<Sudoku>, ParseError> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !(line.is_empty() || line.starts_with('#') || line.starts_with('c')))
        .map(|(number, line)| parse_line(line, number))
        .collect()
}

/// Parses one puzzle line. `number` is only used in errors.
///
/// # Errors
///
/// See [`ParseError`].
pub fn parse_line(line: &str, number: usize) -> Result<Sudoku, ParseError> {
    let cells = if line.contains(char::is_whitespace) {
        line.split_whitespace()
            .map(|token| {
                token.parse().map_err(|_| ParseError::InvalidNumber {
                    line: number,
                    token: token.to_owned(),
                })
            })
            .collect::<Result<Vec<usize>, _>>()?
    } else {
        line.chars()
            .enumerate()
            .map(|(i, ch)| match ch {
                '.' => Ok(0),
                _ => ch
                    .to_digit(10)
                    .map(|d| d as usize)
                    .ok_or(ParseError::InvalidCharacter {
                        line: number,
                        column: i + 1,
                        ch,
                    }),
            })
            .collect::<Result<Vec<usize>, _>>()?
    };

    let size = Size::from_cells(cells.len()).ok_or(ParseError::UnsupportedLength {
        line: number,
        len: cells.len(),
    })?;
    let board = Board::new(cells.chunks(size.side()).map(<[usize]>::to_vec).collect());
    Sudoku::new(board).map_err(|source| ParseError::Board {
        line: number,
        source,
    })
}

/// Picks `amount` distinct boards uniformly at random.
///
/// When `amount` covers the whole collection every board is returned, in
/// the original order. Otherwise the boards come in the order drawn.
pub fn sample_boards<T>(mut boards: Vec<T>, amount: usize, rng: &mut fastrand::Rng) -> Vec<T> {
    if amount >= boards.len() {
        return boards;
    }
    let mut chosen = Vec::with_capacity(amount);
    for _ in 0..amount {
        let index = rng.usize(..boards.len());
        chosen.push(boards.swap_remove(index));
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sudoku::board::{EXAMPLE_FOUR, EXAMPLE_NINE};

    const NINE_LINE: &str =
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79";

    #[test]
    fn test_parse_character_line() {
        let sudoku = parse_line(NINE_LINE, 1).unwrap();
        assert_eq!(sudoku.board, Board::from(EXAMPLE_NINE));
        assert_eq!(sudoku.to_line(), NINE_LINE);
    }

    #[test]
    fn test_zero_means_empty() {
        let zeros = NINE_LINE.replace('.', "0");
        assert_eq!(parse_line(&zeros, 1).unwrap().board, Board::from(EXAMPLE_NINE));
    }

    #[test]
    fn test_parse_number_line() {
        let line = "1 0 0 0 0 4 0 2 2 0 4 0 0 0 0 1";
        let sudoku = parse_line(line, 1).unwrap();
        assert_eq!(sudoku.board, Board::from(EXAMPLE_FOUR));
        assert_eq!(sudoku.size, Size::Four);
    }

    #[test]
    fn test_parse_sixteen_numbers() {
        let line = (0..256).map(|i| if i == 17 { "16" } else { "0" }).collect::<Vec<_>>().join(" ");
        let sudoku = parse_line(&line, 1).unwrap();
        assert_eq!(sudoku.size, Size::Sixteen);
        assert_eq!(sudoku.board[(1, 1)], 16);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let text = format!("# collection\nc another comment\n\n{NINE_LINE}\n  \n{NINE_LINE}\n");
        let sudokus = parse_sudokus(&text).unwrap();
        assert_eq!(sudokus.len(), 2);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let text = format!("# header\n{NINE_LINE}\n53..x");
        assert!(matches!(
            parse_sudokus(&text),
            Err(ParseError::InvalidCharacter {
                line: 3,
                column: 5,
                ch: 'x'
            })
        ));

        assert!(matches!(
            parse_line("1 2 three 4", 7),
            Err(ParseError::InvalidNumber { line: 7, .. })
        ));
        assert!(matches!(
            parse_line("1234", 2),
            Err(ParseError::UnsupportedLength { line: 2, len: 4 })
        ));
        assert!(matches!(
            parse_line("1 0 0 0 0 4 0 2 2 0 4 0 0 0 0 7", 4),
            Err(ParseError::Board {
                line: 4,
                source: BoardError::ValueOutOfRange { value: 7, .. }
            })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            parse_sudoku_file("/nonexistent/puzzles.sudoku"),
            Err(ParseError::Io(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let err = parse_line("12x4", 9).unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 9: invalid character 'x' at column 3"
        );
    }

    #[test]
    fn test_sample_all_keeps_order() {
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(sample_boards(vec![1, 2, 3], 3, &mut rng), vec![1, 2, 3]);
        assert_eq!(sample_boards(vec![1, 2, 3], 10, &mut rng), vec![1, 2, 3]);
    }

    #[test]
    fn test_sample_picks_distinct_boards() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut picked = sample_boards((0..20).collect(), 5, &mut rng);
        assert_eq!(picked.len(), 5);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|&b| b < 20));
    }

    #[test]
    fn test_sample_is_reproducible_with_seed() {
        let first = sample_boards((0..50).collect::<Vec<_>>(), 4, &mut fastrand::Rng::with_seed(3));
        let second = sample_boards((0..50).collect::<Vec<_>>(), 4, &mut fastrand::Rng::with_seed(3));
        assert_eq!(first, second);
    }

    #[test]
    fn test_sample_none() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(sample_boards(vec![1, 2, 3], 0, &mut rng).is_empty());
    }
}
