#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! # dlx
//!
//! `dlx` is a command-line exact cover solver built on Dancing Links
//! (Knuth's Algorithm X on a toroidal sparse matrix).
//!
//! It solves two kinds of input:
//!
//! -   **Sudoku** files (`.sudoku`), one puzzle per line, of side 4, 9, 16 or 25.
//! -   **Subset instances** (`.xc`), naming the items to cover and the subsets
//!     that may cover them.
//!
//! ## Usage
//!
//! ```sh
//! dlx [OPTIONS] [PATH] [SUBCOMMAND]
//! ```
//!
//! Given only a path, `dlx` walks a directory, solves a `.xc` file as a subset
//! instance and reads anything else as a Sudoku file.
//!
//! ### Subcommands
//!
//! 1.  **`sudoku`**: Solve the puzzles of a Sudoku file, or a random sample.
//!     ```sh
//!     dlx sudoku --path puzzles.sudoku [-n COUNT] [--seed SEED] [OPTIONS]
//!     ```
//!
//! 2.  **`cover`**: Solve a subset instance.
//!     ```sh
//!     dlx cover --path knuth.xc [OPTIONS]
//!     ```
//!
//! 3.  **`dir`**: Solve every `.sudoku` and `.xc` file below a directory.
//!     ```sh
//!     dlx dir --path data [OPTIONS]
//!     ```
//!
//! 4.  **`completions`**: Print a shell completion script.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Log at debug level (default: `false`). `RUST_LOG` overrides.
//! -   `--verify <BOOL>`: Replay the solution on a fresh problem (default: `true`).
//! -   `--stats <BOOL>`: Print the statistics table (default: `true`).
//! -   `-p, --print-solution`: Print the filled grid or the chosen subsets.
//! -   `--selection <STRATEGY>`: `minimum-remaining` (default) or `first-column`.
//! -   `--max-nodes <N>`: Abandon a search after touching `N` matrix nodes.

mod command_line;

use crate::command_line::cli::{
    Cli, CliError, Commands, solve_cover_file, solve_dir, solve_path, solve_sudoku_file,
};
use clap::{CommandFactory, Parser};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let level = if cli.common().debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Some(Commands::Sudoku {
            path,
            count,
            seed,
            common,
        }) => solve_sudoku_file(&path, count, seed, &common),
        Some(Commands::Cover { path, common }) => solve_cover_file(&path, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "dlx", &mut std::io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) => solve_path(&path, &cli.common),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}
