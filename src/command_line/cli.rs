#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, Parser, Subcommand};
use dlx_solver::dlx::{ColumnSelectionType, Metrics, Problem, SearchEngine, SearchLimits, SearchOptions};
use dlx_solver::problems::{ActionImpls, ProblemImpls};
use dlx_solver::subsets::{CoverParseError, parse_cover_file};
use dlx_solver::sudoku::{ParseError, parse_sudoku_file, sample_boards};
use itertools::Itertools;
use log::{debug, info, warn};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

const MIB: f64 = 1024.0 * 1024.0;

/// Defines the command-line interface of the `dlx` binary.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "dlx", version, about = "An exact cover solver based on Dancing Links")]
pub(crate) struct Cli {
    /// An optional path. Without a subcommand, a directory is walked, a
    /// `.xc` file is solved as a subset instance and anything else is read
    /// as a Sudoku file.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `sudoku`, `cover`, `dir`).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable when no subcommand is given.
    #[command(flatten)]
    pub common: CommonOptions,
}

impl Cli {
    /// The options in effect for the chosen command.
    pub(crate) fn common(&self) -> &CommonOptions {
        match &self.command {
            Some(
                Commands::Sudoku { common, .. }
                | Commands::Cover { common, .. }
                | Commands::Dir { common, .. },
            ) => common,
            Some(Commands::Completions { .. }) | None => &self.common,
        }
    }
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve Sudoku puzzles, one per line of the file.
    Sudoku {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Solve only this many puzzles, drawn at random from the file.
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Seed for the random draw, for reproducible runs.
        #[arg(long)]
        seed: Option<u64>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve an exact cover instance given as named subsets (`.xc`).
    Cover {
        /// Path to the `.xc` file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` and `.xc` file below a directory.
    Dir {
        /// Path to the directory.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, providing more verbose logging during the solving process.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Replay the solution on a fresh copy of the problem and check it reaches the goal.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(long, action = ArgAction::Set, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the solution.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// How to pick the column to branch on.
    #[arg(long, value_enum, default_value_t = ColumnSelectionType::MinimumRemaining)]
    pub(crate) selection: ColumnSelectionType,

    /// Abandon a search after touching this many matrix nodes.
    #[arg(long)]
    pub(crate) max_nodes: Option<usize>,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
            print_solution: false,
            selection: ColumnSelectionType::default(),
            max_nodes: None,
        }
    }
}

impl CommonOptions {
    /// Converts the options into the configuration of the search engine.
    pub(crate) const fn search_options(&self) -> SearchOptions {
        SearchOptions {
            selection: self.selection.to_impl(),
            limits: SearchLimits {
                max_nodes: self.max_nodes,
            },
        }
    }
}

/// Everything that can make a command fail.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub(crate) enum CliError {
    #[display("error parsing Sudoku file: {_0}")]
    #[from]
    Sudoku(ParseError),
    #[display("error parsing cover file: {_0}")]
    #[from]
    Cover(CoverParseError),
    #[display("unable to read allocator statistics: {_0}")]
    #[from]
    Memory(#[error(not(source))] tikv_jemalloc_ctl::Error),
    #[display("{_0}")]
    #[from]
    Io(std::io::Error),
    #[display("provided path is not a file: {}", path.display())]
    NotAFile { path: PathBuf },
    #[display("provided path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },
    #[display("solution for {label} failed verification")]
    VerificationFailed { label: String },
}

/// Solves whatever `path` points at, judged by its kind and extension.
///
/// # Errors
///
/// See [`solve_dir`], [`solve_cover_file`] and [`solve_sudoku_file`].
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if path.is_dir() {
        solve_dir(path, common)
    } else if path.extension().is_some_and(|ext| ext == "xc") {
        solve_cover_file(path, common)
    } else {
        solve_sudoku_file(path, None, None, common)
    }
}

/// Solves a directory of puzzle files.
///
/// Every `.sudoku` and `.xc` file below `path` is solved in file name order;
/// other entries are skipped.
///
/// # Errors
///
/// If `path` is not a directory, or a puzzle file fails to parse or verify.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    if !path.is_dir() {
        return Err(CliError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }

        match file_path.extension().and_then(OsStr::to_str) {
            Some("sudoku") => solve_sudoku_file(file_path, None, None, common)?,
            Some("xc") => solve_cover_file(file_path, common)?,
            _ => debug!("Skipping non-puzzle file: {}", file_path.display()),
        }
    }

    Ok(())
}

/// Solves the puzzles of a Sudoku file, optionally only a random sample of
/// `count` of them.
///
/// # Errors
///
/// If the file does not exist, fails to parse, or a solution fails
/// verification.
pub(crate) fn solve_sudoku_file(
    path: &Path,
    count: Option<usize>,
    seed: Option<u64>,
    common: &CommonOptions,
) -> Result<(), CliError> {
    ensure_file(path)?;

    let time = Instant::now();
    let puzzles = parse_sudoku_file(path)?;
    let total = puzzles.len();
    let puzzles = match count {
        Some(amount) => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            sample_boards(puzzles, amount, &mut rng)
        }
        None => puzzles,
    };
    let parse_time = time.elapsed();
    info!(
        "Selected {} of {total} puzzles from {}",
        puzzles.len(),
        path.display()
    );

    let selected = puzzles.len();
    for (i, sudoku) in puzzles.into_iter().enumerate() {
        debug!("Parsed Sudoku:\n{sudoku}");
        let label = format!("{} ({}/{selected})", path.display(), i + 1);
        solve_and_report(&ProblemImpls::from(sudoku), common, &label, parse_time)?;
    }
    Ok(())
}

/// Solves a subset instance file.
///
/// # Errors
///
/// If the file does not exist, fails to parse, or the solution fails
/// verification.
pub(crate) fn solve_cover_file(path: &Path, common: &CommonOptions) -> Result<(), CliError> {
    ensure_file(path)?;

    let time = Instant::now();
    let problem = parse_cover_file(path)?;
    let parse_time = time.elapsed();

    solve_and_report(
        &ProblemImpls::from(problem),
        common,
        &path.display().to_string(),
        parse_time,
    )
}

fn ensure_file(path: &Path) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::NotAFile {
            path: path.to_path_buf(),
        })
    }
}

/// Solves one problem and reports results including stats and verification.
///
/// # Errors
///
/// If the allocator statistics cannot be read or verification fails.
pub(crate) fn solve_and_report(
    problem: &ProblemImpls,
    common: &CommonOptions,
    label: &str,
    parse_time: Duration,
) -> Result<(), CliError> {
    println!("Solving: {label}");
    epoch::advance()?;

    let mut engine = SearchEngine::from_options(common.search_options());
    let solution = engine.solve(problem);
    let metrics = *engine.metrics();
    debug!("{label}: {metrics}");

    let (allocated_mib, resident_mib) = memory_usage()?;

    if common.verify && metrics.solved {
        verify_solution(problem, &solution, label)?;
    }

    if common.stats {
        print_stats(
            parse_time,
            problem,
            &metrics,
            solution.len(),
            allocated_mib,
            resident_mib,
        );
    }

    if common.print_solution && metrics.solved {
        println!("Solution:\n{}", render_solution(problem, &solution));
    }

    println!("\n{}", outcome(&metrics));
    Ok(())
}

/// Allocated and resident memory, in MiB.
fn memory_usage() -> Result<(f64, f64), CliError> {
    epoch::advance()?;
    let allocated = stats::allocated::mib()?.read()?;
    let resident = stats::resident::mib()?.read()?;
    Ok((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Replays `solution` on a fresh copy of `problem`.
///
/// # Errors
///
/// If an action is rejected or the final state is not a goal.
pub(crate) fn verify_solution(
    problem: &ProblemImpls,
    solution: &[ActionImpls],
    label: &str,
) -> Result<(), CliError> {
    let mut replay = problem.clone_state();
    let ok = solution.iter().all(|action| replay.apply_action(action)) && replay.is_goal();
    println!("Verified: {ok}");
    if ok {
        Ok(())
    } else {
        Err(CliError::VerificationFailed {
            label: label.to_string(),
        })
    }
}

/// The filled grid followed by the placements for a Sudoku, the chosen
/// subset names for a subset instance.
pub(crate) fn render_solution(problem: &ProblemImpls, solution: &[ActionImpls]) -> String {
    match problem {
        ProblemImpls::Sudoku(sudoku) => {
            let mut filled = sudoku.clone();
            for action in solution {
                if let ActionImpls::Sudoku(placement) = action {
                    if !filled.apply_action(placement) {
                        warn!("Could not place {placement}");
                    }
                }
            }
            format!("{filled}Actions: {}", solution.iter().join(", "))
        }
        ProblemImpls::Subsets(subsets) => solution
            .iter()
            .map(|action| match action {
                ActionImpls::Subsets(chosen) => subsets
                    .subset_name(chosen)
                    .map_or_else(|| chosen.to_string(), str::to_string),
                ActionImpls::Sudoku(_) => action.to_string(),
            })
            .join(" "),
    }
}

/// The final verdict line of a solve.
pub(crate) const fn outcome(metrics: &Metrics) -> &'static str {
    if metrics.solved {
        "SOLVED"
    } else if metrics.aborted {
        "ABORTED"
    } else {
        "NO SOLUTION"
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    problem: &ProblemImpls,
    metrics: &Metrics,
    actions: usize,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = metrics.elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Problem kind", problem.kind());
    stat_line("Matrix nodes", metrics.torsize);
    stat_line("Initial constraints", metrics.initial_constraints);
    stat_line("Skipped constraints", metrics.skipped_constraints);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Nodes explored", metrics.nodes_explored, elapsed_secs);
    stat_line("Actions in solution", actions);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dlx_solver::dlx::ColumnSelectionImpls;
    use dlx_solver::subsets::parse_cover;
    use dlx_solver::sudoku::{Board, Sudoku, SudokuAction};
    use dlx_solver::sudoku::board::{EXAMPLE_FOUR, Size};

    fn four() -> ProblemImpls {
        Sudoku::new(Board::from(EXAMPLE_FOUR)).unwrap().into()
    }

    #[test]
    fn test_command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["dlx", "cover", "--path", "puzzle.xc"]).unwrap();
        assert_eq!(cli.common(), &CommonOptions::default());
        assert_eq!(cli.common().search_options(), SearchOptions::default());
    }

    #[test]
    fn test_options_reach_the_engine_configuration() {
        let cli = Cli::try_parse_from([
            "dlx",
            "sudoku",
            "--path",
            "puzzles.sudoku",
            "-n",
            "3",
            "--seed",
            "7",
            "--selection",
            "first-column",
            "--max-nodes",
            "100",
            "--verify",
            "false",
        ])
        .unwrap();

        let Some(Commands::Sudoku { count, seed, .. }) = &cli.command else {
            panic!("expected the sudoku subcommand");
        };
        assert_eq!((*count, *seed), (Some(3), Some(7)));

        let common = cli.common();
        assert!(!common.verify);
        assert!(common.stats);
        let options = common.search_options();
        assert!(matches!(options.selection, ColumnSelectionImpls::FirstColumn(_)));
        assert_eq!(options.limits.max_nodes, Some(100));
    }

    #[test]
    fn test_bare_path() {
        let cli = Cli::try_parse_from(["dlx", "-d", "puzzles"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.path, Some(PathBuf::from("puzzles")));
        assert!(cli.common().debug);
    }

    #[test]
    fn test_verify_accepts_engine_solution() {
        let problem = four();
        let solution = SearchEngine::new().solve(&problem);
        assert!(verify_solution(&problem, &solution, "four").is_ok());
    }

    #[test]
    fn test_verify_rejects_incomplete_solution() {
        let problem = four();
        let mut solution = SearchEngine::new().solve(&problem);
        solution.pop();
        assert!(matches!(
            verify_solution(&problem, &solution, "four"),
            Err(CliError::VerificationFailed { .. })
        ));

        let clash = vec![ActionImpls::from(SudokuAction::new(1, 1, Size::Four))];
        assert!(verify_solution(&problem, &clash, "four").is_err());
    }

    #[test]
    fn test_render_subset_names() {
        let problem: ProblemImpls = parse_cover("columns: A B C\nab: A B\nc: C\nbc: B C")
            .unwrap()
            .into();
        let solution = SearchEngine::new().solve(&problem);
        assert_eq!(render_solution(&problem, &solution), "ab c");
    }

    #[test]
    fn test_render_filled_grid() {
        let problem = four();
        let solution = SearchEngine::new().solve(&problem);
        let rendered = render_solution(&problem, &solution);
        let (grid, actions) = rendered.split_once("Actions: ").unwrap();
        assert!(!grid.contains('.'));
        assert!(!grid.contains('0'));
        assert_eq!(actions, solution.iter().join(", "));
        assert_eq!(actions.matches('(').count(), 16 - 6);
    }

    #[test]
    fn test_outcome() {
        let mut metrics = Metrics::default();
        assert_eq!(outcome(&metrics), "NO SOLUTION");
        metrics.aborted = true;
        assert_eq!(outcome(&metrics), "ABORTED");
        metrics.solved = true;
        assert_eq!(outcome(&metrics), "SOLVED");
    }

    #[test]
    fn test_error_conversions() {
        let err = CliError::from(std::io::Error::other("closed"));
        assert!(matches!(err, CliError::Io(_)));
        assert_eq!(err.to_string(), "closed");

        let err = CliError::from(ParseError::UnsupportedLength { line: 2, len: 5 });
        assert_eq!(
            err.to_string(),
            "error parsing Sudoku file: line 2: 5 cells do not form a supported board"
        );

        let err = CliError::from(CoverParseError::NoColumns);
        assert!(matches!(err, CliError::Cover(CoverParseError::NoColumns)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_missing_inputs() {
        let common = CommonOptions::default();
        let missing = Path::new("no/such/puzzle.sudoku");
        assert!(matches!(
            solve_sudoku_file(missing, None, None, &common),
            Err(CliError::NotAFile { .. })
        ));
        assert!(matches!(
            solve_dir(missing, &common),
            Err(CliError::NotADirectory { .. })
        ));
    }
}
