use criterion::{Criterion, criterion_group, criterion_main};
use dlx_solver::dlx::selection::{FirstColumn, MinimumRemaining};
use dlx_solver::dlx::{ColumnSelection, Problem, SearchEngine, SearchLimits};
use dlx_solver::subsets::parse_cover;
use dlx_solver::sudoku::board::{EXAMPLE_FOUR, EXAMPLE_NINE, EXAMPLE_SIXTEEN};
use dlx_solver::sudoku::{Board, Sudoku};
use std::hint::black_box;
use std::time::Duration;

const KNUTH: &str = "columns: A B C D E F G
r1: C E F
r2: A D G
r3: B C F
r4: A D
r5: B G
r6: D E G";

fn solve_with<S: ColumnSelection, P: Problem>(selection: S, problem: &P) {
    let mut engine = SearchEngine::with_selection(selection, SearchLimits::default());
    black_box(engine.solve(problem));
}

fn bench_sudoku(c: &mut Criterion) {
    let four = Sudoku::new(Board::from(EXAMPLE_FOUR)).unwrap();
    let nine = Sudoku::new(Board::from(EXAMPLE_NINE)).unwrap();
    let sixteen = Sudoku::new(Board::from(EXAMPLE_SIXTEEN)).unwrap();

    c.bench_function("sudoku 4x4", |b| b.iter(|| solve_with(MinimumRemaining, &four)));
    c.bench_function("sudoku 9x9", |b| b.iter(|| solve_with(MinimumRemaining, &nine)));

    let mut group = c.benchmark_group("sudoku 16x16");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(20));
    group.bench_function("minimum remaining", |b| {
        b.iter(|| solve_with(MinimumRemaining, &sixteen));
    });
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let nine = Sudoku::new(Board::from(EXAMPLE_NINE)).unwrap();
    let knuth = parse_cover(KNUTH).unwrap();

    let mut group = c.benchmark_group("column selection");
    group.bench_function("sudoku 9x9 - minimum remaining", |b| {
        b.iter(|| solve_with(MinimumRemaining, &nine));
    });
    group.bench_function("sudoku 9x9 - first column", |b| {
        b.iter(|| solve_with(FirstColumn, &nine));
    });
    group.bench_function("knuth - minimum remaining", |b| {
        b.iter(|| solve_with(MinimumRemaining, &knuth));
    });
    group.bench_function("knuth - first column", |b| {
        b.iter(|| solve_with(FirstColumn, &knuth));
    });
    group.finish();
}

fn bench_matrix(c: &mut Criterion) {
    let nine = Sudoku::new(Board::from(EXAMPLE_NINE)).unwrap();

    c.bench_function("sudoku 9x9 - produce matrix", |b| {
        b.iter(|| black_box(nine.produce_matrix()));
    });

    let mut matrix = nine.produce_matrix();
    let columns: Vec<_> = matrix.live_columns().collect();
    c.bench_function("sudoku 9x9 - cover and uncover every column", |b| {
        b.iter(|| {
            for &column in &columns {
                black_box(matrix.cover(column));
            }
            for &column in columns.iter().rev() {
                matrix.uncover(column);
            }
        });
    });
}

criterion_group!(benches, bench_sudoku, bench_selection, bench_matrix);
criterion_main!(benches);
