//! CLI: read a puzzle, encode it to CNF, solve it, print the result.
//!
//! Shaped after `varisat-cli`'s `main`/`main_with_err` split (log the
//! error and exit non-zero rather than panicking) and `solver-cli`'s
//! engine/heuristic selection flags.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{error, info};

use nonconsec_sudoku_sat::grid::{decode_grid, print_grid};
use nonconsec_sudoku_sat::heuristic::{
    BranchHeuristic, FirstHeuristic, FrequencyPhaseHeuristic, LastHeuristic, RandomHeuristic,
};
use nonconsec_sudoku_sat::{encode_file, CdclSolver, DpllSolver, EncodeError, SolveStatus};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Engine {
    Cdcl,
    Dpll,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicKind {
    First,
    Last,
    Random,
    Frequency,
}

/// Solve a non-consecutive Sudoku puzzle by reduction to SAT.
#[derive(Parser, Debug)]
#[command(name = "nonconsec-sudoku-sat", version, about)]
struct Cli {
    /// Path to the puzzle file (whitespace-separated rows, 0 for blanks).
    puzzle: PathBuf,

    /// Search engine to use.
    #[arg(long, value_enum, default_value_t = Engine::Cdcl)]
    engine: Engine,

    /// Branching heuristic for decision literals.
    #[arg(long, value_enum, default_value_t = HeuristicKind::First)]
    heuristic: HeuristicKind,

    /// Seed for the random heuristic (ignored otherwise).
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, EncodeError> {
    info!("reading puzzle from {}", cli.puzzle.display());
    let puzzle = encode_file(&cli.puzzle)?;
    info!(
        "encoded {}x{} puzzle: {} clauses over {} variables",
        puzzle.n,
        puzzle.n,
        puzzle.clauses.len(),
        puzzle.num_vars
    );

    let heuristic = build_heuristic(cli.heuristic, cli.seed, &puzzle.clauses, puzzle.num_vars);

    let status = match cli.engine {
        Engine::Cdcl => CdclSolver::new(puzzle.clauses, puzzle.num_vars, heuristic).solve(),
        Engine::Dpll => DpllSolver::new(puzzle.clauses, puzzle.num_vars, heuristic).solve(),
    };

    match status {
        SolveStatus::Sat(model) => {
            println!("SAT");
            let grid = decode_grid(&model, puzzle.n);
            print_grid(&grid);
            Ok(ExitCode::SUCCESS)
        }
        SolveStatus::Unsat => {
            println!("UNSAT");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_heuristic(
    kind: HeuristicKind,
    seed: u64,
    clauses: &[Vec<i32>],
    num_vars: usize,
) -> Box<dyn BranchHeuristic> {
    match kind {
        HeuristicKind::First => Box::new(FirstHeuristic),
        HeuristicKind::Last => Box::new(LastHeuristic),
        HeuristicKind::Random => Box::new(RandomHeuristic::new(seed)),
        HeuristicKind::Frequency => Box::new(FrequencyPhaseHeuristic::new(clauses, num_vars)),
    }
}
