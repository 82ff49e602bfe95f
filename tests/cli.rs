//! CLI smoke tests, in the teacher's `assert_cmd`/`predicates`/`tempfile`
//! integration-test style (`run_solver` helper invoking the built binary).

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn puzzle_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn run_solver(content: &str) -> (Command, NamedTempFile) {
    let file = puzzle_file(content);
    let mut cmd = Command::cargo_bin("nonconsec-sudoku-sat").unwrap();
    cmd.arg(file.path());
    (cmd, file)
}

#[test]
fn unsolvable_four_by_four_reports_unsat() {
    let content = "\
0 0 0 0
0 0 0 0
0 0 0 0
0 0 0 0
";
    // A blank 4x4 board has no non-consecutive solution (see tests/sudoku.rs),
    // so this exercises the UNSAT CLI path.
    let (mut cmd, _file) = run_solver(content);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("UNSAT"));
}

#[test]
fn solvable_puzzle_reports_sat() {
    let content = "\
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
";
    let (mut cmd, _file) = run_solver(content);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("SAT").and(predicate::str::contains("UNSAT").not()));
}

#[test]
fn dpll_engine_flag_also_solves() {
    let content = "\
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0
";
    let file = puzzle_file(content);
    Command::cargo_bin("nonconsec-sudoku-sat")
        .unwrap()
        .arg(file.path())
        .arg("--engine")
        .arg("dpll")
        .assert()
        .success()
        .stdout(predicate::str::contains("SAT"));
}

#[test]
fn missing_file_is_a_nonzero_exit() {
    Command::cargo_bin("nonconsec-sudoku-sat")
        .unwrap()
        .arg("/nonexistent/path/to/a/puzzle.txt")
        .assert()
        .failure();
}

#[test]
fn ragged_grid_is_a_nonzero_exit() {
    let content = "1 2\n1 2 3\n";
    let (mut cmd, _file) = run_solver(content);
    cmd.assert().failure();
}
